//! Abstractions des capacités média et d'affichage du lecteur.
//!
//! Les couches hautes ne dépendent que de ces traits ; le backend réel
//! (élément audio, renderer simulé, mock de test) reste interchangeable.

use crate::Result;

/// Position de lecture rapportée par le backend média.
#[derive(Clone, Debug, Default)]
pub struct PlaybackPositionInfo {
    /// Temps écoulé depuis le début du morceau, en secondes.
    pub elapsed_secs: f64,
    /// Durée totale, `None` tant que les métadonnées ne sont pas connues.
    pub duration_secs: Option<f64>,
}

/// Abstraction générique du transport média (lecture / pause / seek)
/// indépendamment du backend sous-jacent.
pub trait MediaTransport: Send + Sync {
    /// Lie le transport à une ressource référencée par URI.
    ///
    /// Ne déclenche aucune lecture ; la position repart de zéro.
    fn set_uri(&self, uri: &str) -> Result<()>;

    /// Démarre ou reprend la lecture.
    ///
    /// Peut échouer avec [`crate::Error::PlaybackRejected`] si le backend
    /// applique une politique de démarrage (geste utilisateur requis).
    fn play(&self) -> Result<()>;

    /// Met la lecture en pause.
    fn pause(&self) -> Result<()>;

    /// Seek à une position absolue en secondes.
    fn seek_to(&self, position_secs: f64) -> Result<()>;

    /// Position courante du transport.
    fn position(&self) -> Result<PlaybackPositionInfo>;
}

/// Notifications émises par le backend média pendant la lecture.
///
/// Elles arrivent sur la boucle d'événements de l'application, qui les
/// route vers le [`crate::PlaybackController`] (position, métadonnées)
/// et vers la machine de playlist (fin de morceau).
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// Émis en continu pendant la lecture.
    PositionChanged {
        elapsed_secs: f64,
        duration_secs: Option<f64>,
    },
    /// La durée du morceau vient d'être connue.
    MetadataKnown { duration_secs: f64 },
    /// Fin de lecture du morceau courant.
    Ended,
}

/// Effets d'affichage du lecteur.
///
/// Le contrôleur pousse ses mises à jour ici ; l'implémentation décide du
/// rendu (console, page, test). Aucune méthode ne retourne d'erreur : un
/// affichage qui échoue n'a pas à perturber la lecture.
pub trait PlayerSurface: Send + Sync {
    /// Artiste, titre et pochette du morceau lié.
    fn set_now_playing(&self, artist: &str, title: &str, art_uri: &str);

    /// Temps écoulé et durée totale, déjà formatés (`"M:SS"`).
    fn set_time_display(&self, elapsed: &str, total: &str);

    /// Position du curseur de lecture, dans `[0, 100]`.
    fn set_seek_percent(&self, percent: f64);

    /// Bascule l'indicateur lecture/pause.
    fn set_playing_indicator(&self, playing: bool);
}
