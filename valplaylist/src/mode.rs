//! ModeMachine : bascule entre playlist normale et morceau du prompt

use tracing::debug;
use valmedia::PlaybackController;
use valmedia::Track;

use crate::playlist::Playlist;

/// Mode de lecture courant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lecture de la playlist normale.
    Normal,
    /// Boucle sur le morceau du prompt ("no" a été cliqué).
    Prompt,
}

/// Position sauvegardée à l'entrée en mode prompt.
///
/// Écrite une seule fois par entrée (une ré-entrée sans sortie ne
/// l'écrase pas), consommée une seule fois à la sortie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedPosition {
    pub index: usize,
    pub time_offset_secs: f64,
}

/// Machine à états des playlists.
///
/// États : `Normal` (avec index courant dans la playlist principale) et
/// `Prompt`. Elle délègue toute action de lecture au
/// [`PlaybackController`] ; les tentatives de lecture qui suivent une
/// transition sont volontairement lancées-puis-oubliées.
pub struct ModeMachine {
    normal: Playlist,
    prompt_track: Track,
    index: usize,
    mode: Mode,
    saved: Option<SavedPosition>,
    controller: PlaybackController,
}

impl ModeMachine {
    /// Construit la machine en état `Normal(0)`, sans rien lier ni jouer.
    ///
    /// `Playlist` garantit déjà la non-vacuité : l'index initial 0 est
    /// toujours valide.
    pub fn new(normal: Playlist, prompt_track: Track, controller: PlaybackController) -> Self {
        Self {
            normal,
            prompt_track,
            index: 0,
            mode: Mode::Normal,
            saved: None,
            controller,
        }
    }

    /// Commit du gate : playlist normale depuis le premier morceau,
    /// tentative de lecture immédiate.
    pub fn start_from_top(&mut self) {
        self.mode = Mode::Normal;
        self.saved = None;
        self.index = 0;
        self.bind_current();
        let _ = self.controller.play();
    }

    /// Morceau précédent (-1) ou suivant (+1) dans la playlist normale.
    ///
    /// Sans effet en mode prompt : les boutons prev/next sont inertes
    /// tant que la question n'a pas reçu de "yes".
    pub fn select_relative(&mut self, delta: i64) {
        if self.mode == Mode::Prompt {
            return;
        }
        self.index = self.normal.wrap(self.index as i64 + delta);
        self.bind_current();
        let _ = self.controller.play();
    }

    /// Entrée en mode prompt (réponse "no").
    ///
    /// À la première entrée depuis le mode normal, capture l'index et la
    /// position de lecture courante. Une ré-entrée (nouveau "no" sans
    /// "yes" entre-temps) ne touche pas à la sauvegarde mais relance bien
    /// le morceau du prompt depuis le début.
    pub fn enter_prompt(&mut self) {
        if self.mode == Mode::Normal {
            self.saved = Some(SavedPosition {
                index: self.index,
                time_offset_secs: self.controller.elapsed_secs(),
            });
        }
        self.mode = Mode::Prompt;
        let track = self.prompt_track.clone();
        self.controller.set_track(&track);
        let _ = self.controller.play();
    }

    /// Sortie du mode prompt (réponse "yes") et restauration.
    ///
    /// Valide uniquement depuis `Prompt`. Reprend la playlist normale à
    /// l'index sauvegardé ; la position est restaurée par seek différé,
    /// bornée à la durée du morceau quand elle sera connue.
    pub fn exit_prompt_and_commit(&mut self) {
        if self.mode != Mode::Prompt {
            return;
        }
        self.mode = Mode::Normal;
        if let Some(saved) = self.saved.take() {
            self.index = saved.index;
            self.bind_current();
            self.controller.request_seek(saved.time_offset_secs);
        } else {
            // Pas de sauvegarde : reprise au morceau courant
            debug!("Exiting prompt mode without a saved position");
            self.bind_current();
        }
        let _ = self.controller.play();
    }

    /// Fin du morceau courant.
    ///
    /// En mode prompt : le même morceau repart de zéro (boucle voulue,
    /// il n'y a pas d'échappatoire tant que "yes" n'est pas cliqué). En
    /// mode normal : avance automatique au morceau suivant, modulo la
    /// longueur.
    pub fn on_track_ended(&mut self) {
        match self.mode {
            Mode::Prompt => {
                self.controller.seek_fraction(0.0);
                let _ = self.controller.play();
            }
            Mode::Normal => {
                self.index = self.normal.wrap(self.index as i64 + 1);
                self.bind_current();
                let _ = self.controller.play();
            }
        }
    }

    /// Lie le morceau courant de la playlist normale au contrôleur.
    fn bind_current(&mut self) {
        if let Some(track) = self.normal.get(self.index) {
            let track = track.clone();
            self.controller.set_track(&track);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Index courant dans la playlist normale (stable en mode prompt).
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Position sauvegardée, tant qu'elle n'a pas été consommée.
    pub fn saved_position(&self) -> Option<SavedPosition> {
        self.saved
    }

    /// Accès au contrôleur pour router position/métadonnées/commandes.
    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }
}
