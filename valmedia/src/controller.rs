//! PlaybackController : propriétaire unique de la ressource média active

use std::sync::Arc;

use tracing::debug;
use valutils::{format_time, progress_percent};

use crate::capabilities::{MediaTransport, PlayerSurface};
use crate::track::Track;

/// Contrôleur de lecture de la présentation.
///
/// Il possède l'unique handle média, pousse les effets d'affichage sur la
/// [`PlayerSurface`] et mémorise la dernière position rapportée : c'est
/// elle que la machine de playlist capture en entrant en mode prompt.
///
/// Politique d'erreur : un démarrage de lecture refusé par le backend est
/// avalé (log `debug` seulement), l'état reste "en pause" et rien n'est
/// montré à l'utilisateur. Les refus d'autoplay sont attendus.
pub struct PlaybackController {
    transport: Arc<dyn MediaTransport>,
    surface: Arc<dyn PlayerSurface>,
    playing: bool,
    elapsed_secs: f64,
    duration_secs: Option<f64>,
    pending_seek_secs: Option<f64>,
}

impl PlaybackController {
    pub fn new(transport: Arc<dyn MediaTransport>, surface: Arc<dyn PlayerSurface>) -> Self {
        Self {
            transport,
            surface,
            playing: false,
            elapsed_secs: 0.0,
            duration_secs: None,
            pending_seek_secs: None,
        }
    }

    /// Lie le contrôleur à un morceau.
    ///
    /// Met à jour l'affichage (artiste, titre, pochette), lie le transport
    /// à la ressource et repart d'une position nulle. Aucune lecture n'est
    /// déclenchée. Un seek différé posé avant le changement de morceau est
    /// abandonné : il visait l'ancienne ressource.
    pub fn set_track(&mut self, track: &Track) {
        self.surface
            .set_now_playing(&track.artist, &track.title, &track.art);

        self.elapsed_secs = 0.0;
        self.duration_secs = None;
        self.pending_seek_secs = None;

        if let Err(e) = self.transport.set_uri(&track.media) {
            debug!(uri = %track.media, error = %e, "Failed to bind media resource");
        }
    }

    /// Tente de démarrer la lecture.
    ///
    /// Retourne `true` si la lecture a effectivement démarré. Un refus du
    /// backend laisse l'état en pause sans toucher à l'affichage ; les
    /// appelants ignorent la valeur de retour.
    pub fn play(&mut self) -> bool {
        match self.transport.play() {
            Ok(()) => {
                self.playing = true;
                self.surface.set_playing_indicator(true);
                true
            }
            Err(e) => {
                debug!(error = %e, "Playback start rejected, staying paused");
                self.playing = false;
                false
            }
        }
    }

    /// Met la lecture en pause. Réussit toujours du point de vue de l'UI.
    pub fn pause(&mut self) {
        if let Err(e) = self.transport.pause() {
            debug!(error = %e, "Pause reported an error");
        }
        self.playing = false;
        self.surface.set_playing_indicator(false);
    }

    /// Bouton lecture/pause : lecture si en pause, pause sinon.
    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            let _ = self.play();
        }
    }

    /// Seek à une fraction `[0, 1]` de la durée.
    ///
    /// Durée inconnue : traitée comme 0, donc retour au début.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let duration = self.duration_secs.unwrap_or(0.0);
        let target = duration * fraction.clamp(0.0, 1.0);
        if let Err(e) = self.transport.seek_to(target) {
            debug!(target, error = %e, "Seek failed");
        }
    }

    /// Pose un seek différé, appliqué quand la durée sera connue.
    ///
    /// C'est le mécanisme de restauration de position en sortie de mode
    /// prompt : la cible sera bornée par la durée réelle du morceau.
    pub fn request_seek(&mut self, position_secs: f64) {
        self.pending_seek_secs = Some(position_secs);
    }

    /// Notification : position de lecture mise à jour.
    ///
    /// Recalcule l'affichage des temps et le curseur `[0, 100]` (0 tant
    /// que la durée est inconnue).
    pub fn on_position(&mut self, elapsed_secs: f64, duration_secs: Option<f64>) {
        self.elapsed_secs = elapsed_secs;
        if duration_secs.is_some() {
            self.duration_secs = duration_secs;
        }

        let duration = duration_secs.unwrap_or(0.0);
        self.surface
            .set_time_display(&format_time(elapsed_secs), &format_time(duration));
        self.surface
            .set_seek_percent(progress_percent(elapsed_secs, duration));
    }

    /// Notification : la durée du morceau est connue.
    ///
    /// Applique (et consomme) le seek différé éventuel, borné à la durée.
    pub fn on_metadata(&mut self, duration_secs: f64) {
        self.duration_secs = Some(duration_secs);
        self.surface
            .set_time_display(&format_time(self.elapsed_secs), &format_time(duration_secs));

        if let Some(target) = self.pending_seek_secs.take() {
            let clamped = target.min(duration_secs);
            if let Err(e) = self.transport.seek_to(clamped) {
                debug!(target = clamped, error = %e, "Deferred seek failed");
            }
        }
    }

    /// Dernière position rapportée par le backend, en secondes.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Vrai si la dernière tentative de lecture a abouti.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, PlaybackPositionInfo, Result};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Transport de test : journalise les appels, peut refuser play()
    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<String>>,
        reject_play: AtomicBool,
    }

    impl RecordingTransport {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MediaTransport for RecordingTransport {
        fn set_uri(&self, uri: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("set_uri:{uri}"));
            Ok(())
        }

        fn play(&self) -> Result<()> {
            self.calls.lock().unwrap().push("play".to_string());
            if self.reject_play.load(Ordering::SeqCst) {
                Err(Error::PlaybackRejected("user gesture required".into()))
            } else {
                Ok(())
            }
        }

        fn pause(&self) -> Result<()> {
            self.calls.lock().unwrap().push("pause".to_string());
            Ok(())
        }

        fn seek_to(&self, position_secs: f64) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("seek:{position_secs}"));
            Ok(())
        }

        fn position(&self) -> Result<PlaybackPositionInfo> {
            Ok(PlaybackPositionInfo::default())
        }
    }

    /// Surface de test : journalise les effets d'affichage
    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PlayerSurface for RecordingSurface {
        fn set_now_playing(&self, artist: &str, title: &str, art_uri: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("now_playing:{artist}/{title}/{art_uri}"));
        }

        fn set_time_display(&self, elapsed: &str, total: &str) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("time:{elapsed}/{total}"));
        }

        fn set_seek_percent(&self, percent: f64) {
            self.calls.lock().unwrap().push(format!("seek_pct:{percent}"));
        }

        fn set_playing_indicator(&self, playing: bool) {
            self.calls.lock().unwrap().push(format!("playing:{playing}"));
        }
    }

    fn controller() -> (
        Arc<RecordingTransport>,
        Arc<RecordingSurface>,
        PlaybackController,
    ) {
        let transport = Arc::new(RecordingTransport::default());
        let surface = Arc::new(RecordingSurface::default());
        let controller = PlaybackController::new(transport.clone(), surface.clone());
        (transport, surface, controller)
    }

    fn track() -> Track {
        Track {
            artist: "keshi".into(),
            title: "War With Heaven".into(),
            media: "assets/audio/war_with_heaven.mp3".into(),
            art: "assets/images/war_with_heaven.jpg".into(),
        }
    }

    #[test]
    fn test_set_track_binds_without_playing() {
        let (transport, surface, mut controller) = controller();
        controller.set_track(&track());

        assert_eq!(
            transport.calls(),
            vec!["set_uri:assets/audio/war_with_heaven.mp3"]
        );
        assert_eq!(
            surface.calls(),
            vec!["now_playing:keshi/War With Heaven/assets/images/war_with_heaven.jpg"]
        );
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_rejected_play_is_swallowed() {
        let (transport, surface, mut controller) = controller();
        transport.reject_play.store(true, Ordering::SeqCst);

        let started = controller.play();

        assert!(!started);
        assert!(!controller.is_playing());
        // Aucun effet d'affichage : l'UI ne reflète pas un état "playing"
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_play_then_pause_toggles_indicator() {
        let (_transport, surface, mut controller) = controller();

        assert!(controller.play());
        controller.pause();

        assert_eq!(surface.calls(), vec!["playing:true", "playing:false"]);
    }

    #[test]
    fn test_toggle_follows_playing_state() {
        let (transport, _surface, mut controller) = controller();

        controller.toggle();
        controller.toggle();

        assert_eq!(transport.calls(), vec!["play", "pause"]);
    }

    #[test]
    fn test_seek_fraction_with_unknown_duration_seeks_start() {
        let (transport, _surface, mut controller) = controller();
        controller.seek_fraction(0.5);
        assert_eq!(transport.calls(), vec!["seek:0"]);
    }

    #[test]
    fn test_seek_fraction_scales_by_duration() {
        let (transport, _surface, mut controller) = controller();
        controller.on_metadata(200.0);
        controller.seek_fraction(0.25);
        assert_eq!(transport.calls(), vec!["seek:50"]);
    }

    #[test]
    fn test_deferred_seek_applied_once_and_clamped() {
        let (transport, _surface, mut controller) = controller();

        controller.request_seek(42.0);
        controller.on_metadata(30.0);
        // Un second MetadataKnown ne rejoue pas le seek
        controller.on_metadata(30.0);

        let seeks: Vec<_> = transport
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("seek"))
            .collect();
        assert_eq!(seeks, vec!["seek:30"]);
    }

    #[test]
    fn test_set_track_drops_stale_deferred_seek() {
        let (transport, _surface, mut controller) = controller();

        controller.request_seek(42.0);
        controller.set_track(&track());
        controller.on_metadata(120.0);

        assert!(transport.calls().iter().all(|c| !c.starts_with("seek")));
    }

    #[test]
    fn test_position_updates_display() {
        let (_transport, surface, mut controller) = controller();

        controller.on_position(65.0, Some(130.0));

        assert_eq!(surface.calls(), vec!["time:1:05/2:10", "seek_pct:50"]);
        assert_eq!(controller.elapsed_secs(), 65.0);
    }

    #[test]
    fn test_position_with_unknown_duration() {
        let (_transport, surface, mut controller) = controller();

        controller.on_position(5.0, None);

        // Durée inconnue : affichée 0:00, curseur à 0
        assert_eq!(surface.calls(), vec!["time:0:05/0:00", "seek_pct:0"]);
    }
}
