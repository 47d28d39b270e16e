//! Surfaces console : le rendu de la présentation passe par le journal.

use tracing::{debug, info};
use valgate::GateSurface;
use valmedia::PlayerSurface;

/// Affichage du lecteur en console.
pub struct ConsolePlayerSurface;

impl PlayerSurface for ConsolePlayerSurface {
    fn set_now_playing(&self, artist: &str, title: &str, art_uri: &str) {
        info!(artist, title, art = art_uri, "🎵 Now playing");
    }

    fn set_time_display(&self, elapsed: &str, total: &str) {
        // Haute fréquence pendant la lecture : debug seulement
        debug!(elapsed, total, "Time display");
    }

    fn set_seek_percent(&self, percent: f64) {
        debug!(percent = %format!("{percent:.1}"), "Seek slider");
    }

    fn set_playing_indicator(&self, playing: bool) {
        info!(
            label = if playing { "Pause" } else { "Play" },
            "Play/pause control toggled"
        );
    }
}

/// Affichage de l'écran de chargement en console.
pub struct ConsoleGateSurface;

impl GateSurface for ConsoleGateSurface {
    fn show_slide(&self, uri: &str) {
        debug!(slide = uri, "Slideshow frame");
    }

    fn set_progress_percent(&self, percent: u8) {
        info!(percent, "Loading");
    }

    fn fade_out_progress(&self) {
        info!("Progress bar fading out");
    }

    fn reveal_enter(&self) {
        info!("💌 Ready: type 'enter' to open (sound on!)");
    }

    fn hide_gate(&self) {
        info!("Loader dismissed, revealing the page");
    }
}
