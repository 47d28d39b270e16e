//! SlideshowLoop : le métronome du diaporama de chargement

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::gate::GateEvent;

/// Métronome du diaporama.
///
/// Émet un [`GateEvent::SlideTick`] immédiatement puis à chaque
/// intervalle, indéfiniment, jusqu'à l'annulation du jeton au commit
/// d'entrée. Toute la logique (image affichée, progression du premier
/// tour) vit dans le [`crate::Gate`] ; la tâche ne fait que cadencer.
pub struct SlideshowLoop {
    interval: Duration,
    stop: CancellationToken,
}

impl SlideshowLoop {
    pub fn new(interval: Duration, stop: CancellationToken) -> Self {
        Self { interval, stop }
    }

    /// Démarre la tâche de cadencement.
    ///
    /// Le premier tick part tout de suite : la première image est
    /// affichée dès l'ouverture de l'écran de chargement. La tâche se
    /// termine quand le jeton est annulé ou quand le récepteur est
    /// fermé.
    pub fn spawn(self, tx: mpsc::Sender<GateEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = self.stop.cancelled() => {
                        debug!("Slideshow timer stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if tx.send(GateEvent::SlideTick).await.is_err() {
                            break;
                        }
                    }
                }
            }
        })
    }
}
