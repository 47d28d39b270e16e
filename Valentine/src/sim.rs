//! Collaborateurs simulés : backend média et viewport.
//!
//! En production ces capacités sont fournies par la page (élément audio,
//! IntersectionObserver) ; ici elles sont simulées pour faire tourner la
//! présentation en mode console. Le backend média applique la même
//! politique qu'un navigateur : tout `play()` est refusé tant qu'aucun
//! geste utilisateur (le commit d'entrée) n'a été vu.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};
use valmedia::{MediaEvent, MediaTransport, PlaybackPositionInfo};
use valnav::NavSurface;

/// Cadence du ticker de position (une notification par demi-seconde).
const POSITION_TICK: Duration = Duration::from_millis(500);
/// Latence simulée entre la liaison d'une ressource et ses métadonnées.
const METADATA_DELAY: Duration = Duration::from_millis(150);
/// Latence simulée d'un défilement doux avant le rapport de visibilité.
const SCROLL_SETTLE: Duration = Duration::from_millis(250);

#[derive(Default)]
struct SimState {
    uri: Option<String>,
    duration_secs: Option<f64>,
    elapsed_secs: f64,
    playing: bool,
}

/// Backend média simulé.
///
/// La durée d'un morceau est dérivée de sa référence (stable d'une
/// exécution à l'autre) ; la position avance en temps réel pendant la
/// lecture et la fin de morceau émet [`MediaEvent::Ended`].
pub struct SimulatedMediaTransport {
    state: Arc<Mutex<SimState>>,
    events: mpsc::Sender<MediaEvent>,
    gesture_seen: AtomicBool,
}

impl SimulatedMediaTransport {
    /// Construit le backend et démarre son ticker de position.
    pub fn new(events: mpsc::Sender<MediaEvent>) -> Arc<Self> {
        let transport = Arc::new(Self {
            state: Arc::new(Mutex::new(SimState::default())),
            events,
            gesture_seen: AtomicBool::new(false),
        });

        let state = transport.state.clone();
        let tx = transport.events.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POSITION_TICK);
            loop {
                ticker.tick().await;
                let event = {
                    let mut state = state.lock().unwrap();
                    if !state.playing {
                        continue;
                    }
                    state.elapsed_secs += POSITION_TICK.as_secs_f64();
                    match state.duration_secs {
                        Some(duration) if state.elapsed_secs >= duration => {
                            state.playing = false;
                            state.elapsed_secs = 0.0;
                            MediaEvent::Ended
                        }
                        duration => MediaEvent::PositionChanged {
                            elapsed_secs: state.elapsed_secs,
                            duration_secs: duration,
                        },
                    }
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        transport
    }

    /// Le commit d'entrée vaut geste utilisateur : la lecture est
    /// désormais autorisée.
    pub fn user_gesture_seen(&self) {
        self.gesture_seen.store(true, Ordering::SeqCst);
    }

    /// Durée nominale d'une ressource, dérivée de sa référence.
    fn nominal_duration(uri: &str) -> f64 {
        let sum: u64 = uri.bytes().map(u64::from).sum();
        (180 + sum % 60) as f64
    }
}

impl MediaTransport for SimulatedMediaTransport {
    fn set_uri(&self, uri: &str) -> valmedia::Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.uri = Some(uri.to_string());
            state.duration_secs = None;
            state.elapsed_secs = 0.0;
            state.playing = false;
        }

        // Les métadonnées arrivent peu après la liaison
        let duration = Self::nominal_duration(uri);
        let state = self.state.clone();
        let tx = self.events.clone();
        let bound = uri.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(METADATA_DELAY).await;
            {
                let mut state = state.lock().unwrap();
                // La ressource a pu être reliée ailleurs entre-temps
                if state.uri.as_deref() != Some(bound.as_str()) {
                    return;
                }
                state.duration_secs = Some(duration);
            }
            let _ = tx
                .send(MediaEvent::MetadataKnown {
                    duration_secs: duration,
                })
                .await;
        });
        Ok(())
    }

    fn play(&self) -> valmedia::Result<()> {
        if !self.gesture_seen.load(Ordering::SeqCst) {
            return Err(valmedia::Error::PlaybackRejected(
                "no user gesture seen yet".to_string(),
            ));
        }
        self.state.lock().unwrap().playing = true;
        Ok(())
    }

    fn pause(&self) -> valmedia::Result<()> {
        self.state.lock().unwrap().playing = false;
        Ok(())
    }

    fn seek_to(&self, position_secs: f64) -> valmedia::Result<()> {
        let mut state = self.state.lock().unwrap();
        let bounded = match state.duration_secs {
            Some(duration) => position_secs.clamp(0.0, duration),
            None => position_secs.max(0.0),
        };
        state.elapsed_secs = bounded;
        debug!(position = bounded, "Simulated seek");
        Ok(())
    }

    fn position(&self) -> valmedia::Result<PlaybackPositionInfo> {
        let state = self.state.lock().unwrap();
        Ok(PlaybackPositionInfo {
            elapsed_secs: state.elapsed_secs,
            duration_secs: state.duration_secs,
        })
    }
}

/// Viewport simulé : l'observateur de visibilité de la page console.
///
/// Un défilement demandé "atterrit" après une courte latence, puis la
/// section cible est rapportée visible, exactement comme un
/// IntersectionObserver après un scroll doux.
pub struct SimulatedViewport {
    visibility: mpsc::Sender<String>,
    threshold: f64,
}

impl SimulatedViewport {
    /// `threshold` est la part de surface visible exigée avant de
    /// rapporter une section, telle que configurée pour l'observateur.
    pub fn new(threshold: f64, visibility: mpsc::Sender<String>) -> Self {
        Self {
            visibility,
            threshold,
        }
    }
}

impl NavSurface for SimulatedViewport {
    fn set_active_dot(&self, index: usize) {
        info!(dot = index, "● Active section indicator moved");
    }

    fn scroll_to(&self, section: &str) {
        info!(section, "Smooth scrolling");
        let tx = self.visibility.clone();
        let section = section.to_string();
        let threshold = self.threshold;
        tokio::spawn(async move {
            tokio::time::sleep(SCROLL_SETTLE).await;
            debug!(section = %section, threshold, "Section crossed the visibility threshold");
            let _ = tx.send(section).await;
        });
    }

    fn set_nav_hidden(&self, hidden: bool) {
        if hidden {
            debug!("Dot navigation hidden");
        } else {
            info!("Dot navigation revealed");
        }
    }
}
