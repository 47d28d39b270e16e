//! Boucle d'événements de la présentation.
//!
//! Tout l'état partagé (gate, machine de playlist, navigation) est
//! possédé ici et muté depuis cette seule boucle : les transitions sont
//! des fonctions synchrones, la concurrence se limite aux tâches qui
//! alimentent les canaux.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};
use valconfig::Config;
use valgate::{
    run_preload, Gate, GateConfigExt, GateEvent, ProbeFetcher, SlideshowLoop,
};
use valmedia::{MediaEvent, PlaybackController};
use valnav::{DotNav, NavConfigExt};
use valplaylist::{Mode, ModeMachine, PlaylistConfigExt};

use crate::input::{self, UserAction};
use crate::sim::{SimulatedMediaTransport, SimulatedViewport};
use crate::surfaces::{ConsoleGateSurface, ConsolePlayerSurface};

/// Section vers laquelle la réponse "no" fait défiler la page.
const PROMPT_SCROLL_TARGET: &str = "music";

/// La présentation assemblée : état possédé + canaux d'alimentation.
pub struct Runtime {
    gate: Gate,
    machine: ModeMachine,
    nav: DotNav,
    transport: Arc<SimulatedMediaTransport>,
    reveal_delay: Duration,
    answered: bool,
    title: String,
    gate_tx: mpsc::Sender<GateEvent>,
    gate_rx: mpsc::Receiver<GateEvent>,
    media_rx: mpsc::Receiver<MediaEvent>,
    user_rx: mpsc::Receiver<UserAction>,
    vis_rx: mpsc::Receiver<String>,
}

impl Runtime {
    /// Assemble la présentation et démarre ses tâches d'alimentation
    /// (diaporama, préchargement, lecture de stdin, ticker média).
    pub fn start(config: &Config) -> Result<Self> {
        let (media_tx, media_rx) = mpsc::channel(64);
        let (gate_tx, gate_rx) = mpsc::channel(64);
        let (user_tx, user_rx) = mpsc::channel(16);
        let (vis_tx, vis_rx) = mpsc::channel(16);

        // Lecteur : backend simulé + contrôleur + playlists de la config
        let transport = SimulatedMediaTransport::new(media_tx);
        let controller =
            PlaybackController::new(transport.clone(), Arc::new(ConsolePlayerSurface));
        let machine = ModeMachine::new(
            config.normal_playlist()?,
            config.prompt_track()?,
            controller,
        );

        // Navigation : observateur de visibilité simulé
        let nav_settings = config.nav_settings();
        info!(
            threshold = nav_settings.visibility_threshold,
            sections = nav_settings.sections.len(),
            "Visibility observer configured"
        );
        let nav = DotNav::new(
            nav_settings.sections,
            Arc::new(SimulatedViewport::new(
                nav_settings.visibility_threshold,
                vis_tx,
            )),
        );

        // Gate : diaporama cadencé + préchargement concurrent
        let settings = config.gate_settings();
        let slides = config.slide_refs();
        let assets = config.preload_assets();
        info!(
            slides = slides.len(),
            assets = assets.len(),
            "Starting the loading gate"
        );
        let gate = Gate::new(slides, assets.len(), Arc::new(ConsoleGateSurface));

        SlideshowLoop::new(settings.slide_interval, gate.stop_token()).spawn(gate_tx.clone());
        run_preload(Arc::new(ProbeFetcher::new()), assets, gate_tx.clone());
        input::spawn_stdin_reader(user_tx);

        Ok(Self {
            gate,
            machine,
            nav,
            transport,
            reveal_delay: settings.reveal_delay,
            answered: false,
            title: config.get_presentation_title(),
            gate_tx,
            gate_rx,
            media_rx,
            user_rx,
            vis_rx,
        })
    }

    /// Boucle d'événements, jusqu'à `quit` ou Ctrl+C.
    pub async fn run(mut self) {
        let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
        loop {
            tokio::select! {
                Some(event) = self.gate_rx.recv() => self.handle_gate(event),
                Some(event) = self.media_rx.recv() => self.handle_media(event),
                Some(action) = self.user_rx.recv() => {
                    if !self.handle_user(action) {
                        break;
                    }
                }
                Some(section) = self.vis_rx.recv() => self.nav.on_section_visible(&section),
                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    break;
                }
            }
        }
    }

    fn handle_gate(&mut self, event: GateEvent) {
        let became_ready = match event {
            GateEvent::SlideTick => self.gate.on_slide_tick(),
            GateEvent::AssetResolved { uri, ok } => self.gate.on_asset_resolved(&uri, ok),
            GateEvent::RevealDue => {
                self.gate.on_reveal_due();
                false
            }
        };
        if became_ready {
            self.schedule_reveal();
        }
    }

    /// Programme la révélation du bouton d'entrée : le fondu de la barre
    /// de progression doit se terminer avant.
    fn schedule_reveal(&self) {
        let tx = self.gate_tx.clone();
        let delay = self.reveal_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(GateEvent::RevealDue).await;
        });
    }

    fn handle_media(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::PositionChanged {
                elapsed_secs,
                duration_secs,
            } => self
                .machine
                .controller_mut()
                .on_position(elapsed_secs, duration_secs),
            MediaEvent::MetadataKnown { duration_secs } => {
                self.machine.controller_mut().on_metadata(duration_secs)
            }
            MediaEvent::Ended => self.machine.on_track_ended(),
        }
    }

    /// Route une action utilisateur. Retourne `false` pour terminer.
    fn handle_user(&mut self, action: UserAction) -> bool {
        match action {
            UserAction::Quit => return false,
            UserAction::Enter => self.handle_enter(),
            // Derrière l'écran de chargement, seul "enter" agit
            _ if !self.gate.is_entered() => {
                info!("The page is still behind the loader, wait for 'enter'");
            }
            UserAction::Toggle => self.machine.controller_mut().toggle(),
            UserAction::Prev => self.machine.select_relative(-1),
            UserAction::Next => self.machine.select_relative(1),
            UserAction::Seek(percent) => self
                .machine
                .controller_mut()
                .seek_fraction(percent / 100.0),
            UserAction::No => self.handle_no(),
            UserAction::Yes => self.handle_yes(),
            UserAction::Goto(section) => {
                if let Err(e) = self.nav.request_scroll_to(&section) {
                    warn!(error = %e, "Cannot scroll there");
                }
            }
        }
        true
    }

    /// Commit d'entrée : front unique qui arrête le diaporama, démarre
    /// la playlist normale au premier morceau et révèle la navigation.
    fn handle_enter(&mut self) {
        if self.gate.commit_enter() {
            self.transport.user_gesture_seen();
            self.machine.start_from_top();
            self.nav.reveal();
            if let Some(ready_at) = self.gate.ready_at() {
                info!(ready_at = %ready_at.format("%H:%M:%S"), "💝 Welcome in");
            }
        } else if !self.gate.is_entered() {
            info!("Still loading — the enter control is not revealed yet");
        }
    }

    /// Réponse "no" : bascule en mode prompt et défile vers le lecteur.
    fn handle_no(&mut self) {
        if self.answered {
            info!("The question is already settled");
            return;
        }
        self.machine.enter_prompt();
        if let Err(e) = self.nav.request_scroll_to(PROMPT_SCROLL_TARGET) {
            warn!(error = %e, "Prompt scroll target missing");
        }
    }

    /// Réponse "yes" : verrouille la question ; si le prompt tournait,
    /// reprend la playlist normale là où elle s'était arrêtée.
    fn handle_yes(&mut self) {
        if self.answered {
            info!("The question is already settled");
            return;
        }
        self.answered = true;
        info!("💘 {} — locked in", self.title);
        if self.machine.mode() == Mode::Prompt {
            self.machine.exit_prompt_and_commit();
        }
    }
}
