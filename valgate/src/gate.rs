//! Gate : coordinateur des transitions de l'écran de chargement

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use valutils::percent_display;

use crate::readiness::ReadinessState;

/// Événements alimentant le gate, produits par le diaporama, le
/// préchargement et le timer de révélation, consommés par la boucle
/// d'événements de l'application.
#[derive(Debug, Clone)]
pub enum GateEvent {
    /// Le diaporama a affiché l'image suivante.
    SlideTick,
    /// Une ressource du lot de préchargement est résolue (succès ou
    /// échec, les deux comptent).
    AssetResolved { uri: String, ok: bool },
    /// Le délai entre le verrou `ready` et la révélation est écoulé.
    RevealDue,
}

/// Effets d'affichage de l'écran de chargement.
pub trait GateSurface: Send + Sync {
    /// Affiche une image du diaporama.
    fn show_slide(&self, uri: &str);

    /// Pourcentage de progression affiché, `[0, 100]`.
    fn set_progress_percent(&self, percent: u8);

    /// Lance le fondu de sortie de la barre de progression.
    fn fade_out_progress(&self);

    /// Révèle le bouton d'entrée et le message de volume.
    fn reveal_enter(&self);

    /// Masque l'écran de chargement et révèle le contenu.
    fn hide_gate(&self);
}

/// Coordinateur de l'écran de chargement.
///
/// Toutes les transitions sont synchrones : la boucle d'événements les
/// appelle au fil des [`GateEvent`]. Les méthodes `on_slide_tick` et
/// `on_asset_resolved` retournent `true` sur le front montant du verrou
/// `ready`, à charge pour l'appelant de programmer la révélation après
/// le délai configuré.
pub struct Gate {
    slides: Vec<String>,
    ticks: usize,
    assets_total: usize,
    assets_loaded: usize,
    state: ReadinessState,
    reveal_shown: bool,
    entered: bool,
    ready_at: Option<DateTime<Local>>,
    stop: CancellationToken,
    surface: Arc<dyn GateSurface>,
}

impl Gate {
    /// Construit le gate.
    ///
    /// `slides` est la séquence cyclée par le diaporama (au moins une) ;
    /// `assets_total` la cardinalité fixe du lot de préchargement. Un lot
    /// vide est immédiatement complet.
    pub fn new(slides: Vec<String>, assets_total: usize, surface: Arc<dyn GateSurface>) -> Self {
        let mut state = ReadinessState::default();
        if assets_total == 0 {
            state.preload_progress = 1.0;
            state.preload_done = true;
        }
        surface.set_progress_percent(0);
        Self {
            slides,
            ticks: 0,
            assets_total,
            assets_loaded: 0,
            state,
            reveal_shown: false,
            entered: false,
            ready_at: None,
            stop: CancellationToken::new(),
            surface,
        }
    }

    /// Jeton d'arrêt du diaporama, annulé exactement une fois au commit.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Tick du diaporama : affiche l'image suivante.
    ///
    /// Seul le premier tour fait progresser `slideshow_progress` (k/L
    /// après la k-ième image) ; les tours suivants sont cosmétiques.
    /// Retourne `true` si ce tick a déclenché le verrou `ready`.
    pub fn on_slide_tick(&mut self) -> bool {
        let len = self.slides.len();
        if len == 0 {
            return false;
        }
        self.ticks += 1;
        let index = (self.ticks - 1) % len;
        self.surface.show_slide(&self.slides[index]);

        if self.state.slideshow_done {
            return false;
        }

        self.state.slideshow_progress = (self.ticks as f64 / len as f64).min(1.0);
        if self.ticks >= len {
            self.state.slideshow_done = true;
            self.state.slideshow_progress = 1.0;
            debug!("Slideshow first pass complete");
        }
        self.push_progress();
        self.check_ready()
    }

    /// Résolution d'une ressource du lot de préchargement.
    ///
    /// Succès et échec comptent pareil : un 404 ne doit pas bloquer
    /// l'entrée, il est seulement noté en debug. Retourne `true` si cette
    /// résolution a déclenché le verrou `ready`.
    pub fn on_asset_resolved(&mut self, uri: &str, ok: bool) -> bool {
        if !ok {
            debug!(uri, "Asset failed to resolve, counted as resolved anyway");
        }
        if self.state.preload_done {
            return false;
        }

        self.assets_loaded += 1;
        self.state.preload_progress = self.assets_loaded as f64 / self.assets_total as f64;
        if self.assets_loaded >= self.assets_total {
            self.state.preload_done = true;
            self.state.preload_progress = 1.0;
            debug!(total = self.assets_total, "Preload batch complete");
        }
        self.push_progress();
        self.check_ready()
    }

    /// Révélation du bouton d'entrée, après le délai post-ready.
    ///
    /// Idempotente : un double déclenchement (les deux sous-processus
    /// finissant dans le même tour de boucle) ne révèle qu'une fois.
    pub fn on_reveal_due(&mut self) {
        if self.reveal_shown {
            return;
        }
        self.reveal_shown = true;
        self.surface.reveal_enter();
        info!("Enter control revealed");
    }

    /// Commit de l'entrée : transition à front unique.
    ///
    /// Arrête le diaporama (seule ressource annulable du gate), masque
    /// l'écran de chargement et retourne `true` si le front a eu lieu ;
    /// l'appelant démarre alors la lecture et révèle le contenu. Ignoré
    /// tant que le bouton n'est pas révélé, et à tout appel suivant.
    pub fn commit_enter(&mut self) -> bool {
        if !self.reveal_shown || self.entered {
            return false;
        }
        self.entered = true;
        self.stop.cancel();
        self.surface.hide_gate();
        info!("Gate entered, slideshow stopped");
        true
    }

    /// Pousse la progression mélangée vers l'affichage.
    fn push_progress(&self) {
        self.surface
            .set_progress_percent(percent_display(self.state.blended()));
    }

    /// Verrouille `ready` si les deux sous-processus sont complets.
    ///
    /// Force l'affichage à exactement 100 et lance le fondu de la barre.
    /// Le drapeau `ready` garantit un seul front même si diaporama et
    /// préchargement se terminent dans le même tick.
    fn check_ready(&mut self) -> bool {
        if self.state.ready || !self.state.complete() {
            return false;
        }
        self.state.ready = true;
        self.ready_at = Some(Local::now());
        self.surface.set_progress_percent(100);
        self.surface.fade_out_progress();
        info!("Gate ready, both progress streams complete");
        true
    }

    pub fn state(&self) -> &ReadinessState {
        &self.state
    }

    /// Instant du verrou `ready`, pour le journal de démarrage.
    pub fn ready_at(&self) -> Option<DateTime<Local>> {
        self.ready_at
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestSurface {
        calls: Mutex<Vec<String>>,
    }

    impl TestSurface {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl GateSurface for TestSurface {
        fn show_slide(&self, uri: &str) {
            self.calls.lock().unwrap().push(format!("slide:{uri}"));
        }
        fn set_progress_percent(&self, percent: u8) {
            self.calls.lock().unwrap().push(format!("pct:{percent}"));
        }
        fn fade_out_progress(&self) {
            self.calls.lock().unwrap().push("fade".to_string());
        }
        fn reveal_enter(&self) {
            self.calls.lock().unwrap().push("reveal".to_string());
        }
        fn hide_gate(&self) {
            self.calls.lock().unwrap().push("hide".to_string());
        }
    }

    fn slides(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("load{i}.jpg")).collect()
    }

    fn gate(slide_count: usize, assets: usize) -> (Arc<TestSurface>, Gate) {
        let surface = Arc::new(TestSurface::default());
        let gate = Gate::new(slides(slide_count), assets, surface.clone());
        (surface, gate)
    }

    #[test]
    fn test_first_pass_drives_slideshow_progress() {
        let (_surface, mut gate) = gate(4, 1);
        gate.on_slide_tick();
        assert_eq!(gate.state().slideshow_progress, 0.25);
        gate.on_slide_tick();
        gate.on_slide_tick();
        gate.on_slide_tick();
        assert!(gate.state().slideshow_done);
        assert_eq!(gate.state().slideshow_progress, 1.0);
    }

    #[test]
    fn test_cosmetic_ticks_keep_cycling_without_progress() {
        let (surface, mut gate) = gate(2, 1);
        for _ in 0..5 {
            gate.on_slide_tick();
        }
        assert_eq!(gate.state().slideshow_progress, 1.0);
        // Le cyclage continue : 5 images affichées, en boucle
        let shown: Vec<_> = surface
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("slide:"))
            .collect();
        assert_eq!(
            shown,
            vec![
                "slide:load1.jpg",
                "slide:load2.jpg",
                "slide:load1.jpg",
                "slide:load2.jpg",
                "slide:load1.jpg"
            ]
        );
    }

    #[test]
    fn test_blended_display_caps_at_99() {
        let (surface, mut gate) = gate(2, 2);
        // Diaporama complet, préchargement à moitié : (1.0 + 0.5) / 2
        gate.on_slide_tick();
        gate.on_slide_tick();
        gate.on_asset_resolved("a", true);
        assert_eq!(surface.calls().last().unwrap(), "pct:75");
        assert!(!gate.state().ready);
    }

    #[test]
    fn test_ready_latch_fires_once() {
        let (surface, mut gate) = gate(1, 1);
        let ready_edge_slide = gate.on_slide_tick();
        let ready_edge_asset = gate.on_asset_resolved("a", true);

        assert!(!ready_edge_slide);
        assert!(ready_edge_asset);
        assert!(gate.state().ready);
        assert!(gate.ready_at().is_some());

        // Aucun front supplémentaire, même si des événements continuent
        assert!(!gate.on_slide_tick());
        assert_eq!(
            surface.calls().iter().filter(|c| *c == "fade").count(),
            1
        );
    }

    #[test]
    fn test_ready_forces_display_to_exactly_100() {
        let (surface, mut gate) = gate(1, 1);
        gate.on_slide_tick();
        gate.on_asset_resolved("a", false); // l'échec compte aussi
        assert!(surface.calls().contains(&"pct:100".to_string()));
        assert_eq!(gate.state().blended(), 1.0);
    }

    #[test]
    fn test_preload_order_independent() {
        let (_surface, mut gate) = gate(1, 3);
        // Résolutions dans un ordre quelconque, succès et échecs mêlés
        gate.on_asset_resolved("c", false);
        gate.on_asset_resolved("a", true);
        assert!(!gate.state().preload_done);
        gate.on_asset_resolved("b", true);
        assert!(gate.state().preload_done);
        assert_eq!(gate.state().preload_progress, 1.0);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let (surface, mut gate) = gate(1, 1);
        gate.on_reveal_due();
        gate.on_reveal_due();
        assert_eq!(
            surface.calls().iter().filter(|c| *c == "reveal").count(),
            1
        );
    }

    #[test]
    fn test_commit_requires_reveal_and_fires_once() {
        let (_surface, mut gate) = gate(1, 1);
        // Pas encore révélé : le commit est ignoré
        assert!(!gate.commit_enter());

        gate.on_reveal_due();
        let token = gate.stop_token();
        assert!(gate.commit_enter());
        assert!(token.is_cancelled());

        // Second front impossible
        assert!(!gate.commit_enter());
        assert!(gate.is_entered());
    }

    #[test]
    fn test_empty_batch_is_immediately_complete() {
        let (_surface, mut gate) = gate(1, 0);
        assert!(gate.state().preload_done);
        let ready = gate.on_slide_tick();
        assert!(ready);
    }
}
