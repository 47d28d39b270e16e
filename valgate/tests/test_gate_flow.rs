//! Test d'intégration du gate complet : diaporama + préchargement +
//! verrous, cadencés par l'horloge virtuelle de tokio

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use valgate::{run_preload, AssetFetcher, Gate, GateEvent, GateSurface, SlideshowLoop};

/// Surface de test : journalise les effets d'affichage
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

/// Résolveur de test : un échec sur deux, résolution immédiate
struct HalfFailingFetcher;

#[async_trait::async_trait]
impl AssetFetcher for HalfFailingFetcher {
    async fn fetch(&self, uri: &str) -> valgate::Result<()> {
        if uri.ends_with("0") || uri.ends_with("2") {
            Err(valgate::Error::FetchFailed("simulated 404".to_string()))
        } else {
            Ok(())
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_gate_reaches_ready_then_enters() {
    let surface = Arc::new(TestSurface::default());
    let slides: Vec<String> = (1..=3).map(|i| format!("load{i}.jpg")).collect();
    let assets: Vec<String> = (0..4).map(|i| format!("asset{i}")).collect();

    let mut gate = Gate::new(slides, assets.len(), surface.clone());
    let (tx, mut rx) = mpsc::channel::<GateEvent>(32);

    SlideshowLoop::new(Duration::from_millis(200), gate.stop_token()).spawn(tx.clone());
    run_preload(Arc::new(HalfFailingFetcher), assets, tx.clone());

    // Boucle d'événements : route les événements vers le gate jusqu'au
    // verrou ready, comme le ferait l'application
    let reveal_delay = Duration::from_millis(520);
    loop {
        let event = rx.recv().await.unwrap();
        let became_ready = match event {
            GateEvent::SlideTick => gate.on_slide_tick(),
            GateEvent::AssetResolved { uri, ok } => gate.on_asset_resolved(&uri, ok),
            GateEvent::RevealDue => {
                gate.on_reveal_due();
                break;
            }
        };
        if became_ready {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(reveal_delay).await;
                let _ = tx.send(GateEvent::RevealDue).await;
            });
        }
    }

    // Ready : progression forcée à 100, fondu lancé, bouton révélé
    assert!(gate.state().ready);
    let calls = surface.calls();
    assert!(calls.contains(&"pct:100".to_string()));
    assert!(calls.contains(&"fade".to_string()));
    assert!(calls.contains(&"reveal".to_string()));

    // Commit : front unique, diaporama arrêté
    let token = gate.stop_token();
    assert!(gate.commit_enter());
    assert!(token.is_cancelled());
    assert!(!gate.commit_enter());
    assert!(surface.calls().contains(&"hide".to_string()));
}
