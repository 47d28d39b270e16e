//! Extension de valconfig pour l'écran de chargement

use std::time::Duration;

use serde_yaml::Value;

/// Réglages du gate, figés au démarrage.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub slide_count: usize,
    pub slide_interval: Duration,
    pub reveal_delay: Duration,
    pub slide_template: String,
}

/// Trait d'extension pour valconfig::Config
pub trait GateConfigExt {
    /// Réglages du gate (cadence du diaporama, délai de révélation)
    fn gate_settings(&self) -> GateSettings;

    /// Références des images du diaporama, générées depuis le gabarit
    /// (`{n}` remplacé par 1..slide_count)
    fn slide_refs(&self) -> Vec<String>;

    /// Lot complet de préchargement : les images du diaporama plus les
    /// ressources listées dans `preload.assets`
    fn preload_assets(&self) -> Vec<String>;
}

impl GateConfigExt for valconfig::Config {
    fn gate_settings(&self) -> GateSettings {
        GateSettings {
            slide_count: self.get_slide_count(),
            slide_interval: Duration::from_millis(self.get_slide_interval_ms()),
            reveal_delay: Duration::from_millis(self.get_reveal_delay_ms()),
            slide_template: self.get_slide_template(),
        }
    }

    fn slide_refs(&self) -> Vec<String> {
        let settings = self.gate_settings();
        (1..=settings.slide_count)
            .map(|n| settings.slide_template.replace("{n}", &n.to_string()))
            .collect()
    }

    fn preload_assets(&self) -> Vec<String> {
        let mut assets = self.slide_refs();
        if let Ok(Value::Sequence(seq)) = self.get_value(&["preload", "assets"]) {
            assets.extend(seq.into_iter().filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            }));
        }
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> (tempfile::TempDir, valconfig::Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = valconfig::Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_slide_refs_follow_template() {
        let (_dir, config) = config();
        let refs = config.slide_refs();
        assert_eq!(refs.len(), 10);
        assert_eq!(refs[0], "assets/images/load1.jpg");
        assert_eq!(refs[9], "assets/images/load10.jpg");
    }

    #[test]
    fn test_preload_batch_includes_slides_and_listed_assets() {
        let (_dir, config) = config();
        let assets = config.preload_assets();
        // 10 images de diaporama + 9 ressources listées
        assert_eq!(assets.len(), 19);
        assert!(assets.contains(&"assets/images/us.jpg".to_string()));
        assert!(assets.contains(&"assets/audio/someday.mp3".to_string()));
    }

    #[test]
    fn test_gate_settings_from_defaults() {
        let (_dir, config) = config();
        let settings = config.gate_settings();
        assert_eq!(settings.slide_interval, Duration::from_millis(200));
        assert_eq!(settings.reveal_delay, Duration::from_millis(520));
    }
}
