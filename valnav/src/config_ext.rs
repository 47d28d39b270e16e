//! Extension de valconfig pour la navigation

/// Réglages de la navigation, figés au démarrage.
#[derive(Debug, Clone)]
pub struct NavSettings {
    /// Sections navigables, dans l'ordre de la page.
    pub sections: Vec<String>,
    /// Seuil de visibilité transmis à l'observateur externe (part de la
    /// surface d'une section qui doit être à l'écran).
    pub visibility_threshold: f64,
}

/// Trait d'extension pour valconfig::Config
pub trait NavConfigExt {
    fn nav_settings(&self) -> NavSettings;
}

impl NavConfigExt for valconfig::Config {
    fn nav_settings(&self) -> NavSettings {
        NavSettings {
            sections: self.get_sections(),
            visibility_threshold: self.get_visibility_threshold(),
        }
    }
}
