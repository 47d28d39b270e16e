//! DotNav : marquage du point actif et demandes de défilement

use std::sync::Arc;

use tracing::debug;

use crate::{Error, Result};

/// Effets d'affichage de la navigation par points.
pub trait NavSurface: Send + Sync {
    /// Marque actif le point d'index donné (et lui seul).
    fn set_active_dot(&self, index: usize);

    /// Demande un défilement doux vers une section.
    fn scroll_to(&self, section: &str);

    /// Montre ou cache la barre de navigation (cachée pendant le gate).
    fn set_nav_hidden(&self, hidden: bool);
}

/// État du scroll-spy.
///
/// L'observateur de visibilité est la seule source de vérité du point
/// actif : les clics ne font que demander le défilement, le marquage
/// suivra quand la section cible sera rapportée visible.
pub struct DotNav {
    sections: Vec<String>,
    active: Option<usize>,
    surface: Arc<dyn NavSurface>,
}

impl DotNav {
    /// Construit la navigation, cachée tant que le gate est affiché.
    pub fn new(sections: Vec<String>, surface: Arc<dyn NavSurface>) -> Self {
        surface.set_nav_hidden(true);
        Self {
            sections,
            active: None,
            surface,
        }
    }

    /// Notification de l'observateur : une section est devenue visible.
    ///
    /// Les sections inconnues sont ignorées (observateur et configuration
    /// peuvent diverger le temps d'un rechargement).
    pub fn on_section_visible(&mut self, section: &str) {
        let Some(index) = self.sections.iter().position(|s| s == section) else {
            debug!(section, "Visibility report for an unknown section");
            return;
        };
        if self.active == Some(index) {
            return;
        }
        self.active = Some(index);
        self.surface.set_active_dot(index);
    }

    /// Clic sur un point : demande le défilement vers sa cible.
    ///
    /// Ne touche pas au point actif : la notification de visibilité
    /// arrivera d'elle-même une fois le défilement terminé.
    pub fn request_scroll(&self, dot_index: usize) -> Result<()> {
        let section = self
            .sections
            .get(dot_index)
            .ok_or_else(|| Error::UnknownSection(format!("dot {dot_index}")))?;
        self.surface.scroll_to(section);
        Ok(())
    }

    /// Demande le défilement vers une section nommée.
    pub fn request_scroll_to(&self, section: &str) -> Result<()> {
        if !self.sections.iter().any(|s| s == section) {
            return Err(Error::UnknownSection(section.to_string()));
        }
        self.surface.scroll_to(section);
        Ok(())
    }

    /// Révèle la barre de navigation (au commit d'entrée).
    pub fn reveal(&self) {
        self.surface.set_nav_hidden(false);
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
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

    impl NavSurface for TestSurface {
        fn set_active_dot(&self, index: usize) {
            self.calls.lock().unwrap().push(format!("active:{index}"));
        }
        fn scroll_to(&self, section: &str) {
            self.calls.lock().unwrap().push(format!("scroll:{section}"));
        }
        fn set_nav_hidden(&self, hidden: bool) {
            self.calls.lock().unwrap().push(format!("hidden:{hidden}"));
        }
    }

    fn nav() -> (Arc<TestSurface>, DotNav) {
        let surface = Arc::new(TestSurface::default());
        let sections = ["hero", "story", "music", "question"]
            .into_iter()
            .map(String::from)
            .collect();
        let nav = DotNav::new(sections, surface.clone());
        (surface, nav)
    }

    #[test]
    fn test_visibility_moves_active_dot() {
        let (surface, mut nav) = nav();
        nav.on_section_visible("story");
        nav.on_section_visible("music");

        assert_eq!(nav.active(), Some(2));
        assert_eq!(
            surface.calls(),
            vec!["hidden:true", "active:1", "active:2"]
        );
    }

    #[test]
    fn test_repeated_visibility_is_quiet() {
        let (surface, mut nav) = nav();
        nav.on_section_visible("story");
        nav.on_section_visible("story");
        assert_eq!(
            surface.calls().iter().filter(|c| *c == "active:1").count(),
            1
        );
    }

    #[test]
    fn test_unknown_section_ignored() {
        let (_surface, mut nav) = nav();
        nav.on_section_visible("footer");
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn test_scroll_request_does_not_change_active() {
        let (surface, mut nav) = nav();
        nav.on_section_visible("hero");

        nav.request_scroll(3).unwrap();

        // Le défilement est demandé, le marquage n'a pas bougé
        assert_eq!(nav.active(), Some(0));
        assert!(surface.calls().contains(&"scroll:question".to_string()));
        assert!(!surface.calls().contains(&"active:3".to_string()));
    }

    #[test]
    fn test_scroll_to_unknown_target_errors() {
        let (_surface, nav) = nav();
        assert!(nav.request_scroll(9).is_err());
        assert!(nav.request_scroll_to("footer").is_err());
    }

    #[test]
    fn test_reveal_shows_nav() {
        let (surface, nav) = nav();
        nav.reveal();
        assert_eq!(surface.calls(), vec!["hidden:true", "hidden:false"]);
    }
}
