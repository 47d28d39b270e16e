//! # valgate - Écran de chargement et verrou de révélation
//!
//! Cette crate coordonne les deux flux de progression de l'écran de
//! chargement :
//! - un **diaporama** cyclé à intervalle fixe, dont seul le premier tour
//!   compte dans la progression (le cyclage continue ensuite, purement
//!   cosmétique, jusqu'à l'entrée)
//! - un **préchargement** de ressources, toutes résolues en parallèle,
//!   où un échec compte comme une résolution (l'expérience ne doit pas
//!   rester bloquée sur une image en 404)
//!
//! Les deux progressions sont moyennées et plafonnées à 0.999 jusqu'au
//! verrou `ready` : l'affichage ne montre jamais 100% avant lui. Les
//! transitions à tir unique (ready, révélation du bouton, entrée) sont
//! chacune gardées par un drapeau d'idempotence.
//!
//! # Architecture
//!
//! - **ReadinessState** : l'état pur, testable, avec la formule de mélange
//! - **Gate** : le coordinateur, transitions synchrones appelées par la
//!   boucle d'événements
//! - **SlideshowLoop / run_preload** : les tâches qui alimentent le Gate
//!   en événements ; le diaporama est la seule ressource annulable,
//!   arrêtée exactement une fois au commit d'entrée

mod config_ext;
mod error;
mod gate;
mod preload;
mod readiness;
mod slideshow;

// Réexports publics
pub use config_ext::{GateConfigExt, GateSettings};
pub use error::{Error, Result};
pub use gate::{Gate, GateEvent, GateSurface};
pub use preload::{run_preload, AssetFetcher, ProbeFetcher};
pub use readiness::ReadinessState;
pub use slideshow::SlideshowLoop;
