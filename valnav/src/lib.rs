//! # valnav - Navigation par points et scroll-spy
//!
//! Suivi de la section visible : l'observateur de visibilité externe
//! rapporte les sections suffisamment à l'écran, et exactement un point
//! de navigation est marqué actif en conséquence. Un clic sur un point
//! demande un défilement doux vers sa cible, sans toucher au marquage :
//! l'observateur reste la seule source de vérité, sa notification
//! arrivera après le défilement.

mod config_ext;
mod error;
mod nav;

// Réexports publics
pub use config_ext::{NavConfigExt, NavSettings};
pub use error::{Error, Result};
pub use nav::{DotNav, NavSurface};
