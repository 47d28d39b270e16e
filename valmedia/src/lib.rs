//! # valmedia - Contrôleur de lecture et capacités média
//!
//! Cette crate définit la frontière avec la capacité média externe :
//! - [`MediaTransport`] : lecture/pause/seek d'une ressource référencée
//! - [`MediaEvent`] : notifications asynchrones du média (position, fin,
//!   métadonnées connues)
//! - [`PlayerSurface`] : effets d'affichage du lecteur
//! - [`PlaybackController`] : l'unique propriétaire du média actif
//!
//! Les couches hautes ne parlent jamais directement au backend média :
//! tout passe par le contrôleur, qui applique la politique de la page,
//! où les démarrages de lecture refusés sont avalés sans erreur visible.
//!
//! # Exemple
//!
//! ```no_run
//! use std::sync::Arc;
//! use valmedia::{MediaTransport, PlaybackController, PlayerSurface, Track};
//!
//! # fn demo(transport: Arc<dyn MediaTransport>, surface: Arc<dyn PlayerSurface>) {
//! let mut controller = PlaybackController::new(transport, surface);
//! let track = Track {
//!     artist: "keshi".into(),
//!     title: "War With Heaven".into(),
//!     media: "assets/audio/war_with_heaven.mp3".into(),
//!     art: "assets/images/war_with_heaven.jpg".into(),
//! };
//! controller.set_track(&track);
//! let _ = controller.play(); // un refus reste silencieux
//! # }
//! ```

mod capabilities;
mod controller;
mod error;
mod track;

// Réexports publics
pub use capabilities::{MediaEvent, MediaTransport, PlaybackPositionInfo, PlayerSurface};
pub use controller::PlaybackController;
pub use error::{Error, Result};
pub use track::Track;
