//! # valplaylist - Playlists et machine à états de mode
//!
//! Cette crate possède les deux listes de lecture de la présentation et
//! la machine à états qui choisit laquelle est active :
//! - **Normal(i)** : la playlist principale, avec index courant et
//!   avance automatique en fin de morceau
//! - **Prompt** : le morceau unique du prompt, en boucle inéluctable
//!
//! L'entrée en mode prompt capture une seule fois la position de lecture
//! courante ; la sortie la consomme et la restaure (bornée à la durée du
//! morceau). Toutes les tentatives de lecture après transition sont
//! lancées puis oubliées : un refus du backend laisse l'état en pause
//! sans erreur visible.
//!
//! # Exemple
//!
//! ```no_run
//! use valplaylist::{ModeMachine, PlaylistConfigExt};
//!
//! # fn demo(controller: valmedia::PlaybackController) -> valplaylist::Result<()> {
//! let config = valconfig::get_config();
//! let normal = config.normal_playlist()?;
//! let prompt = config.prompt_track()?;
//!
//! let mut machine = ModeMachine::new(normal, prompt, controller);
//! machine.start_from_top();   // commit du gate : piste 1, lecture
//! machine.enter_prompt();     // réponse "no"
//! machine.exit_prompt_and_commit(); // réponse "yes"
//! # Ok(())
//! # }
//! ```

mod config_ext;
mod error;
mod mode;
mod playlist;

// Réexports publics
pub use config_ext::PlaylistConfigExt;
pub use error::{Error, Result};
pub use mode::{Mode, ModeMachine, SavedPosition};
pub use playlist::Playlist;
