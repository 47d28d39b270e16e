//! Track : un morceau référencé par la présentation

use serde::Deserialize;

/// Un morceau de la présentation.
///
/// Les champs `media` et `art` sont des références opaques (URI) résolues
/// par les capacités externes ; rien n'est décodé ici. Un `Track` est
/// immuable une fois construit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub artist: String,
    pub title: String,
    /// Référence de la ressource audio
    pub media: String,
    /// Référence de la pochette
    pub art: String,
}
