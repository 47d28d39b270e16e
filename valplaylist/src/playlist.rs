//! Playlist : séquence ordonnée de morceaux, figée au démarrage

use valmedia::Track;

use crate::{Error, Result};

/// Une liste de lecture ordonnée.
///
/// Le contenu est fixé à la construction ; seule la machine de mode
/// navigue dedans, toujours modulo la longueur.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Construit une playlist. Refuse une liste vide : l'index courant
    /// doit toujours être valide.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Nombre de morceaux
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Récupère un morceau par index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Ramène un index signé dans `[0, len)` par arithmétique modulaire.
    ///
    /// `wrap(-1)` donne le dernier morceau, `wrap(len)` le premier.
    pub fn wrap(&self, index: i64) -> usize {
        let len = self.tracks.len() as i64;
        (((index % len) + len) % len) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: usize) -> Track {
        Track {
            artist: format!("artist-{n}"),
            title: format!("title-{n}"),
            media: format!("media-{n}"),
            art: format!("art-{n}"),
        }
    }

    #[test]
    fn test_empty_playlist_rejected() {
        assert!(matches!(Playlist::new(vec![]), Err(Error::EmptyPlaylist)));
    }

    #[test]
    fn test_wrap_arithmetic() {
        let playlist = Playlist::new(vec![track(0), track(1), track(2)]).unwrap();
        assert_eq!(playlist.wrap(0), 0);
        assert_eq!(playlist.wrap(2), 2);
        assert_eq!(playlist.wrap(3), 0);
        assert_eq!(playlist.wrap(-1), 2);
        assert_eq!(playlist.wrap(-4), 2);
        assert_eq!(playlist.wrap(7), 1);
    }
}
