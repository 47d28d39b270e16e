//! Extension de valconfig pour les playlists

use valmedia::Track;

use crate::playlist::Playlist;
use crate::{Error, Result};

/// Trait d'extension pour valconfig::Config
pub trait PlaylistConfigExt {
    /// Construit la playlist normale depuis `player.normal_playlist`
    fn normal_playlist(&self) -> Result<Playlist>;

    /// Construit le morceau du prompt depuis `player.prompt_track`
    fn prompt_track(&self) -> Result<Track>;
}

impl PlaylistConfigExt for valconfig::Config {
    fn normal_playlist(&self) -> Result<Playlist> {
        let value = self
            .get_value(&["player", "normal_playlist"])
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let tracks: Vec<Track> = serde_yaml::from_value(value)
            .map_err(|e| Error::ConfigError(format!("Invalid normal_playlist: {e}")))?;
        Playlist::new(tracks)
    }

    fn prompt_track(&self) -> Result<Track> {
        let value = self
            .get_value(&["player", "prompt_track"])
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        serde_yaml::from_value(value)
            .map_err(|e| Error::ConfigError(format!("Invalid prompt_track: {e}")))
    }
}
