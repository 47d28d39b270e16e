//! Types d'erreurs pour valplaylist

/// Erreurs de construction des playlists
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour valplaylist
pub type Result<T> = std::result::Result<T, Error>;
