//! Types d'erreurs pour valmedia

/// Erreurs du contrôleur de lecture
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Le backend a refusé de démarrer la lecture (politique d'autoplay).
    /// Toujours avalée par les appelants, jamais montrée à l'utilisateur.
    #[error("Playback start rejected: {0}")]
    PlaybackRejected(String),

    #[error("Media transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour valmedia
pub type Result<T> = std::result::Result<T, Error>;
