//! Types d'erreurs pour valgate

/// Erreurs du gate de chargement
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Asset fetch failed: {0}")]
    FetchFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour valgate
pub type Result<T> = std::result::Result<T, Error>;
