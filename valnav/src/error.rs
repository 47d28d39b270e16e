//! Types d'erreurs pour valnav

/// Erreurs de la navigation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Type Result spécialisé pour valnav
pub type Result<T> = std::result::Result<T, Error>;
