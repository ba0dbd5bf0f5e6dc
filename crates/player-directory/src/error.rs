use thiserror::Error;

use specula::SpecError;

/// Errors raised by the player directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("failed to parse directory config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("failed to read directory config '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no player with id {0}")]
    UnknownPlayer(u64),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
