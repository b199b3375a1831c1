use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to determine config directory")]
    ConfigDirResolution,

    #[error("Failed to create preferences directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read preferences file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write preferences file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode preferences from '{0}'")]
    Decode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode preferences")]
    Encode(#[source] Box<bincode::error::EncodeError>),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
