use std::path::PathBuf;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode record '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine project directories")]
    NoProjectDirs,

    #[error("A study session is already running")]
    SessionActive,

    #[error("No study session is running")]
    NoActiveSession,

    #[error("Could not spawn monitoring worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Monitoring worker panicked")]
    WorkerPanicked,

    #[error("Process {pid} not found")]
    ProcessNotFound { pid: u32 },

    #[error("Process {pid} refused to terminate")]
    TerminationRefused { pid: u32 },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
