use std::io;
use std::time::Duration;

/// Errors that can occur during vaadin-runner operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scan error: {0}")]
    ScanError(String),

    #[error("Module error: {0}")]
    ModuleError(String),

    #[error("Failed to start '{program}': {source}")]
    ProcessStartError {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Process exited with status {0}")]
    ProcessExecutionError(i32),

    #[error("Process did not finish within {0:?}")]
    ProcessTimeoutError(Duration),

    #[error("Remote fetch failed: {0}")]
    RemoteFetchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for vaadin-runner operations
pub type Result<T> = std::result::Result<T, Error>;
