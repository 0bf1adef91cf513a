use std::path::PathBuf;

/// Errors raised outside the component itself.
///
/// Rendering and event handling in the cell are infallible; only the host
/// concerns (configuration, logging, clipboard, terminal) can fail.
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type OtpResult<T> = Result<T, OtpError>;
