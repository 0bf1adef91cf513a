use crate::domain::{OtpError, OtpResult};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "otpfield=info";

/// Sends tracing output to `log_file`, appending.
///
/// The terminal is owned by the UI, so nothing is ever logged to stdout or
/// stderr. `RUST_LOG` overrides the default filter.
pub fn init_tracing(log_file: &Path) -> OtpResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| OtpError::Logging(e.to_string()))
}
