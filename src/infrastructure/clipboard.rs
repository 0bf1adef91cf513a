use crate::domain::{OtpError, OtpResult};

pub struct ClipboardReader;

impl ClipboardReader {
    /// Reads the system clipboard as text.
    pub fn read_text() -> OtpResult<String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| OtpError::Clipboard(e.to_string()))?;
        clipboard.get_text().map_err(|e| OtpError::Clipboard(e.to_string()))
    }
}
