//! Application state for the terminal OTP entry.
//!
//! This module holds the coordinator together with the modes and status
//! messages of the terminal host.

use super::coordinator::OtpEntry;
use crate::domain::OtpResult;
use tracing::{info, warn};

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted and which popups are
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keys go to the focused OTP cell
    Entry,
    /// Help screen is displayed
    Help,
}

/// Main application state containing the OTP entry and UI state.
///
/// # Examples
///
/// ```
/// use otpfield::application::{App, AppMode, CellOptions, OtpEntry};
/// use otpfield::domain::StyleSet;
///
/// let app = App::new(OtpEntry::new(6, CellOptions::default(), StyleSet::default()));
/// assert_eq!(app.mode, AppMode::Entry);
/// assert_eq!(app.entry.len(), 6);
/// ```
#[derive(Debug)]
pub struct App {
    /// The row of OTP cells
    pub entry: OtpEntry,
    /// Current application mode
    pub mode: AppMode,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Last code submitted with Enter
    pub submitted: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl App {
    pub fn new(entry: OtpEntry) -> Self {
        Self {
            entry,
            mode: AppMode::Entry,
            status_message: None,
            submitted: None,
            help_scroll: 0,
        }
    }

    /// Submits the entered code if every cell is filled.
    ///
    /// Sets a status message either way; an incomplete code is not stored.
    pub fn submit(&mut self) {
        if self.entry.is_complete() {
            let code = self.entry.code();
            info!(len = code.chars().count(), "code submitted");
            self.status_message = Some(format!("Submitted {}", self.masked_code()));
            self.submitted = Some(code);
        } else {
            let filled = self.entry.values().iter().filter(|value| !value.is_empty()).count();
            self.status_message = Some(format!("Code incomplete: {} of {} cells", filled, self.entry.len()));
        }
    }

    /// Flips the error styling of every cell.
    pub fn toggle_error(&mut self) {
        let error = !self.entry.is_error();
        self.entry.set_error(error);
        self.status_message = Some(if error {
            "Error state on".to_string()
        } else {
            "Error state off".to_string()
        });
    }

    /// Empties every cell and forgets the submitted code.
    pub fn clear_entry(&mut self) {
        self.entry.clear();
        self.submitted = None;
        self.status_message = None;
    }

    /// Processes the result of reading the clipboard.
    ///
    /// # Arguments
    ///
    /// * `result` - Clipboard text, or the error that prevented reading it
    pub fn set_paste_result(&mut self, result: OtpResult<String>) {
        match result {
            Ok(text) => {
                let filled = self.entry.paste(&text);
                self.status_message = Some(format!("Pasted into {} cells", filled));
            }
            Err(error) => {
                warn!(%error, "paste failed");
                self.status_message = Some(format!("Paste failed: {}", error));
            }
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Entry;
    }

    /// Code as shown in status messages, masked for secure entry.
    pub fn masked_code(&self) -> String {
        self.entry
            .views()
            .into_iter()
            .filter(|view| !view.is_placeholder)
            .map(|view| view.text)
            .collect()
    }
}
