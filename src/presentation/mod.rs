//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the OTP cells with ratatui and maps crossterm key
//! events onto the coordinator.

pub mod input;
pub mod ui;
pub mod widget;

pub use input::*;
pub use ui::*;
pub use widget::*;
