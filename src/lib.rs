//! otpfield - One-Time Code Entry Library
//!
//! A single-character OTP input cell with focus-driven styling, the parent
//! coordinator that drives a row of cells, and a terminal host built on
//! ratatui.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
