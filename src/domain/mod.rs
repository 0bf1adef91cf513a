//! Domain layer: styles, platform rules and errors.

pub mod errors;
pub mod models;
pub mod platform;
pub mod services;

pub use errors::*;
pub use models::*;
pub use platform::{OsFamily, Platform, PlatformTraits};
pub use services::*;
