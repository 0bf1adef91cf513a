//! Application layer: the OTP cell component, its handles and the
//! coordinator that drives a row of cells.

pub mod cell;
pub mod coordinator;
pub mod handles;
pub mod state;

pub use cell::*;
pub use coordinator::*;
pub use handles::*;
pub use state::*;
