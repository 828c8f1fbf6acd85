//! Error handling
//!
//! Defines error types and handling for the FXP client.

pub mod handlers;
pub mod types;

pub use types::*;
