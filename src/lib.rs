//! RAX FXP
//!
//! Coordinates server-to-server (FXP) file transfers between two FTP servers.
//! The file data flows directly between the servers; this crate only drives
//! their control connections.

pub mod client;
pub mod config;
pub mod error;
pub mod fxp;
pub mod probe;
pub mod protocol;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::ControlConnection;
pub use fxp::{FxpOrchestrator, TransferOutcome};
