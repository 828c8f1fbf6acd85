//! Control connection client
//!
//! Handles the command/reply session with one FTP server.

pub mod connection;
pub mod state;

pub use connection::{CommandSession, ControlConnection, ControlStream};
pub use state::SessionState;
