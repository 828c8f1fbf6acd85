//! FTP protocol model
//!
//! Client-side command vocabulary, reply parsing and reply codes.

pub mod commands;
pub mod reply;
pub mod responses;

pub use commands::{Command, TransferType};
pub use reply::{Reply, read_reply};
