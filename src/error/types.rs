//! Error types
//!
//! Defines the error types for the control connection, the passive address
//! parser and the FXP orchestration steps.

use std::fmt;
use std::io;

use crate::fxp::{Side, Stage};
use crate::protocol::Reply;

/// Control connection errors
#[derive(Debug)]
pub enum ChannelError {
    IoError(io::Error),
    ConnectionClosed,
    MalformedReply(String),
    InvalidArgument(String),
    UnexpectedReply(Reply),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::IoError(e) => write!(f, "I/O error: {}", e),
            ChannelError::ConnectionClosed => write!(f, "Connection closed by server"),
            ChannelError::MalformedReply(line) => write!(f, "Malformed reply: {}", line),
            ChannelError::InvalidArgument(arg) => write!(f, "Invalid command argument: {:?}", arg),
            ChannelError::UnexpectedReply(reply) => write!(f, "Unexpected reply: {}", reply),
        }
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChannelError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ChannelError {
    fn from(error: io::Error) -> Self {
        ChannelError::IoError(error)
    }
}

/// Reasons a passive-mode reply could not be turned into an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    MissingGroup,
    TokenCount(usize),
    InvalidOctet(String),
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::MissingGroup => write!(f, "No parenthesized address group"),
            AddressParseError::TokenCount(n) => {
                write!(f, "Expected 6 address tokens, found {}", n)
            }
            AddressParseError::InvalidOctet(token) => write!(f, "Invalid octet: {:?}", token),
        }
    }
}

impl std::error::Error for AddressParseError {}

/// What went wrong during one step of an FXP transfer
#[derive(Debug)]
pub enum FxpErrorKind {
    /// PASV or PORT returned a non-success status
    Negotiation(Reply),
    /// The PASV reply did not carry a usable address tuple
    AddressParse {
        reply: Reply,
        reason: AddressParseError,
    },
    /// TYPE, STOR or RETR did not acknowledge the start of the transfer
    TransferStart(Reply),
    /// The final status of the transfer was not 226
    Completion(Reply),
    Channel(ChannelError),
}

impl FxpErrorKind {
    /// Returns the server reply behind this error, if there was one.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            FxpErrorKind::Negotiation(reply)
            | FxpErrorKind::AddressParse { reply, .. }
            | FxpErrorKind::TransferStart(reply)
            | FxpErrorKind::Completion(reply) => Some(reply),
            FxpErrorKind::Channel(ChannelError::UnexpectedReply(reply)) => Some(reply),
            FxpErrorKind::Channel(_) => None,
        }
    }
}

impl fmt::Display for FxpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxpErrorKind::Negotiation(reply) => write!(f, "Negotiation failed: {}", reply),
            FxpErrorKind::AddressParse { reply, reason } => {
                write!(f, "Address parse failed ({}): {}", reason, reply)
            }
            FxpErrorKind::TransferStart(reply) => write!(f, "Transfer did not start: {}", reply),
            FxpErrorKind::Completion(reply) => write!(f, "Transfer did not complete: {}", reply),
            FxpErrorKind::Channel(e) => write!(f, "Channel error: {}", e),
        }
    }
}

impl From<ChannelError> for FxpErrorKind {
    fn from(error: ChannelError) -> Self {
        FxpErrorKind::Channel(error)
    }
}

/// A failed FXP transfer: the stage it stopped in, the offending side and the cause
#[derive(Debug)]
pub struct FxpError {
    pub stage: Stage,
    pub side: Side,
    pub kind: FxpErrorKind,
}

impl FxpError {
    pub fn new(stage: Stage, side: Side, kind: FxpErrorKind) -> Self {
        Self { stage, side, kind }
    }

    pub fn reply(&self) -> Option<&Reply> {
        self.kind.reply()
    }
}

impl fmt::Display for FxpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed on {}: {}", self.stage, self.side, self.kind)
    }
}

impl std::error::Error for FxpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FxpErrorKind::AddressParse { reason, .. } => Some(reason),
            FxpErrorKind::Channel(e) => Some(e),
            _ => None,
        }
    }
}
