//! Module `commands`
//!
//! Defines the FTP commands the FXP client sends and how each one is written
//! to the control connection.

use std::fmt;

use crate::error::ChannelError;
use crate::probe::DupeCheckMode;
use crate::utils::validation::is_valid_argument;

/// Representation type set with `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Ascii,
    Image,
}

impl TransferType {
    fn code(self) -> &'static str {
        match self {
            TransferType::Ascii => "A",
            TransferType::Image => "I",
        }
    }
}

/// A command sent on a control connection.
///
/// Commands that take arguments store them as `String` variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    USER(String),
    PASS(String),
    TYPE(TransferType),
    PASV,
    PORT(String), // Six comma-separated tokens, sent verbatim
    STOR(String),
    RETR(String),
    ABOR,
    FEAT,
    XDUPE(Option<DupeCheckMode>), // SITE XDUPE, query when no mode is given
    STAT(Option<String>),         // STAT -l, optionally scoped to a path
    NOOP,
    QUIT,
}

impl Command {
    /// Returns the command line to put on the wire, without the trailing CRLF.
    ///
    /// Fails if an argument is empty or would break the line framing.
    pub fn to_line(&self) -> Result<String, ChannelError> {
        if let Some(arg) = self.argument() {
            if !is_valid_argument(arg) {
                return Err(ChannelError::InvalidArgument(arg.to_string()));
            }
        }
        Ok(self.to_string())
    }

    /// Form of the command safe to write to logs.
    pub fn masked(&self) -> String {
        match self {
            Command::PASS(_) => "PASS ****".to_string(),
            other => other.to_string(),
        }
    }

    fn argument(&self) -> Option<&str> {
        match self {
            Command::USER(arg)
            | Command::PASS(arg)
            | Command::PORT(arg)
            | Command::STOR(arg)
            | Command::RETR(arg) => Some(arg),
            Command::STAT(Some(path)) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(name) => write!(f, "USER {}", name),
            Command::PASS(password) => write!(f, "PASS {}", password),
            Command::TYPE(kind) => write!(f, "TYPE {}", kind.code()),
            Command::PASV => write!(f, "PASV"),
            Command::PORT(tokens) => write!(f, "PORT {}", tokens),
            Command::STOR(path) => write!(f, "STOR {}", path),
            Command::RETR(path) => write!(f, "RETR {}", path),
            Command::ABOR => write!(f, "ABOR"),
            Command::FEAT => write!(f, "FEAT"),
            Command::XDUPE(None) => write!(f, "SITE XDUPE"),
            Command::XDUPE(Some(mode)) => write!(f, "SITE XDUPE {}", mode.value()),
            Command::STAT(None) => write!(f, "STAT -l"),
            Command::STAT(Some(path)) => write!(f, "STAT -l {}", path),
            Command::NOOP => write!(f, "NOOP"),
            Command::QUIT => write!(f, "QUIT"),
        }
    }
}
