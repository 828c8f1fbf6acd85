//! Error handlers
//!
//! Provides reporting for failed transfers.

use crate::error::types::{ChannelError, FxpError, FxpErrorKind};
use log::error;

/// Log a failed FXP transfer, including the raw server reply when there is one.
pub fn handle_error(err: &FxpError) {
    error!("FXP transfer error: {}", err);

    if let Some(reply) = err.reply() {
        for line in reply.lines() {
            error!("  {} said: {}", err.side, line);
        }
    }
}

/// Convert a transfer error to a process exit code
pub fn exit_code(err: &FxpError) -> i32 {
    match err.kind {
        FxpErrorKind::Negotiation(_) => 3,
        FxpErrorKind::AddressParse { .. } => 4,
        FxpErrorKind::TransferStart(_) => 5,
        FxpErrorKind::Completion(_) => 6,
        FxpErrorKind::Channel(ChannelError::ConnectionClosed) => 7,
        FxpErrorKind::Channel(_) => 8,
    }
}
