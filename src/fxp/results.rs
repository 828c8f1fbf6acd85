//! FXP result types
//!
//! Defines the stages of a transfer, the two sides, and the outcome returned
//! by the orchestrator.

use std::fmt;

use crate::error::FxpError;
use crate::protocol::Reply;

/// Which of the two control connections an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Server the file is read from (passive, RETR)
    Source,
    /// Server the file is written to (active, STOR)
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// Steps of an FXP transfer, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RequestingPassive,
    BindingActive,
    InitiatingStore,
    InitiatingRetrieve,
    AwaitingSourceCompletion,
    AwaitingDestinationCompletion,
}

impl Stage {
    /// The connection this stage talks to.
    pub fn side(self) -> Side {
        match self {
            Stage::RequestingPassive
            | Stage::InitiatingRetrieve
            | Stage::AwaitingSourceCompletion => Side::Source,
            Stage::BindingActive
            | Stage::InitiatingStore
            | Stage::AwaitingDestinationCompletion => Side::Destination,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RequestingPassive => "requesting passive address",
            Stage::BindingActive => "binding active address",
            Stage::InitiatingStore => "initiating store",
            Stage::InitiatingRetrieve => "initiating retrieve",
            Stage::AwaitingSourceCompletion => "awaiting source completion",
            Stage::AwaitingDestinationCompletion => "awaiting destination completion",
        };
        write!(f, "{}", name)
    }
}

/// Result of one FXP transfer.
#[derive(Debug)]
pub enum TransferOutcome {
    /// Both sides reported 226; carries the destination's completion reply.
    Completed(Reply),
    Failed(FxpError),
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed(_))
    }

    pub fn error(&self) -> Option<&FxpError> {
        match self {
            TransferOutcome::Completed(_) => None,
            TransferOutcome::Failed(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<Reply, FxpError> {
        match self {
            TransferOutcome::Completed(reply) => Ok(reply),
            TransferOutcome::Failed(err) => Err(err),
        }
    }
}

impl From<Result<Reply, FxpError>> for TransferOutcome {
    fn from(result: Result<Reply, FxpError>) -> Self {
        match result {
            Ok(reply) => TransferOutcome::Completed(reply),
            Err(err) => TransferOutcome::Failed(err),
        }
    }
}
