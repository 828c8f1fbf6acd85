//! Completion handling
//!
//! The final status of a transfer arrives on the control connection without
//! any further command being sent.

use log::{debug, info};

use crate::client::{ControlConnection, ControlStream};
use crate::error::{ChannelError, FxpErrorKind};
use crate::protocol::responses::{NO_TRANSFER_IN_PROGRESS, TRANSFER_ABORTED, TRANSFER_COMPLETE};
use crate::protocol::{Command, Reply};

/// Waits for the final status of the transfer running on `connection`.
///
/// Only 226 counts as success. Waits as long as it takes; callers that need a
/// deadline wrap this in their own timeout.
pub async fn await_completion<S: ControlStream>(
    connection: &ControlConnection<S>,
) -> Result<Reply, FxpErrorKind> {
    let reply = connection.read_reply().await?;
    check_completion(connection, reply)
}

/// Final status of a transfer that was acknowledged with `start`.
///
/// A 1xx start means the final status is still to come. Any other start reply
/// already is the final status, so nothing more is read.
pub async fn settle_completion<S: ControlStream>(
    connection: &ControlConnection<S>,
    start: Reply,
) -> Result<Reply, FxpErrorKind> {
    if start.is_preliminary() {
        return await_completion(connection).await;
    }
    check_completion(connection, start)
}

fn check_completion<S: ControlStream>(
    connection: &ControlConnection<S>,
    reply: Reply,
) -> Result<Reply, FxpErrorKind> {
    if reply.code() != TRANSFER_COMPLETE {
        return Err(FxpErrorKind::Completion(reply));
    }

    info!("{} finished: {}", connection.label(), reply.message());
    Ok(reply)
}

/// Aborts the transfer in flight on `connection`.
///
/// The transfer's own final reply is still owed when ABOR goes out. It is
/// either already queued (451, 226, ...) or sent in answer to the ABOR (426),
/// and the ABOR acknowledgement follows it. Both are consumed and the
/// acknowledgement is returned. A lone 225 means nothing was in flight.
pub async fn abort_transfer<S: ControlStream>(
    connection: &ControlConnection<S>,
) -> Result<Reply, ChannelError> {
    let mut session = connection.lock().await;

    let first = session.send(&Command::ABOR).await?;
    if first.code() == NO_TRANSFER_IN_PROGRESS {
        return Ok(first);
    }

    if first.code() == TRANSFER_ABORTED {
        debug!("{} interrupted transfer: {}", connection.label(), first);
    } else {
        debug!("{} transfer ended before abort: {}", connection.label(), first);
    }
    session.read_reply().await
}
