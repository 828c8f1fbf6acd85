//! Transfer initiation
//!
//! Switches a connection to binary mode and issues STOR or RETR. A 1xx reply
//! acknowledges that the transfer started; a 2xx reply means the server has
//! already finished it and no further status will follow.

use log::info;

use crate::client::{ControlConnection, ControlStream};
use crate::error::FxpErrorKind;
use crate::protocol::{Command, Reply, TransferType};

/// Starts the receiving half of the transfer on the destination.
///
/// Must run before [`initiate_retrieve`] so the destination is ready when the
/// source starts sending.
pub async fn initiate_store<S: ControlStream>(
    destination: &ControlConnection<S>,
    path: &str,
) -> Result<Reply, FxpErrorKind> {
    initiate(destination, Command::STOR(path.to_string())).await
}

/// Starts the sending half of the transfer on the source.
pub async fn initiate_retrieve<S: ControlStream>(
    source: &ControlConnection<S>,
    path: &str,
) -> Result<Reply, FxpErrorKind> {
    initiate(source, Command::RETR(path.to_string())).await
}

async fn initiate<S: ControlStream>(
    connection: &ControlConnection<S>,
    command: Command,
) -> Result<Reply, FxpErrorKind> {
    // TYPE and the transfer command go out under one lock.
    let mut session = connection.lock().await;

    let reply = session.send(&Command::TYPE(TransferType::Image)).await?;
    if !reply.is_success() {
        return Err(FxpErrorKind::TransferStart(reply));
    }

    let reply = session.send(&command).await?;
    if !(reply.is_preliminary() || reply.is_success()) {
        return Err(FxpErrorKind::TransferStart(reply));
    }

    info!("{} started {}: {}", connection.label(), command, reply.message());
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Step, entries, journal, scripted_connection};

    #[tokio::test]
    async fn test_store_sets_binary_type_first() {
        let log = journal();
        let (destination, _server) = scripted_connection(
            "destination",
            vec![
                Step::Reply("200 Switching to Binary mode."),
                Step::Reply("150 Ok to send data."),
            ],
            &log,
        )
        .await;

        let reply = initiate_store(&destination, "/incoming/file.bin").await.unwrap();
        assert_eq!(reply.code(), 150);
        assert_eq!(
            entries(&log),
            vec!["destination: TYPE I", "destination: STOR /incoming/file.bin"]
        );
        assert_eq!(destination.transfer_type().await, Some(TransferType::Image));
    }

    #[tokio::test]
    async fn test_retrieve_rejected() {
        let log = journal();
        let (source, _server) = scripted_connection(
            "source",
            vec![
                Step::Reply("200 Type set to I"),
                Step::Reply("550 Failed to open file."),
            ],
            &log,
        )
        .await;

        match initiate_retrieve(&source, "missing.bin").await {
            Err(FxpErrorKind::TransferStart(reply)) => assert_eq!(reply.code(), 550),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_type_rejected_skips_transfer_command() {
        let log = journal();
        let (source, _server) = scripted_connection(
            "source",
            vec![Step::Reply("504 Command not implemented")],
            &log,
        )
        .await;

        match initiate_retrieve(&source, "file.bin").await {
            Err(FxpErrorKind::TransferStart(reply)) => assert_eq!(reply.code(), 504),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(entries(&log), vec!["source: TYPE I"]);
    }

    #[tokio::test]
    async fn test_start_acknowledged_with_2xx() {
        let log = journal();
        let (source, _server) = scripted_connection(
            "source",
            vec![
                Step::Reply("200 Type set to I"),
                Step::Reply("250 Transfer starting"),
            ],
            &log,
        )
        .await;

        assert_eq!(initiate_retrieve(&source, "file.bin").await.unwrap().code(), 250);
    }
}
