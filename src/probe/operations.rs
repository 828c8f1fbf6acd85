//! Probe operations
//!
//! Single round trips whose replies are handed back to the caller as-is.

use log::debug;

use crate::client::{ControlConnection, ControlStream};
use crate::error::ChannelError;
use crate::probe::modes::DupeCheckMode;
use crate::protocol::{Command, Reply};

/// Lists the extensions the server supports (`FEAT`).
pub async fn probe_features<S: ControlStream>(
    connection: &ControlConnection<S>,
) -> Result<Reply, ChannelError> {
    connection.send(&Command::FEAT).await
}

/// Sets the extended dupe checking mode, or queries the current one when
/// `mode` is `None`.
pub async fn dupe_check_mode<S: ControlStream>(
    connection: &ControlConnection<S>,
    mode: Option<DupeCheckMode>,
) -> Result<Reply, ChannelError> {
    connection.send(&Command::XDUPE(mode)).await
}

/// Lists `path` (or the working directory) over the control connection with
/// `STAT -l`, avoiding a data connection.
pub async fn fast_listing<S: ControlStream>(
    connection: &ControlConnection<S>,
    path: Option<&str>,
) -> Result<Reply, ChannelError> {
    connection
        .send(&Command::STAT(path.map(str::to_string)))
        .await
}

/// Checks whether `path` names a regular file, using [`fast_listing`].
pub async fn file_exists<S: ControlStream>(
    connection: &ControlConnection<S>,
    path: &str,
) -> Result<bool, ChannelError> {
    let reply = fast_listing(connection, Some(path)).await?;
    if !reply.is_success() {
        debug!("{} cannot list {}: {}", connection.label(), path, reply);
        return Ok(false);
    }

    let code = reply.code().to_string();
    let exists = reply
        .lines()
        .iter()
        .filter(|line| !line.starts_with(&code))
        .any(|entry| entry.trim_start().starts_with('-'));
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Step, entries, journal, scripted_connection};

    #[tokio::test]
    async fn test_probe_features_returns_raw_reply() {
        let log = journal();
        let (conn, _server) = scripted_connection(
            "source",
            vec![Step::Reply("211-Extensions supported:\r\n CPSV\r\n SSCN\r\n211 END")],
            &log,
        )
        .await;

        let reply = probe_features(&conn).await.unwrap();
        assert_eq!(reply.code(), 211);
        assert_eq!(reply.body(), &[" CPSV".to_string(), " SSCN".to_string()]);
        assert_eq!(entries(&log), vec!["source: FEAT"]);
    }

    #[tokio::test]
    async fn test_dupe_check_query_and_set() {
        let log = journal();
        let (conn, _server) = scripted_connection(
            "source",
            vec![
                Step::Reply("200 Extended dupe mode is 0"),
                Step::Reply("200 Activated extended dupe mode 2."),
            ],
            &log,
        )
        .await;

        let current = dupe_check_mode(&conn, None).await.unwrap();
        assert_eq!(current.message(), "Extended dupe mode is 0");
        let set = dupe_check_mode(&conn, Some(DupeCheckMode::OnePerLine)).await.unwrap();
        assert_eq!(set.code(), 200);
        assert_eq!(entries(&log), vec!["source: SITE XDUPE", "source: SITE XDUPE 2"]);
    }

    #[tokio::test]
    async fn test_fast_listing() {
        let log = journal();
        let (conn, _server) = scripted_connection(
            "source",
            vec![
                Step::Reply(
                    "213-Status follows:\r\n\
                     drwxr-xr-x 2 ftp ftp 4096 Jan 1 00:00 pub\r\n\
                     213 End of status",
                ),
                Step::Reply("213-Status follows:\r\n213 End of status"),
            ],
            &log,
        )
        .await;

        let listing = fast_listing(&conn, None).await.unwrap();
        assert_eq!(listing.body().len(), 1);
        fast_listing(&conn, Some("/pub")).await.unwrap();
        assert_eq!(entries(&log), vec!["source: STAT -l", "source: STAT -l /pub"]);
    }

    #[tokio::test]
    async fn test_file_exists() {
        let log = journal();
        let (conn, _server) = scripted_connection(
            "source",
            vec![
                Step::Reply(
                    "213-Status follows:\r\n\
                     -rw-r--r-- 1 ftp ftp 1048576 Jan 1 00:00 file.bin\r\n\
                     213 End of status",
                ),
                Step::Reply(
                    "213-Status follows:\r\n\
                     drwxr-xr-x 2 ftp ftp 4096 Jan 1 00:00 pub\r\n\
                     213 End of status",
                ),
                Step::Reply("450 No such file or directory"),
            ],
            &log,
        )
        .await;

        assert!(file_exists(&conn, "file.bin").await.unwrap());
        assert!(!file_exists(&conn, "pub").await.unwrap());
        assert!(!file_exists(&conn, "missing.bin").await.unwrap());
    }
}
