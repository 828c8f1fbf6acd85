//! Scripted FTP servers over in-memory pipes, for unit tests.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::task::JoinHandle;

use crate::client::ControlConnection;

/// Commands received by scripted servers, in arrival order, as `"<label>: <line>"`.
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) enum Step {
    /// Read one command line, then answer with this reply text.
    Reply(&'static str),
    /// Write this reply text without waiting for a command.
    Push(&'static str),
}

pub(crate) fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Starts a server that greets, plays `steps`, then answers anything else with 500.
pub(crate) fn spawn_server(
    label: &'static str,
    steps: Vec<Step>,
    journal: &Journal,
) -> (DuplexStream, JoinHandle<()>) {
    let (client, server) = tokio::io::duplex(8192);
    let journal = Arc::clone(journal);

    let handle = tokio::spawn(async move {
        let mut reader = BufReader::new(server);
        if write_reply(&mut reader, "220 Scripted server ready").await.is_err() {
            return;
        }

        for step in steps {
            let text = match step {
                Step::Reply(text) => {
                    if !record_command(&mut reader, label, &journal).await {
                        return;
                    }
                    text
                }
                Step::Push(text) => text,
            };
            if write_reply(&mut reader, text).await.is_err() {
                return;
            }
        }

        while record_command(&mut reader, label, &journal).await {
            if write_reply(&mut reader, "500 Unexpected command").await.is_err() {
                return;
            }
        }
    });

    (client, handle)
}

/// Starts a scripted server and opens a control connection to it.
pub(crate) async fn scripted_connection(
    label: &'static str,
    steps: Vec<Step>,
    journal: &Journal,
) -> (ControlConnection<DuplexStream>, JoinHandle<()>) {
    let (stream, handle) = spawn_server(label, steps, journal);
    let connection = ControlConnection::open(stream, label).await.unwrap();
    (connection, handle)
}

async fn record_command(
    reader: &mut BufReader<DuplexStream>,
    label: &str,
    journal: &Journal,
) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) | Err(_) => false,
        Ok(_) => {
            journal
                .lock()
                .unwrap()
                .push(format!("{}: {}", label, line.trim_end()));
            true
        }
    }
}

async fn write_reply(reader: &mut BufReader<DuplexStream>, text: &str) -> std::io::Result<()> {
    let stream = reader.get_mut();
    stream.write_all(text.as_bytes()).await?;
    stream.write_all(b"\r\n").await?;
    stream.flush().await
}
