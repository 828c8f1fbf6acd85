//! Control connection
//!
//! One command/reply session with an FTP server. Every round trip holds the
//! connection's lock, so commands and replies on one connection never
//! interleave no matter how many tasks share it.

use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, MutexGuard};

use crate::client::state::SessionState;
use crate::error::ChannelError;
use crate::protocol::responses::PASSWORD_REQUIRED;
use crate::protocol::{Command, Reply, TransferType, read_reply};

/// Byte stream a control connection can run over.
pub trait ControlStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> ControlStream for T {}

/// An established control connection to one FTP server.
pub struct ControlConnection<S = TcpStream> {
    label: String,
    session: Mutex<Session<S>>,
}

struct Session<S> {
    stream: BufReader<S>,
    state: SessionState,
}

impl<S: ControlStream> Session<S> {
    async fn send(&mut self, label: &str, command: &Command) -> Result<Reply, ChannelError> {
        let line = command.to_line()?;
        debug!("{} >> {}", label, command.masked());

        let stream = self.stream.get_mut();
        stream.write_all(format!("{}\r\n", line).as_bytes()).await?;
        stream.flush().await?;
        self.state.record_command();

        let reply = self.receive(label).await?;
        if let Command::TYPE(kind) = command {
            if reply.is_success() {
                self.state.set_transfer_type(Some(*kind));
            }
        }
        Ok(reply)
    }

    async fn receive(&mut self, label: &str) -> Result<Reply, ChannelError> {
        let reply = read_reply(&mut self.stream).await?;
        for line in reply.lines() {
            debug!("{} << {}", label, line);
        }
        Ok(reply)
    }
}

/// Exclusive access to a control connection across several round trips.
///
/// Dropping the session releases the connection to the next waiter.
pub struct CommandSession<'a, S> {
    label: &'a str,
    guard: MutexGuard<'a, Session<S>>,
}

impl<S: ControlStream> CommandSession<'_, S> {
    /// Sends one command and waits for its complete reply.
    pub async fn send(&mut self, command: &Command) -> Result<Reply, ChannelError> {
        let label = self.label;
        self.guard.send(label, command).await
    }

    /// Waits for the next reply without sending anything.
    pub async fn read_reply(&mut self) -> Result<Reply, ChannelError> {
        let label = self.label;
        self.guard.receive(label).await
    }

    pub fn state(&self) -> &SessionState {
        &self.guard.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut SessionState {
        &mut self.guard.state
    }
}

impl ControlConnection<TcpStream> {
    /// Connects to `addr` and reads the server greeting.
    pub async fn connect(addr: &str, label: impl Into<String>) -> Result<Self, ChannelError> {
        let stream = TcpStream::connect(addr).await?;
        Self::open(stream, label).await
    }
}

impl<S: ControlStream> ControlConnection<S> {
    /// Wraps an already-connected stream and reads the server greeting.
    ///
    /// A greeting that is not a 2xx reply is rejected.
    pub async fn open(stream: S, label: impl Into<String>) -> Result<Self, ChannelError> {
        let label = label.into();
        let mut stream = BufReader::new(stream);

        let greeting = read_reply(&mut stream).await?;
        if !greeting.is_success() {
            return Err(ChannelError::UnexpectedReply(greeting));
        }
        info!("{} connected: {}", label, greeting.message());

        Ok(Self {
            label,
            session: Mutex::new(Session {
                stream,
                state: SessionState::default(),
            }),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Waits for exclusive use of the connection.
    ///
    /// Waiters are served in the order they called `lock`.
    pub async fn lock(&self) -> CommandSession<'_, S> {
        CommandSession {
            label: &self.label,
            guard: self.session.lock().await,
        }
    }

    /// Sends one command and returns its complete reply.
    pub async fn send(&self, command: &Command) -> Result<Reply, ChannelError> {
        self.lock().await.send(command).await
    }

    /// Waits for the next reply on the connection without sending a command.
    pub async fn read_reply(&self) -> Result<Reply, ChannelError> {
        self.lock().await.read_reply().await
    }

    /// Logs in with `USER`, following up with `PASS` when the server asks for it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Reply, ChannelError> {
        let mut session = self.lock().await;

        let mut reply = session.send(&Command::USER(username.to_string())).await?;
        if reply.code() == PASSWORD_REQUIRED {
            reply = session.send(&Command::PASS(password.to_string())).await?;
        }

        if !reply.is_success() {
            return Err(ChannelError::UnexpectedReply(reply));
        }

        session.state_mut().set_username(Some(username.to_string()));
        info!("{} logged in as {}", self.label, username);
        Ok(reply)
    }

    /// Returns the transfer type last acknowledged by the server.
    pub async fn transfer_type(&self) -> Option<TransferType> {
        self.lock().await.state().transfer_type()
    }

    /// Sends `QUIT` and closes the connection.
    pub async fn quit(self) -> Result<Reply, ChannelError> {
        let Self { label, session } = self;
        let mut session = session.into_inner();

        let reply = session.send(&label, &Command::QUIT).await?;
        session.stream.get_mut().shutdown().await?;
        info!("{} disconnected after {} commands", label, session.state.commands_sent());
        Ok(reply)
    }
}
