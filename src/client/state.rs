//! Module `state`
//!
//! Defines the `SessionState` struct tracking what the client knows about the
//! server-side state of one control connection.

use crate::protocol::TransferType;

/// Server-side session state as last acknowledged by the server.
#[derive(Debug, Default)]
pub struct SessionState {
    username: Option<String>,
    transfer_type: Option<TransferType>,
    commands_sent: u64,
}

impl SessionState {
    // --------------------
    // Getter methods
    // --------------------

    /// Returns the user this session logged in as, if login succeeded.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the last transfer type the server accepted with `TYPE`.
    ///
    /// `None` until a `TYPE` command succeeds on this connection.
    pub fn transfer_type(&self) -> Option<TransferType> {
        self.transfer_type
    }

    /// Returns how many commands have been written to this connection.
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_transfer_type(&mut self, transfer_type: Option<TransferType>) {
        self.transfer_type = transfer_type;
    }

    pub fn record_command(&mut self) {
        self.commands_sent += 1;
    }
}
