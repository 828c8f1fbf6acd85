//! Address negotiation
//!
//! PASV on the source, PORT on the destination.

use log::info;

use crate::client::{ControlConnection, ControlStream};
use crate::error::FxpErrorKind;
use crate::fxp::address::PassiveAddress;
use crate::protocol::Command;

/// Asks `source` to listen for a data connection and returns the address it announced.
pub async fn request_passive_address<S: ControlStream>(
    source: &ControlConnection<S>,
) -> Result<PassiveAddress, FxpErrorKind> {
    let reply = source.send(&Command::PASV).await?;
    if !reply.is_success() {
        return Err(FxpErrorKind::Negotiation(reply));
    }

    match PassiveAddress::parse(&reply.text()) {
        Ok(address) => {
            info!("{} is listening on {}", source.label(), address);
            Ok(address)
        }
        Err(reason) => Err(FxpErrorKind::AddressParse { reply, reason }),
    }
}

/// Tells `destination` to connect to `address` for the next transfer.
pub async fn bind_active_address<S: ControlStream>(
    destination: &ControlConnection<S>,
    address: &PassiveAddress,
) -> Result<(), FxpErrorKind> {
    let reply = destination
        .send(&Command::PORT(address.port_argument().to_string()))
        .await?;
    if !reply.is_success() {
        return Err(FxpErrorKind::Negotiation(reply));
    }

    info!("{} will connect to {}", destination.label(), address);
    Ok(())
}
