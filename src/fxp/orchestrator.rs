//! FXP orchestration
//!
//! Drives a server-to-server transfer across two control connections:
//!
//! 1. PASV on the source
//! 2. PORT on the destination, with the source's address
//! 3. STOR on the destination
//! 4. RETR on the source
//! 5. wait for 226 on the source
//! 6. wait for 226 on the destination
//!
//! A server that answers STOR or RETR with a 2xx instead of 1xx has already
//! sent its final status, so the wait for that side is skipped.
//!
//! Each step needs the previous one to have succeeded, so they run strictly in
//! order. The first failure ends the transfer.

use log::{info, warn};
use serde::Deserialize;

use crate::client::{ControlConnection, ControlStream};
use crate::error::handlers::handle_error;
use crate::error::{FxpError, FxpErrorKind};
use crate::fxp::completion::{abort_transfer, settle_completion};
use crate::fxp::initiate::{initiate_retrieve, initiate_store};
use crate::fxp::negotiation::{bind_active_address, request_passive_address};
use crate::fxp::results::{Side, Stage, TransferOutcome};
use crate::protocol::Reply;

/// What to do with the destination's pending store when the source fails after
/// the store was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compensation {
    /// Leave the destination alone.
    #[default]
    None,
    /// Send ABOR to the destination.
    Abort,
}

/// Runs FXP transfers between pairs of borrowed control connections.
#[derive(Debug, Clone, Default)]
pub struct FxpOrchestrator {
    compensation: Compensation,
}

impl FxpOrchestrator {
    pub fn new(compensation: Compensation) -> Self {
        Self { compensation }
    }

    pub fn compensation(&self) -> Compensation {
        self.compensation
    }

    /// Copies `source_path` on `source` to `destination_path` on `destination`.
    ///
    /// Neither connection is closed. On success the outcome carries the
    /// destination's completion reply.
    pub async fn transfer<D, S>(
        &self,
        destination: &ControlConnection<D>,
        destination_path: &str,
        source: &ControlConnection<S>,
        source_path: &str,
    ) -> TransferOutcome
    where
        D: ControlStream,
        S: ControlStream,
    {
        info!(
            "FXP {}:{} -> {}:{}",
            source.label(),
            source_path,
            destination.label(),
            destination_path
        );

        let result = self
            .run(destination, destination_path, source, source_path)
            .await;

        match &result {
            Ok(reply) => info!("FXP transfer complete: {}", reply.message()),
            Err(err) => handle_error(err),
        }
        result.into()
    }

    async fn run<D, S>(
        &self,
        destination: &ControlConnection<D>,
        destination_path: &str,
        source: &ControlConnection<S>,
        source_path: &str,
    ) -> Result<Reply, FxpError>
    where
        D: ControlStream,
        S: ControlStream,
    {
        let address = request_passive_address(source)
            .await
            .map_err(at(Stage::RequestingPassive))?;

        bind_active_address(destination, &address)
            .await
            .map_err(at(Stage::BindingActive))?;

        let store = initiate_store(destination, destination_path)
            .await
            .map_err(at(Stage::InitiatingStore))?;

        // A preliminary reply means the store is in flight from here on.
        let store_pending = store.is_preliminary();

        let retrieve = match initiate_retrieve(source, source_path).await {
            Ok(reply) => reply,
            Err(kind) => {
                self.compensate(destination, store_pending).await;
                return Err(at(Stage::InitiatingRetrieve)(kind));
            }
        };

        if let Err(kind) = settle_completion(source, retrieve).await {
            self.compensate(destination, store_pending).await;
            return Err(at(Stage::AwaitingSourceCompletion)(kind));
        }

        settle_completion(destination, store)
            .await
            .map_err(at(Stage::AwaitingDestinationCompletion))
    }

    async fn compensate<D: ControlStream>(
        &self,
        destination: &ControlConnection<D>,
        store_pending: bool,
    ) {
        if self.compensation != Compensation::Abort || !store_pending {
            return;
        }

        warn!("Aborting pending store on {}", destination.label());
        match abort_transfer(destination).await {
            Ok(reply) => info!("{} acknowledged abort: {}", destination.label(), reply),
            Err(e) => warn!("Failed to abort store on {}: {}", destination.label(), e),
        }
    }
}

/// Attaches the stage, and the side it runs on, to a step error.
fn at(stage: Stage) -> impl Fn(FxpErrorKind) -> FxpError {
    move |kind| FxpError::new(stage, stage.side(), kind)
}

/// Runs one transfer with the default policy (no compensation).
pub async fn transfer<D, S>(
    destination: &ControlConnection<D>,
    destination_path: &str,
    source: &ControlConnection<S>,
    source_path: &str,
) -> TransferOutcome
where
    D: ControlStream,
    S: ControlStream,
{
    FxpOrchestrator::default()
        .transfer(destination, destination_path, source, source_path)
        .await
}
