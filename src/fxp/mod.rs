//! Server-to-server transfers
//!
//! Negotiates a data address between two servers, starts the store and
//! retrieve pair, and waits for both sides to report completion.

pub mod address;
pub mod completion;
pub mod initiate;
pub mod negotiation;
pub mod orchestrator;
pub mod results;

pub use address::PassiveAddress;
pub use completion::{abort_transfer, await_completion, settle_completion};
pub use initiate::{initiate_retrieve, initiate_store};
pub use negotiation::{bind_active_address, request_passive_address};
pub use orchestrator::{Compensation, FxpOrchestrator, transfer};
pub use results::{Side, Stage, TransferOutcome};
