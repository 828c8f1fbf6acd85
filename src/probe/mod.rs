//! Capability probing
//!
//! Auxiliary commands that are independent of the transfer flow: feature
//! discovery, dupe check mode and STAT-based listings.

pub mod modes;
pub mod operations;

pub use modes::DupeCheckMode;
pub use operations::{dupe_check_mode, fast_listing, file_exists, probe_features};
