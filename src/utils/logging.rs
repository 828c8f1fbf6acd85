//! Logging utilities
//!
//! Provides logging setup for the binary.

use env_logger::Env;

/// Setup logging. `RUST_LOG` overrides the default `info` level.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
