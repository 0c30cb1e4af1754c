//! Shared utilities for the vote-cast wallet.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
