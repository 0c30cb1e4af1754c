//! Vote-cast wallet engine.
//!
//! Provides everything a voting client needs:
//! - Key import (extended Ed25519 secret, seed, or fresh)
//! - Observed account state: balance and per-lane spending counters
//! - Signing vote-cast transactions into fragments
//! - Pending/confirmed fragment tracking
//! - A thread-safe [`SharedWallet`] handle and TOML configuration

pub mod config;
pub mod error;
pub mod shared;
pub mod tracker;
pub mod wallet;

pub use config::WalletConfig;
pub use error::WalletError;
pub use shared::SharedWallet;
pub use tracker::{Confirmation, FragmentTracker, TrackedFragment};
pub use wallet::Wallet;
