//! Genesis block decoding for the vote-cast wallet.
//!
//! [`Settings::from_block0_bytes`] turns a block0 blob into the chain parameters
//! every signature depends on: the chain tag (block0 hash), the fee schedule and
//! the network discriminant.

pub mod block;
pub mod config;
pub mod error;
pub mod fee;
pub mod settings;

pub use block::{Block0, Block0Builder};
pub use config::{ConfigParam, Tag};
pub use error::GenesisError;
pub use fee::{LinearFee, PerVoteCertificateFee};
pub use settings::{Settings, SettingsProvider, DEFAULT_TRANSACTION_MAX_EXPIRY_EPOCHS};
