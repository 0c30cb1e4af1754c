//! Fundamental types for the vote-cast wallet engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! block dates, values, identifiers, key material bytes, spending counters and the
//! big-endian byte codec used by every wire format.

pub mod codec;
pub mod counter;
pub mod date;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod value;
pub mod vote_plan;

pub use codec::{ReadBuf, WriteBuf};
pub use counter::{SpendingCounter, SpendingCounterSet, MAX_LANES};
pub use date::BlockDate;
pub use error::TypesError;
pub use hash::{FragmentId, HeaderId};
pub use keys::{PublicKey, Signature};
pub use network::Discrimination;
pub use value::Value;
pub use vote_plan::VotePlanId;
