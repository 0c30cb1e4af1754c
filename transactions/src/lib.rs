//! Vote-cast transactions.
//!
//! - **Payload**: public or encrypted ballot, with the [`PayloadEncoder`] strategy
//! - **VoteCast** / **Certificate**: ballot for one proposal of a vote plan
//! - **Transaction**: single account input, signed account witness
//! - **Fragment**: serialized transaction plus its content-hash id

pub mod certificate;
pub mod error;
pub mod fee;
pub mod fragment;
pub mod payload;
pub mod transaction;
pub mod vote_cast;

pub use certificate::{Certificate, VOTE_CAST_FRAGMENT_TAG};
pub use error::TransactionError;
pub use fee::FeeAlgorithm;
pub use fragment::{Fragment, FragmentStatus};
pub use payload::{Payload, PayloadEncoder, PayloadType, UnitVectorEncoder};
pub use transaction::{witness_data, AccountWitness, Input, Transaction, UnsignedTransaction};
pub use vote_cast::VoteCast;
