use ballot_crypto::hash_fragment;
use ballot_types::FragmentId;
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::transaction::Transaction;

/// Lifecycle of a submitted fragment as seen by the wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentStatus {
    /// Signed and handed out, not yet observed in a block.
    Pending,
    /// Reported as included in a block.
    Confirmed,
}

/// Serialized signed transaction plus its content hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub id: FragmentId,
    pub bytes: Vec<u8>,
    pub status: FragmentStatus,
}

impl Fragment {
    pub fn from_transaction(tx: &Transaction) -> Self {
        let bytes = tx.serialize();
        Self {
            id: hash_fragment(&bytes),
            bytes,
            status: FragmentStatus::Pending,
        }
    }

    /// Re-parse the carried transaction.
    pub fn transaction(&self) -> Result<Transaction, TransactionError> {
        Transaction::deserialize(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
