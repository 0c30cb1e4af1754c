use ballot_crypto::CryptoError;
use ballot_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("malformed fragment: {reason}")]
    Malformed { reason: String },

    #[error("fee computation overflowed")]
    FeeOverflow,

    #[error("witness signature does not verify")]
    InvalidSignature,
}

impl TransactionError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}
