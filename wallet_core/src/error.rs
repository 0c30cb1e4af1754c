use ballot_crypto::CryptoError;
use ballot_genesis::GenesisError;
use ballot_transactions::TransactionError;
use ballot_types::{FragmentId, TypesError, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Value, available: Value },

    #[error("unknown fragment {0}")]
    UnknownFragment(FragmentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
