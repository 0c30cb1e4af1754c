use ballot_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("malformed genesis block: {reason}")]
    Malformed { reason: String },

    #[error("{what} of {len} bytes does not fit its length prefix")]
    TooLarge { what: &'static str, len: usize },
}

impl GenesisError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<TypesError> for GenesisError {
    fn from(e: TypesError) -> Self {
        Self::malformed(e.to_string())
    }
}
