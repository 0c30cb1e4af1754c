use ballot_types::{ReadBuf, WriteBuf};

use crate::error::TransactionError;
use crate::vote_cast::VoteCast;

/// Fragment tag of a transaction carrying a vote-cast certificate.
pub const VOTE_CAST_FRAGMENT_TAG: u8 = 11;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Certificate {
    VoteCast(VoteCast),
}

impl Certificate {
    pub fn vote_cast(vote_cast: VoteCast) -> Self {
        Self::VoteCast(vote_cast)
    }

    /// The fragment tag identifying this certificate kind on the wire.
    pub fn fragment_tag(&self) -> u8 {
        match self {
            Self::VoteCast(_) => VOTE_CAST_FRAGMENT_TAG,
        }
    }

    pub fn write(&self, buf: &mut WriteBuf) {
        match self {
            Self::VoteCast(vc) => vc.write(buf),
        }
    }

    pub fn read(fragment_tag: u8, buf: &mut ReadBuf<'_>) -> Result<Self, TransactionError> {
        match fragment_tag {
            VOTE_CAST_FRAGMENT_TAG => Ok(Self::VoteCast(VoteCast::read(buf)?)),
            tag => Err(TransactionError::malformed(format!(
                "unsupported fragment tag {tag}"
            ))),
        }
    }
}

impl From<VoteCast> for Certificate {
    fn from(vote_cast: VoteCast) -> Self {
        Self::vote_cast(vote_cast)
    }
}
