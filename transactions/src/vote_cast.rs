use ballot_types::{ReadBuf, VotePlanId, WriteBuf};

use crate::error::TransactionError;
use crate::payload::Payload;

/// A ballot for one proposal of a vote plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteCast {
    pub vote_plan: VotePlanId,
    pub proposal_index: u8,
    pub payload: Payload,
}

impl VoteCast {
    pub fn new(vote_plan: VotePlanId, proposal_index: u8, payload: Payload) -> Self {
        Self {
            vote_plan,
            proposal_index,
            payload,
        }
    }

    pub fn write(&self, buf: &mut WriteBuf) {
        buf.put_bytes(self.vote_plan.as_bytes())
            .put_u8(self.proposal_index);
        self.payload.write(buf);
    }

    pub fn read(buf: &mut ReadBuf<'_>) -> Result<Self, TransactionError> {
        let vote_plan = VotePlanId::from(buf.get_array::<{ VotePlanId::SIZE }>()?);
        let proposal_index = buf.get_u8()?;
        let payload = Payload::read(buf)?;
        Ok(Self::new(vote_plan, proposal_index, payload))
    }
}
