//! Genesis configuration parameters.
//!
//! Each parameter is encoded as `taglen:u16 ‖ value`, where the upper ten bits
//! of `taglen` hold the tag and the lower six the value length in bytes.

use ballot_types::{Discrimination, ReadBuf, WriteBuf};
use tracing::debug;

use crate::error::GenesisError;
use crate::fee::{LinearFee, PerVoteCertificateFee};

const LEN_BITS: u16 = 6;
const LEN_MASK: u16 = (1 << LEN_BITS) - 1;

/// Wire tags of the parameters this decoder understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Tag {
    Discrimination = 1,
    Block0Date = 2,
    ConsensusVersion = 3,
    SlotsPerEpoch = 4,
    SlotDuration = 5,
    EpochStabilityDepth = 6,
    LinearFee = 14,
    PerVoteCertificateFees = 29,
    TransactionMaxExpiryEpochs = 31,
}

impl Tag {
    fn from_u16(tag: u16) -> Option<Self> {
        Some(match tag {
            1 => Self::Discrimination,
            2 => Self::Block0Date,
            3 => Self::ConsensusVersion,
            4 => Self::SlotsPerEpoch,
            5 => Self::SlotDuration,
            6 => Self::EpochStabilityDepth,
            14 => Self::LinearFee,
            29 => Self::PerVoteCertificateFees,
            31 => Self::TransactionMaxExpiryEpochs,
            _ => return None,
        })
    }
}

/// A single genesis configuration entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigParam {
    Discrimination(Discrimination),
    /// Seconds since the unix epoch.
    Block0Date(u64),
    ConsensusVersion(u16),
    SlotsPerEpoch(u32),
    /// Seconds.
    SlotDuration(u8),
    EpochStabilityDepth(u32),
    /// Base fee terms. Any per-vote override travels separately.
    LinearFee(LinearFee),
    PerVoteCertificateFees(PerVoteCertificateFee),
    TransactionMaxExpiryEpochs(u8),
}

impl ConfigParam {
    pub fn tag(&self) -> Tag {
        match self {
            Self::Discrimination(_) => Tag::Discrimination,
            Self::Block0Date(_) => Tag::Block0Date,
            Self::ConsensusVersion(_) => Tag::ConsensusVersion,
            Self::SlotsPerEpoch(_) => Tag::SlotsPerEpoch,
            Self::SlotDuration(_) => Tag::SlotDuration,
            Self::EpochStabilityDepth(_) => Tag::EpochStabilityDepth,
            Self::LinearFee(_) => Tag::LinearFee,
            Self::PerVoteCertificateFees(_) => Tag::PerVoteCertificateFees,
            Self::TransactionMaxExpiryEpochs(_) => Tag::TransactionMaxExpiryEpochs,
        }
    }

    fn write_value(&self, buf: &mut WriteBuf) {
        match self {
            Self::Discrimination(d) => {
                buf.put_u8(d.as_byte());
            }
            Self::Block0Date(secs) => {
                buf.put_u64(*secs);
            }
            Self::ConsensusVersion(v) => {
                buf.put_u16(*v);
            }
            Self::SlotsPerEpoch(n) | Self::EpochStabilityDepth(n) => {
                buf.put_u32(*n);
            }
            Self::SlotDuration(secs) | Self::TransactionMaxExpiryEpochs(secs) => {
                buf.put_u8(*secs);
            }
            Self::LinearFee(fee) => {
                buf.put_u64(fee.constant)
                    .put_u64(fee.coefficient)
                    .put_u64(fee.certificate);
            }
            Self::PerVoteCertificateFees(fees) => {
                buf.put_u64(fees.certificate_vote_plan)
                    .put_u64(fees.certificate_vote_cast);
            }
        }
    }

    /// Append `taglen ‖ value`.
    pub fn write(&self, buf: &mut WriteBuf) {
        let mut value = WriteBuf::new();
        self.write_value(&mut value);
        let taglen = ((self.tag() as u16) << LEN_BITS) | value.len() as u16;
        buf.put_u16(taglen).put_bytes(value.as_slice());
    }

    /// Read one entry. Unknown tags are consumed and yield `None`.
    pub fn read(buf: &mut ReadBuf<'_>) -> Result<Option<Self>, GenesisError> {
        let taglen = buf.get_u16()?;
        let raw_tag = taglen >> LEN_BITS;
        let len = (taglen & LEN_MASK) as usize;
        let mut value = buf.split_to(len)?;

        let Some(tag) = Tag::from_u16(raw_tag) else {
            debug!(tag = raw_tag, len, "skipping unknown genesis config parameter");
            return Ok(None);
        };

        let param = match tag {
            Tag::Discrimination => {
                let byte = value.get_u8()?;
                let d = Discrimination::from_byte(byte).ok_or_else(|| {
                    GenesisError::malformed(format!("unknown discrimination {byte}"))
                })?;
                Self::Discrimination(d)
            }
            Tag::Block0Date => Self::Block0Date(value.get_u64()?),
            Tag::ConsensusVersion => Self::ConsensusVersion(value.get_u16()?),
            Tag::SlotsPerEpoch => Self::SlotsPerEpoch(value.get_u32()?),
            Tag::SlotDuration => Self::SlotDuration(value.get_u8()?),
            Tag::EpochStabilityDepth => Self::EpochStabilityDepth(value.get_u32()?),
            Tag::LinearFee => Self::LinearFee(LinearFee::new(
                value.get_u64()?,
                value.get_u64()?,
                value.get_u64()?,
            )),
            Tag::PerVoteCertificateFees => {
                Self::PerVoteCertificateFees(PerVoteCertificateFee {
                    certificate_vote_plan: value.get_u64()?,
                    certificate_vote_cast: value.get_u64()?,
                })
            }
            Tag::TransactionMaxExpiryEpochs => {
                Self::TransactionMaxExpiryEpochs(value.get_u8()?)
            }
        };
        value
            .expect_end()
            .map_err(|_| GenesisError::malformed(format!("bad length {len} for {tag:?}")))?;
        Ok(Some(param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(param: &ConfigParam) -> Vec<u8> {
        let mut buf = WriteBuf::new();
        param.write(&mut buf);
        buf.into_vec()
    }

    #[test]
    fn taglen_packs_tag_and_length() {
        let bytes = encode(&ConfigParam::SlotsPerEpoch(720));
        assert_eq!(&bytes[..2], &((4u16 << 6) | 4).to_be_bytes());
        assert_eq!(&bytes[2..], &720u32.to_be_bytes());
    }

    #[test]
    fn fee_param_reads_back() {
        let param = ConfigParam::LinearFee(LinearFee::new(10, 2, 5));
        let bytes = encode(&param);
        assert_eq!(bytes.len(), 2 + 24);
        let mut reader = ReadBuf::new(&bytes);
        assert_eq!(ConfigParam::read(&mut reader).unwrap(), Some(param));
        assert!(reader.is_end());
    }

    #[test]
    fn unknown_tag_is_skipped() {
        let mut buf = WriteBuf::new();
        buf.put_u16((60 << 6) | 3).put_bytes(&[1, 2, 3]);
        ConfigParam::SlotDuration(20).write(&mut buf);
        let bytes = buf.into_vec();

        let mut reader = ReadBuf::new(&bytes);
        assert_eq!(ConfigParam::read(&mut reader).unwrap(), None);
        assert_eq!(
            ConfigParam::read(&mut reader).unwrap(),
            Some(ConfigParam::SlotDuration(20))
        );
    }

    #[test]
    fn wrong_length_is_malformed() {
        let mut buf = WriteBuf::new();
        buf.put_u16((5 << 6) | 2).put_bytes(&[1, 2]);
        let bytes = buf.into_vec();
        assert!(matches!(
            ConfigParam::read(&mut ReadBuf::new(&bytes)),
            Err(GenesisError::Malformed { .. })
        ));
    }

    #[test]
    fn unknown_discrimination_is_malformed() {
        let mut buf = WriteBuf::new();
        buf.put_u16((1 << 6) | 1).put_u8(7);
        let bytes = buf.into_vec();
        assert!(ConfigParam::read(&mut ReadBuf::new(&bytes)).is_err());
    }
}
