//! Chain settings derived from the genesis block.

use std::collections::BTreeSet;

use ballot_types::{Discrimination, HeaderId};
use serde::Serialize;
use tracing::debug;

use crate::block::Block0;
use crate::config::{ConfigParam, Tag};
use crate::error::GenesisError;
use crate::fee::LinearFee;

/// Used when the genesis block does not set `TransactionMaxExpiryEpochs`.
pub const DEFAULT_TRANSACTION_MAX_EXPIRY_EPOCHS: u8 = 1;

/// Read access to the chain parameters a signer needs.
pub trait SettingsProvider {
    /// Genesis header hash bound into every witness.
    fn chain_tag(&self) -> HeaderId;

    fn fees(&self) -> &LinearFee;

    fn discrimination(&self) -> Discrimination;
}

/// Immutable chain parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub block0_hash: HeaderId,
    /// Seconds since the unix epoch.
    pub block0_date: u64,
    pub discrimination: Discrimination,
    /// Seconds.
    pub slot_duration: u8,
    pub slots_per_epoch: u32,
    pub transaction_max_expiry_epochs: u8,
    pub fees: LinearFee,
}

impl Settings {
    /// Decode a genesis blob.
    pub fn from_block0_bytes(bytes: &[u8]) -> Result<Self, GenesisError> {
        let block = Block0::parse(bytes)?;

        let mut seen = BTreeSet::new();
        let mut discrimination = None;
        let mut block0_date = None;
        let mut slot_duration = None;
        let mut slots_per_epoch = None;
        let mut transaction_max_expiry_epochs = DEFAULT_TRANSACTION_MAX_EXPIRY_EPOCHS;
        let mut fees = LinearFee::default();
        let mut per_vote = None;

        for param in block.params {
            let tag = param.tag();
            if !seen.insert(tag) {
                return Err(GenesisError::malformed(format!("duplicate parameter {tag:?}")));
            }
            match param {
                ConfigParam::Discrimination(d) => discrimination = Some(d),
                ConfigParam::Block0Date(secs) => block0_date = Some(secs),
                ConfigParam::SlotDuration(secs) => slot_duration = Some(secs),
                ConfigParam::SlotsPerEpoch(n) => slots_per_epoch = Some(n),
                ConfigParam::TransactionMaxExpiryEpochs(n) => transaction_max_expiry_epochs = n,
                ConfigParam::LinearFee(f) => fees = f,
                ConfigParam::PerVoteCertificateFees(f) => per_vote = Some(f),
                ConfigParam::ConsensusVersion(_) | ConfigParam::EpochStabilityDepth(_) => {}
            }
        }
        fees.per_vote_certificate_fees = per_vote;

        let settings = Self {
            block0_hash: block.id,
            block0_date: require(block0_date, Tag::Block0Date)?,
            discrimination: require(discrimination, Tag::Discrimination)?,
            slot_duration: require(slot_duration, Tag::SlotDuration)?,
            slots_per_epoch: require(slots_per_epoch, Tag::SlotsPerEpoch)?,
            transaction_max_expiry_epochs,
            fees,
        };
        if settings.slots_per_epoch == 0 {
            return Err(GenesisError::malformed("slots per epoch is zero"));
        }

        debug!(
            chain_tag = %settings.block0_hash,
            discrimination = settings.discrimination.as_str(),
            fee_constant = settings.fees.constant,
            fee_coefficient = settings.fees.coefficient,
            fee_certificate = settings.fees.vote_cast_certificate(),
            "decoded genesis settings"
        );
        Ok(settings)
    }

    /// Number of slots in an epoch.
    pub fn epoch_length(&self) -> u32 {
        self.slots_per_epoch
    }
}

fn require<T>(value: Option<T>, tag: Tag) -> Result<T, GenesisError> {
    value.ok_or_else(|| GenesisError::malformed(format!("missing required parameter {tag:?}")))
}

impl TryFrom<&[u8]> for Settings {
    type Error = GenesisError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_block0_bytes(bytes)
    }
}

impl SettingsProvider for Settings {
    fn chain_tag(&self) -> HeaderId {
        self.block0_hash
    }

    fn fees(&self) -> &LinearFee {
        &self.fees
    }

    fn discrimination(&self) -> Discrimination {
        self.discrimination
    }
}
