//! Block dates: an epoch number and a slot within that epoch.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position on the chain's time line.
///
/// Ordering is by epoch first, then slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockDate {
    pub epoch: u32,
    pub slot_id: u32,
}

impl BlockDate {
    pub const GENESIS: Self = Self {
        epoch: 0,
        slot_id: 0,
    };

    pub fn new(epoch: u32, slot_id: u32) -> Self {
        Self { epoch, slot_id }
    }

    /// First slot of the following epoch.
    pub fn next_epoch(self) -> Self {
        Self {
            epoch: self.epoch.saturating_add(1),
            slot_id: 0,
        }
    }

    /// The following slot, rolling into the next epoch after `epoch_length` slots.
    pub fn next_slot(self, epoch_length: u32) -> Self {
        if self.slot_id.saturating_add(1) >= epoch_length {
            self.next_epoch()
        } else {
            Self {
                epoch: self.epoch,
                slot_id: self.slot_id + 1,
            }
        }
    }
}

impl fmt::Display for BlockDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.epoch, self.slot_id)
    }
}

impl FromStr for BlockDate {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (epoch, slot) = s
            .split_once('.')
            .ok_or_else(|| TypesError::InvalidBlockDate(format!("missing '.' in {s:?}")))?;
        let epoch = epoch
            .parse()
            .map_err(|e| TypesError::InvalidBlockDate(format!("epoch {epoch:?}: {e}")))?;
        let slot_id = slot
            .parse()
            .map_err(|e| TypesError::InvalidBlockDate(format!("slot {slot:?}: {e}")))?;
        Ok(Self { epoch, slot_id })
    }
}
