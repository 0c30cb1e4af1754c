//! Multi-lane spending counters.
//!
//! An account carries one anti-replay counter per lane. Lanes are independent,
//! so up to [`MAX_LANES`] transactions can be in flight from one account without
//! competing for the same nonce.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of independent lanes per account.
pub const MAX_LANES: usize = 8;

/// The counter value of a single lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpendingCounter {
    pub lane: u8,
    pub value: u32,
}

impl SpendingCounter {
    pub fn new(lane: u8, value: u32) -> Self {
        Self { lane, value }
    }

    /// Counter zero on `lane`.
    pub fn zero(lane: u8) -> Self {
        Self { lane, value: 0 }
    }

    pub fn is_valid_lane(&self) -> bool {
        (self.lane as usize) < MAX_LANES
    }

    /// The counter that follows this one on the same lane.
    pub fn next(&self) -> Result<Self, TypesError> {
        let value = self
            .value
            .checked_add(1)
            .ok_or(TypesError::CounterOverflow { lane: self.lane })?;
        Ok(Self {
            lane: self.lane,
            value,
        })
    }
}

impl fmt::Display for SpendingCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@lane{}", self.value, self.lane)
    }
}

/// Exactly [`MAX_LANES`] counters, indexed by lane number.
///
/// Every lane is always present; the array index *is* the lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingCounterSet {
    lanes: [u32; MAX_LANES],
}

impl SpendingCounterSet {
    /// All lanes at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from observed counters; lanes not mentioned stay at zero.
    pub fn from_counters<I>(counters: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = SpendingCounter>,
    {
        let mut set = Self::new();
        for counter in counters {
            set.add(counter)?;
        }
        Ok(set)
    }

    fn check_lane(lane: u8) -> Result<usize, TypesError> {
        let index = lane as usize;
        if index >= MAX_LANES {
            return Err(TypesError::InvalidLane(lane));
        }
        Ok(index)
    }

    /// Insert or overwrite the counter of `counter.lane`.
    pub fn add(&mut self, counter: SpendingCounter) -> Result<(), TypesError> {
        let index = Self::check_lane(counter.lane)?;
        self.lanes[index] = counter.value;
        Ok(())
    }

    pub fn get(&self, lane: u8) -> Result<SpendingCounter, TypesError> {
        let index = Self::check_lane(lane)?;
        Ok(SpendingCounter::new(lane, self.lanes[index]))
    }

    /// The counter to sign with on `lane`.
    ///
    /// Fails if the lane is out of range or its counter can no longer advance,
    /// so a signature is never produced that cannot be followed by an increment.
    pub fn next_usable_lane(&self, lane: u8) -> Result<SpendingCounter, TypesError> {
        let current = self.get(lane)?;
        current.next()?;
        Ok(current)
    }

    /// Advance `lane` by exactly one and return the new counter.
    pub fn increment(&mut self, lane: u8) -> Result<SpendingCounter, TypesError> {
        let next = self.get(lane)?.next()?;
        self.lanes[lane as usize] = next.value;
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = SpendingCounter> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .map(|(lane, value)| SpendingCounter::new(lane as u8, *value))
    }
}

impl IntoIterator for SpendingCounterSet {
    type Item = SpendingCounter;
    type IntoIter = std::vec::IntoIter<SpendingCounter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}
