//! Vote plan identifiers.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 32-byte identifier naming an on-chain vote plan.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VotePlanId([u8; 32]);

impl VotePlanId {
    pub const SIZE: usize = 32;

    /// Fails with [`TypesError::InvalidIdentifierLength`] unless given exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; Self::SIZE] =
            bytes
                .try_into()
                .map_err(|_| TypesError::InvalidIdentifierLength {
                    expected: Self::SIZE,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for VotePlanId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for VotePlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VotePlanId({})", hex::encode(self.0))
    }
}

impl fmt::Display for VotePlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for VotePlanId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_32_bytes() {
        let bytes: Vec<u8> = (0..32).collect();
        let id = VotePlanId::from_bytes(&bytes).unwrap();
        assert_eq!(id.as_bytes().as_slice(), bytes.as_slice());
    }

    #[test]
    fn rejects_short_and_long_input() {
        assert_eq!(
            VotePlanId::from_bytes(&[0u8; 31]),
            Err(TypesError::InvalidIdentifierLength {
                expected: 32,
                got: 31
            })
        );
        assert!(VotePlanId::from_bytes(&[0u8; 33]).is_err());
        assert!(VotePlanId::from_bytes(&[]).is_err());
    }
}
