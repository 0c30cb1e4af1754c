//! Extended Ed25519 account keys.
//!
//! Accounts are controlled by a 64-byte extended secret: a clamped 32-byte scalar
//! followed by a 32-byte nonce prefix. Wallets import that form directly, or derive
//! it from a 32-byte seed the way RFC 8032 does.

use ballot_types::PublicKey;
use curve25519_dalek::edwards::EdwardsPoint;
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Length of an extended secret key.
pub const EXTENDED_SECRET_KEY_SIZE: usize = 64;

/// The signing key of an account.
///
/// Intentionally not `Clone`, `Debug` or `Serialize`. The expanded scalar is
/// zeroized on drop.
pub struct AccountSecretKey {
    expanded: ExpandedSecretKey,
    public: VerifyingKey,
}

/// Whether the scalar half carries the Ed25519 clamping bit pattern.
fn is_clamped(scalar: &[u8]) -> bool {
    (scalar[0] & 0b0000_0111) == 0 && (scalar[31] & 0b1100_0000) == 0b0100_0000
}

fn clamp(scalar: &mut [u8]) {
    scalar[0] &= 0b1111_1000;
    scalar[31] &= 0b0111_1111;
    scalar[31] |= 0b0100_0000;
}

impl AccountSecretKey {
    /// Import a 64-byte extended secret key.
    ///
    /// Fails on any other length, or when the scalar half is not clamped.
    pub fn from_extended_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let mut arr: [u8; EXTENDED_SECRET_KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: EXTENDED_SECRET_KEY_SIZE,
                    got: bytes.len(),
                })?;
        let result = if is_clamped(&arr[..32]) {
            Self::from_expanded(ExpandedSecretKey::from_bytes(&arr))
        } else {
            Err(CryptoError::InvalidKeyEncoding)
        };
        arr.zeroize();
        result
    }

    /// Derive the extended key from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CryptoError> {
        let mut extended = [0u8; EXTENDED_SECRET_KEY_SIZE];
        extended.copy_from_slice(&Sha512::digest(seed));
        clamp(&mut extended[..32]);
        let key = Self::from_extended_bytes(&extended);
        extended.zeroize();
        key
    }

    /// Generate a fresh key from the operating system's random source.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        let key = Self::from_seed(&seed);
        seed.zeroize();
        key
    }

    fn from_expanded(expanded: ExpandedSecretKey) -> Result<Self, CryptoError> {
        let bytes = EdwardsPoint::mul_base(&expanded.scalar).compress().to_bytes();
        let public =
            VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidKeyEncoding)?;
        Ok(Self { expanded, public })
    }

    /// The account identifier.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.public.to_bytes())
    }

    pub(crate) fn expanded(&self) -> &ExpandedSecretKey {
        &self.expanded
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.public
    }
}
