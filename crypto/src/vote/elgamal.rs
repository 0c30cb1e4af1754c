use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use rand::{CryptoRng, RngCore};
use std::ops::Add;
use zeroize::Zeroize;

use crate::error::CryptoError;

pub(crate) fn decode_point(bytes: &[u8]) -> Option<RistrettoPoint> {
    CompressedRistretto::from_slice(bytes).ok()?.decompress()
}

pub(crate) fn decode_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_canonical_bytes(*bytes))
}

/// The key ballots are encrypted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectionPublicKey(RistrettoPoint);

impl ElectionPublicKey {
    pub const BYTES_LEN: usize = 32;

    /// Decode a compressed Ristretto point.
    ///
    /// The identity element is rejected: encrypting under it would leave the
    /// plaintext in the clear.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let point = decode_point(bytes).ok_or(CryptoError::InvalidEncryptionKey)?;
        if point == RistrettoPoint::identity() {
            return Err(CryptoError::InvalidEncryptionKey);
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    pub(crate) fn point(&self) -> &RistrettoPoint {
        &self.0
    }

    /// Encrypt `bit` with explicit randomness `r`.
    pub(crate) fn encrypt_bit(&self, bit: bool, r: &Scalar) -> Ciphertext {
        let e1 = RistrettoPoint::mul_base(r);
        let mut e2 = r * self.0;
        if bit {
            e2 += RISTRETTO_BASEPOINT_POINT;
        }
        Ciphertext { e1, e2 }
    }
}

/// The decryption capability held by the tally authority.
pub struct ElectionSecretKey(Scalar);

impl ElectionSecretKey {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(Scalar::random(rng))
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        decode_scalar(bytes)
            .filter(|s| *s != Scalar::ZERO)
            .map(Self)
            .ok_or(CryptoError::InvalidKeyEncoding)
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    pub fn public_key(&self) -> ElectionPublicKey {
        ElectionPublicKey(RistrettoPoint::mul_base(&self.0))
    }

    /// Recover `m·G` from a ciphertext of `m`.
    pub(crate) fn decrypt_point(&self, ciphertext: &Ciphertext) -> RistrettoPoint {
        ciphertext.e2 - self.0 * ciphertext.e1
    }

    /// Decrypt a ciphertext whose plaintext is known to lie in `0..=max`.
    ///
    /// Linear search over the small plaintext space; returns `None` when the
    /// plaintext is out of range.
    pub fn decrypt_small(&self, ciphertext: &Ciphertext, max: u64) -> Option<u64> {
        let target = self.decrypt_point(ciphertext);
        let mut acc = RistrettoPoint::identity();
        for m in 0..=max {
            if acc == target {
                return Some(m);
            }
            acc += RISTRETTO_BASEPOINT_POINT;
        }
        None
    }
}

impl Drop for ElectionSecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Lifted ElGamal ciphertext `(r·G, r·H + m·G)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) e1: RistrettoPoint,
    pub(crate) e2: RistrettoPoint,
}

impl Ciphertext {
    pub const BYTES_LEN: usize = 64;

    /// Encryption of zero with zero randomness; the neutral element for `+`.
    pub fn zero() -> Self {
        Self {
            e1: RistrettoPoint::identity(),
            e2: RistrettoPoint::identity(),
        }
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(self.e1.compress().as_bytes());
        out[32..].copy_from_slice(self.e2.compress().as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self, CryptoError> {
        let e1 = decode_point(&bytes[..32])
            .ok_or_else(|| CryptoError::MalformedBallot("invalid ciphertext point".into()))?;
        let e2 = decode_point(&bytes[32..])
            .ok_or_else(|| CryptoError::MalformedBallot("invalid ciphertext point".into()))?;
        Ok(Self { e1, e2 })
    }
}

impl Add for Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: Ciphertext) -> Ciphertext {
        Ciphertext {
            e1: self.e1 + rhs.e1,
            e2: self.e2 + rhs.e2,
        }
    }
}

impl<'a> Add<&'a Ciphertext> for &'a Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &'a Ciphertext) -> Ciphertext {
        *self + *rhs
    }
}
