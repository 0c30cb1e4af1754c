use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

use super::elgamal::{decode_point, decode_scalar, Ciphertext, ElectionPublicKey};
use crate::error::CryptoError;
use crate::hash::blake2b_512_multi;

const BIT_PROOF_DOMAIN: &[u8] = b"ballot/bit-proof/v1";
const SUM_PROOF_DOMAIN: &[u8] = b"ballot/sum-proof/v1";

fn challenge(parts: &[&[u8]]) -> Scalar {
    Scalar::from_bytes_mod_order_wide(&blake2b_512_multi(parts))
}

fn compress(p: &RistrettoPoint) -> [u8; 32] {
    p.compress().to_bytes()
}

fn read_point(bytes: &[u8]) -> Result<RistrettoPoint, CryptoError> {
    decode_point(bytes).ok_or_else(|| CryptoError::MalformedBallot("invalid proof point".into()))
}

fn read_scalar(bytes: &[u8]) -> Result<Scalar, CryptoError> {
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    decode_scalar(&arr)
        .ok_or_else(|| CryptoError::MalformedBallot("non-canonical proof scalar".into()))
}

/// Disjunctive Chaum–Pedersen proof that a ciphertext encrypts 0 or 1.
///
/// Branch `j` proves `log_G(e1) == log_H(e2 - j·G)`; one branch is real, the
/// other simulated, and the two challenges must sum to the Fiat–Shamir hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitProof {
    a: [RistrettoPoint; 2],
    b: [RistrettoPoint; 2],
    c: [Scalar; 2],
    z: [Scalar; 2],
}

impl BitProof {
    pub const BYTES_LEN: usize = 256;

    fn challenge(
        pk: &ElectionPublicKey,
        ct: &Ciphertext,
        a: &[RistrettoPoint; 2],
        b: &[RistrettoPoint; 2],
        context: &[u8],
    ) -> Scalar {
        challenge(&[
            BIT_PROOF_DOMAIN,
            context,
            &pk.to_bytes(),
            &ct.to_bytes(),
            &compress(&a[0]),
            &compress(&b[0]),
            &compress(&a[1]),
            &compress(&b[1]),
        ])
    }

    pub(crate) fn prove<R: RngCore + CryptoRng>(
        pk: &ElectionPublicKey,
        ct: &Ciphertext,
        bit: bool,
        r: &Scalar,
        context: &[u8],
        rng: &mut R,
    ) -> Self {
        let h = *pk.point();
        let targets = [ct.e2, ct.e2 - RISTRETTO_BASEPOINT_POINT];
        let real = bit as usize;
        let fake = 1 - real;

        let mut a = [RistrettoPoint::default(); 2];
        let mut b = [RistrettoPoint::default(); 2];
        let mut c = [Scalar::ZERO; 2];
        let mut z = [Scalar::ZERO; 2];

        c[fake] = Scalar::random(rng);
        z[fake] = Scalar::random(rng);
        a[fake] = RistrettoPoint::mul_base(&z[fake]) - c[fake] * ct.e1;
        b[fake] = z[fake] * h - c[fake] * targets[fake];

        let w = Scalar::random(rng);
        a[real] = RistrettoPoint::mul_base(&w);
        b[real] = w * h;

        let total = Self::challenge(pk, ct, &a, &b, context);
        c[real] = total - c[fake];
        z[real] = w + c[real] * r;

        Self { a, b, c, z }
    }

    pub(crate) fn verify(&self, pk: &ElectionPublicKey, ct: &Ciphertext, context: &[u8]) -> bool {
        let total = Self::challenge(pk, ct, &self.a, &self.b, context);
        if self.c[0] + self.c[1] != total {
            return false;
        }
        let h = *pk.point();
        let targets = [ct.e2, ct.e2 - RISTRETTO_BASEPOINT_POINT];
        (0..2).all(|j| {
            RistrettoPoint::mul_base(&self.z[j]) == self.a[j] + self.c[j] * ct.e1
                && self.z[j] * h == self.b[j] + self.c[j] * targets[j]
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        let mut out = [0u8; Self::BYTES_LEN];
        let chunks = [
            compress(&self.a[0]),
            compress(&self.b[0]),
            compress(&self.a[1]),
            compress(&self.b[1]),
            self.c[0].to_bytes(),
            self.c[1].to_bytes(),
            self.z[0].to_bytes(),
            self.z[1].to_bytes(),
        ];
        for (slot, chunk) in out.chunks_exact_mut(32).zip(chunks.iter()) {
            slot.copy_from_slice(chunk);
        }
        out
    }

    pub fn from_bytes(bytes: &[u8; Self::BYTES_LEN]) -> Result<Self, CryptoError> {
        let part = |i: usize| &bytes[i * 32..(i + 1) * 32];
        Ok(Self {
            a: [read_point(part(0))?, read_point(part(2))?],
            b: [read_point(part(1))?, read_point(part(3))?],
            c: [read_scalar(part(4))?, read_scalar(part(5))?],
            z: [read_scalar(part(6))?, read_scalar(part(7))?],
        })
    }
}

/// Chaum–Pedersen proof that the sum of all option ciphertexts encrypts exactly 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SumProof {
    a: RistrettoPoint,
    b: RistrettoPoint,
    z: Scalar,
}

impl SumProof {
    pub const BYTES_LEN: usize = 96;

    fn challenge(
        pk: &ElectionPublicKey,
        sum: &Ciphertext,
        a: &RistrettoPoint,
        b: &RistrettoPoint,
        context: &[u8],
    ) -> Scalar {
        challenge(&[
            SUM_PROOF_DOMAIN,
            context,
            &pk.to_bytes(),
            &sum.to_bytes(),
            &compress(a),
            &compress(b),
        ])
    }

    /// `randomness` is the sum of the per-option encryption randomness.
    pub(crate) fn prove<R: RngCore + CryptoRng>(
        pk: &ElectionPublicKey,
        sum: &Ciphertext,
        randomness: &Scalar,
        context: &[u8],
        rng: &mut R,
    ) -> Self {
        let w = Scalar::random(rng);
        let a = RistrettoPoint::mul_base(&w);
        let b = w * pk.point();
        let c = Self::challenge(pk, sum, &a, &b, context);
        Self {
            a,
            b,
            z: w + c * randomness,
        }
    }

    pub(crate) fn verify(&self, pk: &ElectionPublicKey, sum: &Ciphertext, context: &[u8]) -> bool {
        let c = Self::challenge(pk, sum, &self.a, &self.b, context);
        RistrettoPoint::mul_base(&self.z) == self.a + c * sum.e1
            && self.z * pk.point() == self.b + c * (sum.e2 - RISTRETTO_BASEPOINT_POINT)
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES_LEN] {
        let mut out = [0u8; Self::BYTES_LEN];
        out[..32].copy_from_slice(&compress(&self.a));
        out[32..64].copy_from_slice(&compress(&self.b));
        out[64..].copy_from_slice(self.z.as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; Self::BYTES_LEN]) -> Result<Self, CryptoError> {
        Ok(Self {
            a: read_point(&bytes[..32])?,
            b: read_point(&bytes[32..64])?,
            z: read_scalar(&bytes[64..])?,
        })
    }
}
