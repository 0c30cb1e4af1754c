use ballot_types::{ReadBuf, WriteBuf};
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

use super::elgamal::{Ciphertext, ElectionPublicKey, ElectionSecretKey};
use super::proof::{BitProof, SumProof};
use crate::error::CryptoError;

/// One ciphertext per option; exactly one encrypts 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedVote(Vec<Ciphertext>);

/// Proof that an [`EncryptedVote`] encrypts a unit vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofOfCorrectVote {
    bits: Vec<BitProof>,
    sum: SumProof,
}

fn malformed(e: impl std::fmt::Display) -> CryptoError {
    CryptoError::MalformedBallot(e.to_string())
}

impl EncryptedVote {
    pub fn num_options(&self) -> u8 {
        self.0.len() as u8
    }

    pub fn ciphertexts(&self) -> &[Ciphertext] {
        &self.0
    }

    /// Homomorphic sum of all option ciphertexts.
    pub fn sum(&self) -> Ciphertext {
        self.0.iter().fold(Ciphertext::zero(), |acc, ct| acc + *ct)
    }

    /// Component-wise sum of several votes with the same option count.
    ///
    /// Returns `None` if the votes disagree on the number of options or the
    /// iterator is empty.
    pub fn combine<'a, I>(votes: I) -> Option<EncryptedVote>
    where
        I: IntoIterator<Item = &'a EncryptedVote>,
    {
        let mut iter = votes.into_iter();
        let mut acc = iter.next()?.clone();
        for vote in iter {
            if vote.0.len() != acc.0.len() {
                return None;
            }
            for (a, b) in acc.0.iter_mut().zip(vote.0.iter()) {
                *a = *a + *b;
            }
        }
        Some(acc)
    }

    pub fn write(&self, buf: &mut WriteBuf) {
        for ct in &self.0 {
            buf.put_bytes(&ct.to_bytes());
        }
    }

    pub fn read(buf: &mut ReadBuf<'_>, num_options: u8) -> Result<Self, CryptoError> {
        let mut cts = Vec::with_capacity(num_options as usize);
        for _ in 0..num_options {
            let bytes = buf.get_array::<{ Ciphertext::BYTES_LEN }>().map_err(malformed)?;
            cts.push(Ciphertext::from_bytes(&bytes)?);
        }
        Ok(Self(cts))
    }
}

impl ProofOfCorrectVote {
    pub fn write(&self, buf: &mut WriteBuf) {
        for bit in &self.bits {
            buf.put_bytes(&bit.to_bytes());
        }
        buf.put_bytes(&self.sum.to_bytes());
    }

    pub fn read(buf: &mut ReadBuf<'_>, num_options: u8) -> Result<Self, CryptoError> {
        let mut bits = Vec::with_capacity(num_options as usize);
        for _ in 0..num_options {
            let bytes = buf.get_array::<{ BitProof::BYTES_LEN }>().map_err(malformed)?;
            bits.push(BitProof::from_bytes(&bytes)?);
        }
        let bytes = buf.get_array::<{ SumProof::BYTES_LEN }>().map_err(malformed)?;
        Ok(Self {
            bits,
            sum: SumProof::from_bytes(&bytes)?,
        })
    }
}

/// Encrypt `choice` as a unit vector of length `num_options` and prove it well formed.
///
/// `context` is bound into every proof challenge (typically the vote plan id),
/// so a ballot cannot be lifted into a different vote.
pub fn encrypt_vote<R: RngCore + CryptoRng>(
    pk: &ElectionPublicKey,
    num_options: u8,
    choice: u8,
    context: &[u8],
    rng: &mut R,
) -> Result<(EncryptedVote, ProofOfCorrectVote), CryptoError> {
    if choice >= num_options {
        return Err(CryptoError::InvalidChoice {
            choice,
            num_options,
        });
    }

    let mut cts = Vec::with_capacity(num_options as usize);
    let mut bits = Vec::with_capacity(num_options as usize);
    let mut total_randomness = Scalar::ZERO;
    for option in 0..num_options {
        let bit = option == choice;
        let r = Scalar::random(rng);
        let ct = pk.encrypt_bit(bit, &r);
        bits.push(BitProof::prove(pk, &ct, bit, &r, context, rng));
        cts.push(ct);
        total_randomness += r;
    }

    let vote = EncryptedVote(cts);
    let sum = SumProof::prove(pk, &vote.sum(), &total_randomness, context, rng);
    Ok((vote, ProofOfCorrectVote { bits, sum }))
}

/// Check that `vote` encrypts a unit vector under `pk`.
pub fn verify_vote(
    pk: &ElectionPublicKey,
    vote: &EncryptedVote,
    proof: &ProofOfCorrectVote,
    context: &[u8],
) -> bool {
    if vote.0.is_empty() || vote.0.len() != proof.bits.len() {
        return false;
    }
    vote.0
        .iter()
        .zip(proof.bits.iter())
        .all(|(ct, bit)| bit.verify(pk, ct, context))
        && proof.sum.verify(pk, &vote.sum(), context)
}

impl ElectionSecretKey {
    /// Recover the chosen option of a single vote.
    pub fn decrypt_vote(&self, vote: &EncryptedVote) -> Option<u8> {
        let mut chosen = None;
        for (index, ct) in vote.0.iter().enumerate() {
            match self.decrypt_small(ct, 1)? {
                0 => {}
                _ if chosen.is_none() => chosen = Some(index as u8),
                _ => return None,
            }
        }
        chosen
    }

    /// Decrypt per-option totals of a combined tally of at most `max_votes` ballots.
    pub fn decrypt_tally(&self, tally: &EncryptedVote, max_votes: u64) -> Option<Vec<u64>> {
        tally
            .0
            .iter()
            .map(|ct| self.decrypt_small(ct, max_votes))
            .collect()
    }
}
