//! Private ballots.
//!
//! A vote for option `k` out of `n` is the unit vector `e_k`, each coordinate
//! encrypted under lifted ElGamal on the Ristretto group. Each ciphertext carries a
//! disjunctive Chaum–Pedersen proof that it encrypts 0 or 1, and the homomorphic
//! sum of all ciphertexts carries a proof that it encrypts exactly 1. Ciphertexts
//! add component-wise, so a tally authority holding the [`ElectionSecretKey`] can
//! decrypt per-option totals without learning any individual choice.

mod ballot;
mod elgamal;
mod proof;

pub use ballot::{encrypt_vote, verify_vote, EncryptedVote, ProofOfCorrectVote};
pub use elgamal::{Ciphertext, ElectionPublicKey, ElectionSecretKey};
pub use proof::{BitProof, SumProof};
