//! Cryptographic primitives for the vote-cast wallet.
//!
//! - **Ed25519** (extended secret keys) for account witnesses
//! - **Blake2b** for header hashes, fragment ids and proof challenges
//! - **ElGamal on Ristretto** with unit-vector proofs for private ballots

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod vote;

pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, blake2b_512_multi, hash_fragment, hash_header};
pub use keys::{AccountSecretKey, EXTENDED_SECRET_KEY_SIZE};
pub use sign::{sign_message, verify_signature, Signer};
pub use vote::{
    encrypt_vote, verify_vote, Ciphertext, ElectionPublicKey, ElectionSecretKey, EncryptedVote,
    ProofOfCorrectVote,
};
