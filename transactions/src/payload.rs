//! Ballot payloads.
//!
//! A public payload carries the choice in the clear. A private payload carries
//! one ElGamal ciphertext per option plus a proof that exactly one of them
//! encrypts 1, so a tally authority can sum ballots without learning any
//! individual choice.

use ballot_crypto::{
    encrypt_vote, verify_vote, CryptoError, ElectionPublicKey, EncryptedVote, ProofOfCorrectVote,
};
use ballot_types::{ReadBuf, VotePlanId, WriteBuf};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::TransactionError;

/// Wire discriminant of a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PayloadType {
    Public = 1,
    Private = 2,
}

/// Strategy that turns a plaintext choice into an encrypted ballot and its proof.
pub trait PayloadEncoder {
    fn encode(
        &mut self,
        vote_plan: &VotePlanId,
        num_options: u8,
        choice: u8,
        encryption_key: &ElectionPublicKey,
    ) -> Result<(EncryptedVote, ProofOfCorrectVote), CryptoError>;
}

/// Unit-vector ElGamal encoder. The vote plan id is the proof context.
#[derive(Debug)]
pub struct UnitVectorEncoder<R = OsRng> {
    rng: R,
}

impl UnitVectorEncoder<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for UnitVectorEncoder<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> UnitVectorEncoder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> PayloadEncoder for UnitVectorEncoder<R> {
    fn encode(
        &mut self,
        vote_plan: &VotePlanId,
        num_options: u8,
        choice: u8,
        encryption_key: &ElectionPublicKey,
    ) -> Result<(EncryptedVote, ProofOfCorrectVote), CryptoError> {
        encrypt_vote(
            encryption_key,
            num_options,
            choice,
            vote_plan.as_bytes(),
            &mut self.rng,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Public {
        choice: u8,
    },
    Private {
        encrypted_vote: EncryptedVote,
        proof: ProofOfCorrectVote,
    },
}

impl Payload {
    pub fn new_public(choice: u8) -> Self {
        Self::Public { choice }
    }

    /// Encrypt `choice` out of `num_options` under `encryption_key`.
    pub fn new_private(
        vote_plan: &VotePlanId,
        num_options: u8,
        choice: u8,
        encryption_key: &[u8],
    ) -> Result<Self, TransactionError> {
        Self::new_private_with(
            &mut UnitVectorEncoder::new(),
            vote_plan,
            num_options,
            choice,
            encryption_key,
        )
    }

    /// Like [`Payload::new_private`], with a caller-supplied encoder.
    pub fn new_private_with<E: PayloadEncoder>(
        encoder: &mut E,
        vote_plan: &VotePlanId,
        num_options: u8,
        choice: u8,
        encryption_key: &[u8],
    ) -> Result<Self, TransactionError> {
        if choice >= num_options {
            return Err(CryptoError::InvalidChoice {
                choice,
                num_options,
            }
            .into());
        }
        let key = ElectionPublicKey::from_bytes(encryption_key)?;
        let (encrypted_vote, proof) = encoder.encode(vote_plan, num_options, choice, &key)?;
        Ok(Self::Private {
            encrypted_vote,
            proof,
        })
    }

    pub fn payload_type(&self) -> PayloadType {
        match self {
            Self::Public { .. } => PayloadType::Public,
            Self::Private { .. } => PayloadType::Private,
        }
    }

    /// Check the ballot proof of a private payload. Public payloads carry no
    /// proof and always pass.
    pub fn verify(&self, vote_plan: &VotePlanId, encryption_key: &ElectionPublicKey) -> bool {
        match self {
            Self::Public { .. } => true,
            Self::Private {
                encrypted_vote,
                proof,
            } => verify_vote(encryption_key, encrypted_vote, proof, vote_plan.as_bytes()),
        }
    }

    pub fn write(&self, buf: &mut WriteBuf) {
        buf.put_u8(self.payload_type() as u8);
        match self {
            Self::Public { choice } => {
                buf.put_u8(*choice);
            }
            Self::Private {
                encrypted_vote,
                proof,
            } => {
                buf.put_u8(encrypted_vote.num_options());
                encrypted_vote.write(buf);
                proof.write(buf);
            }
        }
    }

    pub fn read(buf: &mut ReadBuf<'_>) -> Result<Self, TransactionError> {
        match buf.get_u8()? {
            t if t == PayloadType::Public as u8 => Ok(Self::Public {
                choice: buf.get_u8()?,
            }),
            t if t == PayloadType::Private as u8 => {
                let num_options = buf.get_u8()?;
                if num_options == 0 {
                    return Err(TransactionError::malformed("private ballot with no options"));
                }
                let encrypted_vote = EncryptedVote::read(buf, num_options)?;
                let proof = ProofOfCorrectVote::read(buf, num_options)?;
                Ok(Self::Private {
                    encrypted_vote,
                    proof,
                })
            }
            t => Err(TransactionError::malformed(format!("unknown payload type {t}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_crypto::ElectionSecretKey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan() -> VotePlanId {
        VotePlanId::from([3u8; 32])
    }

    fn encode(payload: &Payload) -> Vec<u8> {
        let mut buf = WriteBuf::new();
        payload.write(&mut buf);
        buf.into_vec()
    }

    #[test]
    fn public_layout() {
        assert_eq!(encode(&Payload::new_public(5)), vec![0x01, 5]);
    }

    #[test]
    fn private_payload_decrypts_to_choice() {
        let mut rng = StdRng::seed_from_u64(1);
        let sk = ElectionSecretKey::generate(&mut rng);
        let pk = sk.public_key();
        let mut encoder = UnitVectorEncoder::with_rng(rng);

        let payload =
            Payload::new_private_with(&mut encoder, &plan(), 4, 2, &pk.to_bytes()).unwrap();
        assert!(payload.verify(&plan(), &pk));
        assert!(!payload.verify(&VotePlanId::from([4u8; 32]), &pk));
        match &payload {
            Payload::Private { encrypted_vote, .. } => {
                assert_eq!(sk.decrypt_vote(encrypted_vote), Some(2))
            }
            Payload::Public { .. } => panic!("expected private payload"),
        }
    }

    #[test]
    fn private_layout_and_decode() {
        let mut rng = StdRng::seed_from_u64(2);
        let pk = ElectionSecretKey::generate(&mut rng).public_key();
        let payload = Payload::new_private_with(
            &mut UnitVectorEncoder::with_rng(rng),
            &plan(),
            3,
            0,
            &pk.to_bytes(),
        )
        .unwrap();

        let bytes = encode(&payload);
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 3);
        assert_eq!(bytes.len(), 2 + 3 * 64 + 3 * 256 + 96);

        let mut reader = ReadBuf::new(&bytes);
        assert_eq!(Payload::read(&mut reader).unwrap(), payload);
        assert!(reader.is_end());
    }

    #[test]
    fn invalid_choice_checked_before_key() {
        let err = Payload::new_private(&plan(), 4, 4, &[0u8; 3]).unwrap_err();
        assert_eq!(
            err,
            TransactionError::Crypto(CryptoError::InvalidChoice {
                choice: 4,
                num_options: 4
            })
        );
    }

    #[test]
    fn invalid_encryption_key() {
        let err = Payload::new_private(&plan(), 4, 1, &[0xFFu8; 32]).unwrap_err();
        assert_eq!(
            err,
            TransactionError::Crypto(CryptoError::InvalidEncryptionKey)
        );
        let err = Payload::new_private(&plan(), 4, 1, &[1u8; 31]).unwrap_err();
        assert_eq!(
            err,
            TransactionError::Crypto(CryptoError::InvalidEncryptionKey)
        );
    }

    #[test]
    fn unknown_payload_type() {
        let bytes = [0x07, 0];
        assert!(matches!(
            Payload::read(&mut ReadBuf::new(&bytes)),
            Err(TransactionError::Malformed { .. })
        ));
    }

    #[test]
    fn private_with_zero_options_is_malformed() {
        let bytes = [0x02, 0];
        assert!(Payload::read(&mut ReadBuf::new(&bytes)).is_err());
    }
}
