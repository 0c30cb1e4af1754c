//! Account transactions carrying a single certificate.
//!
//! ```text
//! fragment = tag:u8 ‖ body ‖ witness
//! body     = certificate ‖ nb_inputs:u8 ‖ nb_outputs:u8 ‖ valid_until ‖ input
//! input    = 0xff ‖ value:u64 ‖ account[32]
//! witness  = 0x02 ‖ lane:u8 ‖ counter:u32 ‖ signature[64]
//! ```
//!
//! The witness signs `0x02 ‖ chain_tag ‖ blake2b256(body) ‖ lane ‖ counter`, so
//! a signature is bound to one chain, one spending counter and one body.

use ballot_crypto::{blake2b_256, hash_fragment, verify_signature, Signer};
use ballot_types::{
    BlockDate, FragmentId, HeaderId, PublicKey, ReadBuf, Signature, SpendingCounter, TypesError,
    Value, WriteBuf,
};
use tracing::debug;

use crate::certificate::Certificate;
use crate::error::TransactionError;

/// Marks an input as spending from an account.
pub const ACCOUNT_INPUT_TAG: u8 = 0xff;
/// Marks a witness as an account witness.
pub const ACCOUNT_WITNESS_TAG: u8 = 0x02;

/// Spend `value` from `account`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    pub value: Value,
    pub account: PublicKey,
}

impl Input {
    fn write(&self, buf: &mut WriteBuf) {
        buf.put_u8(ACCOUNT_INPUT_TAG)
            .put_u64(self.value.0)
            .put_bytes(&self.account.0);
    }

    fn read(buf: &mut ReadBuf<'_>) -> Result<Self, TransactionError> {
        let tag = buf.get_u8()?;
        if tag != ACCOUNT_INPUT_TAG {
            return Err(TransactionError::malformed(format!("unsupported input tag {tag:#04x}")));
        }
        Ok(Self {
            value: Value(buf.get_u64()?),
            account: PublicKey(buf.get_array()?),
        })
    }
}

/// The account's authorisation of a transaction body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountWitness {
    pub counter: SpendingCounter,
    pub signature: Signature,
}

impl AccountWitness {
    fn write(&self, buf: &mut WriteBuf) {
        buf.put_u8(ACCOUNT_WITNESS_TAG)
            .put_u8(self.counter.lane)
            .put_u32(self.counter.value)
            .put_bytes(&self.signature.0);
    }

    fn read(buf: &mut ReadBuf<'_>) -> Result<Self, TransactionError> {
        let tag = buf.get_u8()?;
        if tag != ACCOUNT_WITNESS_TAG {
            return Err(TransactionError::malformed(format!(
                "unsupported witness tag {tag:#04x}"
            )));
        }
        let counter = SpendingCounter::new(buf.get_u8()?, buf.get_u32()?);
        if !counter.is_valid_lane() {
            return Err(TypesError::InvalidLane(counter.lane).into());
        }
        Ok(Self {
            counter,
            signature: Signature(buf.get_array()?),
        })
    }
}

/// The bytes an account witness signs.
pub fn witness_data(
    chain_tag: &HeaderId,
    body_hash: &[u8; 32],
    counter: SpendingCounter,
) -> Vec<u8> {
    let mut buf = WriteBuf::with_capacity(1 + 32 + 32 + 1 + 4);
    buf.put_u8(ACCOUNT_WITNESS_TAG)
        .put_bytes(chain_tag.as_bytes())
        .put_bytes(body_hash)
        .put_u8(counter.lane)
        .put_u32(counter.value);
    buf.into_vec()
}

/// A transaction body awaiting its witness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub certificate: Certificate,
    pub valid_until: BlockDate,
    pub input: Input,
}

impl UnsignedTransaction {
    pub fn new(certificate: Certificate, valid_until: BlockDate, input: Input) -> Self {
        Self {
            certificate,
            valid_until,
            input,
        }
    }

    fn write_body(&self, buf: &mut WriteBuf) {
        self.certificate.write(buf);
        buf.put_u8(1)
            .put_u8(0)
            .put_u32(self.valid_until.epoch)
            .put_u32(self.valid_until.slot_id);
        self.input.write(buf);
    }

    pub fn body_bytes(&self) -> Vec<u8> {
        let mut buf = WriteBuf::new();
        self.write_body(&mut buf);
        buf.into_vec()
    }

    /// Sign with `signer` using `counter` as the replay nonce.
    pub fn sign(
        self,
        chain_tag: &HeaderId,
        counter: SpendingCounter,
        signer: &impl Signer,
    ) -> Transaction {
        let body_hash = blake2b_256(&self.body_bytes());
        let signature = signer.sign(&witness_data(chain_tag, &body_hash, counter));
        Transaction {
            unsigned: self,
            witness: AccountWitness { counter, signature },
        }
    }
}

/// A signed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    unsigned: UnsignedTransaction,
    witness: AccountWitness,
}

impl Transaction {
    pub fn certificate(&self) -> &Certificate {
        &self.unsigned.certificate
    }

    pub fn valid_until(&self) -> BlockDate {
        self.unsigned.valid_until
    }

    pub fn input(&self) -> &Input {
        &self.unsigned.input
    }

    pub fn witness(&self) -> &AccountWitness {
        &self.witness
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = WriteBuf::new();
        buf.put_u8(self.unsigned.certificate.fragment_tag());
        self.unsigned.write_body(&mut buf);
        self.witness.write(&mut buf);
        buf.into_vec()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, TransactionError> {
        Self::decode(bytes).map_err(|e| {
            debug!(len = bytes.len(), error = %e, "rejected fragment");
            e
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut buf = ReadBuf::new(bytes);
        let tag = buf.get_u8()?;
        let certificate = Certificate::read(tag, &mut buf)?;

        let nb_inputs = buf.get_u8()?;
        let nb_outputs = buf.get_u8()?;
        if nb_inputs != 1 || nb_outputs != 0 {
            return Err(TransactionError::malformed(format!(
                "expected one account input and no outputs, got {nb_inputs}/{nb_outputs}"
            )));
        }
        let valid_until = BlockDate::new(buf.get_u32()?, buf.get_u32()?);
        let input = Input::read(&mut buf)?;
        let witness = AccountWitness::read(&mut buf)?;
        buf.expect_end()?;

        Ok(Self {
            unsigned: UnsignedTransaction::new(certificate, valid_until, input),
            witness,
        })
    }

    /// Check the witness signature against the input account under `chain_tag`.
    pub fn verify(&self, chain_tag: &HeaderId) -> Result<(), TransactionError> {
        let body_hash = blake2b_256(&self.unsigned.body_bytes());
        let message = witness_data(chain_tag, &body_hash, self.witness.counter);
        if verify_signature(&message, &self.witness.signature, &self.unsigned.input.account) {
            Ok(())
        } else {
            Err(TransactionError::InvalidSignature)
        }
    }

    pub fn fragment_id(&self) -> FragmentId {
        hash_fragment(&self.serialize())
    }
}
