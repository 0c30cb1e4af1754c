//! Ed25519 message signing and verification.

use ballot_types::{PublicKey, Signature};
use ed25519_dalek::{Verifier, VerifyingKey};
use sha2::Sha512;

use crate::keys::AccountSecretKey;

/// Capability to sign on behalf of an account.
pub trait Signer {
    /// The account the signatures verify against.
    fn public_key(&self) -> PublicKey;

    fn sign(&self, message: &[u8]) -> Signature;
}

impl Signer for AccountSecretKey {
    fn public_key(&self) -> PublicKey {
        AccountSecretKey::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Signature {
        let sig = ed25519_dalek::hazmat::raw_sign::<Sha512>(
            self.expanded(),
            message,
            self.verifying_key(),
        );
        Signature(sig.to_bytes())
    }
}

/// Sign a message with an account key, returning the signature.
pub fn sign_message(message: &[u8], key: &impl Signer) -> Signature {
    key.sign(message)
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: u8) -> AccountSecretKey {
        AccountSecretKey::from_seed(&[seed; 32]).unwrap()
    }

    #[test]
    fn sign_and_verify() {
        let kp = key(1);
        let msg = b"cast ballot";
        let sig = sign_message(msg, &kp);
        assert!(verify_signature(msg, &sig, &kp.public_key()));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = key(2);
        let sig = sign_message(b"correct message", &kp);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public_key()));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = key(3);
        let kp2 = key(4);
        let sig = sign_message(b"test", &kp1);
        assert!(!verify_signature(b"test", &sig, &kp2.public_key()));
    }

    #[test]
    fn matches_standard_ed25519_for_seed_keys() {
        use ed25519_dalek::Signer as _;
        let seed = [99u8; 32];
        let ours = sign_message(b"interop", &key(99));
        let theirs = ed25519_dalek::SigningKey::from_bytes(&seed).sign(b"interop");
        assert_eq!(ours.0, theirs.to_bytes());
    }

    #[test]
    fn invalid_public_key() {
        let kp = key(5);
        let sig = sign_message(b"test", &kp);
        let bad_key = PublicKey([0xFF; 32]);
        assert!(!verify_signature(b"test", &sig, &bad_key));
    }
}
