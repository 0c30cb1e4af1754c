use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid extended secret key encoding")]
    InvalidKeyEncoding,

    #[error("encryption key is not a valid group element")]
    InvalidEncryptionKey,

    #[error("choice {choice} is out of range for {num_options} options")]
    InvalidChoice { choice: u8, num_options: u8 },

    #[error("malformed ballot: {0}")]
    MalformedBallot(String),
}
