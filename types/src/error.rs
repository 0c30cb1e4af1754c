//! Top-level error type for the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid identifier length: expected {expected} bytes, got {got}")]
    InvalidIdentifierLength { expected: usize, got: usize },

    #[error("invalid lane {0}: lanes are 0..{max}", max = crate::counter::MAX_LANES)]
    InvalidLane(u8),

    #[error("spending counter for lane {lane} is exhausted")]
    CounterOverflow { lane: u8 },

    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after end of structure")]
    TrailingBytes(usize),

    #[error("invalid block date: {0}")]
    InvalidBlockDate(String),

    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),
}
