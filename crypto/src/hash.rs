//! Blake2b hashing for headers, fragments and proof challenges.

use ballot_types::{FragmentId, HeaderId};
use blake2::digest::consts::{U32, U64};
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;
type Blake2b512 = Blake2b<U64>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// 512-bit variant, wide enough to reduce uniformly into a scalar.
pub fn blake2b_512_multi(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Hash a serialized block header to produce its `HeaderId`.
pub fn hash_header(header_bytes: &[u8]) -> HeaderId {
    HeaderId::new(blake2b_256(header_bytes))
}

/// Hash a serialized, signed fragment to produce its `FragmentId`.
pub fn hash_fragment(fragment_bytes: &[u8]) -> FragmentId {
    FragmentId::new(blake2b_256(fragment_bytes))
}
