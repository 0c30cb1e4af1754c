//! Big-endian byte codec shared by the genesis, certificate and fragment formats.

use crate::error::TypesError;

/// A cursor over a borrowed byte slice.
///
/// Every getter either consumes exactly the requested bytes or fails with
/// [`TypesError::Truncated`] without advancing.
#[derive(Debug, Clone)]
pub struct ReadBuf<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ReadBuf<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn is_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail if any bytes are left over.
    pub fn expect_end(&self) -> Result<(), TypesError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(TypesError::TrailingBytes(n)),
        }
    }

    pub fn get_slice(&mut self, len: usize) -> Result<&'a [u8], TypesError> {
        if self.remaining() < len {
            return Err(TypesError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N], TypesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_slice(N)?);
        Ok(out)
    }

    pub fn get_u8(&mut self) -> Result<u8, TypesError> {
        Ok(self.get_array::<1>()?[0])
    }

    pub fn get_u16(&mut self) -> Result<u16, TypesError> {
        Ok(u16::from_be_bytes(self.get_array()?))
    }

    pub fn get_u32(&mut self) -> Result<u32, TypesError> {
        Ok(u32::from_be_bytes(self.get_array()?))
    }

    pub fn get_u64(&mut self) -> Result<u64, TypesError> {
        Ok(u64::from_be_bytes(self.get_array()?))
    }

    /// Split off a sub-reader over the next `len` bytes.
    pub fn split_to(&mut self, len: usize) -> Result<ReadBuf<'a>, TypesError> {
        self.get_slice(len).map(ReadBuf::new)
    }
}

/// An append-only big-endian writer.
#[derive(Debug, Clone, Default)]
pub struct WriteBuf {
    bytes: Vec<u8>,
}

impl WriteBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn put_u16(&mut self, v: u16) -> &mut Self {
        self.put_bytes(&v.to_be_bytes())
    }

    pub fn put_u32(&mut self, v: u32) -> &mut Self {
        self.put_bytes(&v.to_be_bytes())
    }

    pub fn put_u64(&mut self, v: u64) -> &mut Self {
        self.put_bytes(&v.to_be_bytes())
    }

    pub fn put_bytes(&mut self, v: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(v);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
