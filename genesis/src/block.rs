//! Genesis block (block0) layout.
//!
//! ```text
//! header_size:u16 ‖ header ‖ fragment*
//! header   = version:u16 ‖ content_size:u32 ‖ epoch:u32 ‖ slot:u32
//!            ‖ chain_length:u32 ‖ content_hash[32] ‖ parent_hash[32]
//! fragment = size:u16 ‖ tag:u8 ‖ body
//! ```
//!
//! The first fragment must be the initial fragment carrying the chain's
//! configuration parameters. Any other fragments (initial funds, certificates)
//! are outside the wallet's concern and skipped.

use ballot_crypto::{blake2b_256, hash_header};
use ballot_types::{HeaderId, ReadBuf, WriteBuf};
use tracing::debug;

use crate::config::ConfigParam;
use crate::error::GenesisError;

/// Only header version understood by this decoder.
pub const BLOCK0_VERSION: u16 = 0;
/// Encoded header length, excluding the `header_size` prefix.
pub const HEADER_SIZE: usize = 2 + 4 + 4 + 4 + 4 + 32 + 32;
/// Fragment tag of the initial configuration fragment.
pub const INITIAL_FRAGMENT_TAG: u8 = 0;

/// A decoded block0: its header hash plus the initial configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block0 {
    pub id: HeaderId,
    pub params: Vec<ConfigParam>,
}

impl Block0 {
    pub fn parse(bytes: &[u8]) -> Result<Self, GenesisError> {
        let mut buf = ReadBuf::new(bytes);

        let header_size = buf.get_u16()? as usize;
        if header_size != HEADER_SIZE {
            return Err(GenesisError::malformed(format!(
                "unexpected header size {header_size}"
            )));
        }
        let header_bytes = buf.get_slice(HEADER_SIZE)?;
        let id = hash_header(header_bytes);

        let mut header = ReadBuf::new(header_bytes);
        let version = header.get_u16()?;
        if version != BLOCK0_VERSION {
            return Err(GenesisError::malformed(format!(
                "unsupported block version {version}"
            )));
        }
        let content_size = header.get_u32()? as usize;
        let epoch = header.get_u32()?;
        let slot = header.get_u32()?;
        let chain_length = header.get_u32()?;
        if epoch != 0 || slot != 0 || chain_length != 0 {
            return Err(GenesisError::malformed("block is not at the genesis position"));
        }
        let content_hash = header.get_array::<32>()?;
        let parent = header.get_array::<32>()?;
        if parent != [0u8; 32] {
            return Err(GenesisError::malformed("genesis parent hash is not zero"));
        }

        if buf.remaining() != content_size {
            return Err(GenesisError::malformed(format!(
                "content size {content_size} does not match {} remaining bytes",
                buf.remaining()
            )));
        }
        let content_bytes = buf.get_slice(content_size)?;
        if blake2b_256(content_bytes) != content_hash {
            return Err(GenesisError::malformed("content hash mismatch"));
        }

        let mut content = ReadBuf::new(content_bytes);
        let mut params = None;
        while !content.is_end() {
            let size = content.get_u16()? as usize;
            let mut fragment = content.split_to(size)?;
            let tag = fragment.get_u8()?;
            match (tag, params.is_some()) {
                (INITIAL_FRAGMENT_TAG, false) => params = Some(read_initial(&mut fragment)?),
                (INITIAL_FRAGMENT_TAG, true) => {
                    return Err(GenesisError::malformed("duplicate initial fragment"))
                }
                (_, false) => {
                    return Err(GenesisError::malformed(format!(
                        "first fragment has tag {tag}, expected initial"
                    )))
                }
                (_, true) => debug!(tag, size, "skipping genesis fragment"),
            }
        }

        let params = params.ok_or_else(|| GenesisError::malformed("missing initial fragment"))?;
        Ok(Self { id, params })
    }
}

fn read_initial(buf: &mut ReadBuf<'_>) -> Result<Vec<ConfigParam>, GenesisError> {
    let count = buf.get_u16()?;
    let mut params = Vec::with_capacity(count as usize);
    for _ in 0..count {
        if let Some(param) = ConfigParam::read(buf)? {
            params.push(param);
        }
    }
    buf.expect_end()?;
    Ok(params)
}

/// Builds well-formed genesis blobs.
#[derive(Clone, Debug, Default)]
pub struct Block0Builder {
    params: Vec<ConfigParam>,
    extra_fragments: Vec<(u8, Vec<u8>)>,
}

impl Block0Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: ConfigParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ConfigParam>) -> Self {
        self.params.extend(params);
        self
    }

    /// Append a non-initial fragment after the configuration.
    pub fn fragment(mut self, tag: u8, body: Vec<u8>) -> Self {
        self.extra_fragments.push((tag, body));
        self
    }

    /// Encode the block.
    ///
    /// Fails with [`GenesisError::TooLarge`] when the parameter count or a
    /// fragment exceeds its `u16` length prefix.
    pub fn build(&self) -> Result<Vec<u8>, GenesisError> {
        let mut initial = WriteBuf::new();
        initial.put_u8(INITIAL_FRAGMENT_TAG);
        initial.put_u16(prefix_u16("parameter list", self.params.len())?);
        for param in &self.params {
            param.write(&mut initial);
        }

        let mut content = WriteBuf::new();
        content
            .put_u16(prefix_u16("initial fragment", initial.len())?)
            .put_bytes(initial.as_slice());
        for (tag, body) in &self.extra_fragments {
            content
                .put_u16(prefix_u16("fragment", body.len() + 1)?)
                .put_u8(*tag)
                .put_bytes(body);
        }
        let content_size = u32::try_from(content.len()).map_err(|_| GenesisError::TooLarge {
            what: "block content",
            len: content.len(),
        })?;

        let mut header = WriteBuf::with_capacity(HEADER_SIZE);
        header
            .put_u16(BLOCK0_VERSION)
            .put_u32(content_size)
            .put_u32(0)
            .put_u32(0)
            .put_u32(0)
            .put_bytes(&blake2b_256(content.as_slice()))
            .put_bytes(&[0u8; 32]);

        let mut out = WriteBuf::with_capacity(2 + HEADER_SIZE + content.len());
        out.put_u16(HEADER_SIZE as u16)
            .put_bytes(header.as_slice())
            .put_bytes(content.as_slice());
        Ok(out.into_vec())
    }
}

fn prefix_u16(what: &'static str, len: usize) -> Result<u16, GenesisError> {
    u16::try_from(len).map_err(|_| GenesisError::TooLarge { what, len })
}
