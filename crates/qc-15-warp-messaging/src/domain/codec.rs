//! # Binary Codec
//!
//! Canonical big-endian packing shared by every Warp structure.
//!
//! - Integers are big-endian, fixed width.
//! - Byte strings and lists carry a `u32` element count.
//! - Top-level blobs start with a `u16` codec version.
//!
//! Decoding is strict: truncation, oversized length prefixes and trailing
//! bytes are all errors, so every value has exactly one encoding.

use super::errors::DecodeError;

/// Current codec version.
pub const CODEC_VERSION: u16 = 0;

/// Largest blob accepted by any decoder (256 KiB).
pub const MAX_MESSAGE_SIZE: usize = 256 * 1024;

/// Append-only encoder.
#[derive(Debug, Default)]
pub struct Packer {
    bytes: Vec<u8>,
}

impl Packer {
    /// Create an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a packer that already holds the codec version.
    pub fn versioned() -> Self {
        let mut packer = Self::new();
        packer.pack_u16(CODEC_VERSION);
        packer
    }

    /// Append a byte.
    pub fn pack_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Append a big-endian `u16`.
    pub fn pack_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian `u32`.
    pub fn pack_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian `u64`.
    pub fn pack_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a boolean as one byte.
    pub fn pack_bool(&mut self, value: bool) {
        self.pack_u8(u8::from(value));
    }

    /// Append bytes verbatim, no length prefix.
    pub fn pack_fixed(&mut self, value: &[u8]) {
        self.bytes.extend_from_slice(value);
    }

    /// Append a `u32` length followed by the bytes.
    pub fn pack_bytes(&mut self, value: &[u8]) {
        self.pack_u32(value.len() as u32);
        self.pack_fixed(value);
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the packer.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Cursor-based decoder over a borrowed buffer.
#[derive(Debug)]
pub struct Unpacker<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Unpacker<'a> {
    /// Wrap a buffer, rejecting anything above [`MAX_MESSAGE_SIZE`].
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.len() > MAX_MESSAGE_SIZE {
            return Err(DecodeError::TooLarge {
                size: bytes.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        Ok(Self { bytes, offset: 0 })
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(DecodeError::Truncated { needed, remaining });
        }
        let start = self.offset;
        self.offset += needed;
        Ok(&self.bytes[start..self.offset])
    }

    /// Read a fixed-width array.
    pub fn unpack_fixed<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a byte.
    pub fn unpack_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian `u16`.
    pub fn unpack_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.unpack_fixed()?))
    }

    /// Read a big-endian `u32`.
    pub fn unpack_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.unpack_fixed()?))
    }

    /// Read a big-endian `u64`.
    pub fn unpack_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.unpack_fixed()?))
    }

    /// Read a boolean, accepting only 0 and 1.
    pub fn unpack_bool(&mut self) -> Result<bool, DecodeError> {
        match self.unpack_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidBool(other)),
        }
    }

    /// Read a `u32`-prefixed byte string.
    pub fn unpack_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let declared = self.unpack_count(1)?;
        Ok(self.take(declared)?.to_vec())
    }

    /// Read a `u32` element count and check that `count * elem_size` bytes
    /// remain, so callers never allocate for data that is not there.
    pub fn unpack_count(&mut self, elem_size: usize) -> Result<usize, DecodeError> {
        let count = self.unpack_u32()? as usize;
        let declared = count.saturating_mul(elem_size);
        let remaining = self.remaining();
        if declared > remaining {
            return Err(DecodeError::LengthOverflow {
                declared,
                remaining,
            });
        }
        Ok(count)
    }

    /// Read and check the codec version.
    pub fn unpack_version(&mut self) -> Result<(), DecodeError> {
        match self.unpack_u16()? {
            CODEC_VERSION => Ok(()),
            found => Err(DecodeError::UnknownCodecVersion { found }),
        }
    }

    /// Require that the whole buffer was consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingBytes { remaining }),
        }
    }
}
