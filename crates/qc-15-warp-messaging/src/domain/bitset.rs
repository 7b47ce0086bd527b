//! # Signer Bitset
//!
//! Set of canonical committee indices. The wire form is the big-endian,
//! minimal-length encoding of `Σ 2^i`: index 0 is the low bit of the last
//! byte, the empty set is zero bytes, and a leading zero byte is rejected.

use std::collections::BTreeSet;

use super::errors::DecodeError;

/// Committee indices that contributed to an aggregate signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignerBitset {
    indices: BTreeSet<usize>,
}

impl SignerBitset {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect indices, ignoring duplicates.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Add an index. Returns false if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Set union.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            indices: self.indices.union(&other.indices).copied().collect(),
        }
    }

    /// Membership test.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if no index is set.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Highest index, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.iter().next_back().copied()
    }

    /// Minimal big-endian encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let Some(max) = self.max_index() else {
            return Vec::new();
        };
        let len = max / 8 + 1;
        let mut bytes = vec![0u8; len];
        for index in &self.indices {
            bytes[len - 1 - index / 8] |= 1 << (index % 8);
        }
        bytes
    }

    /// Parse a minimal encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.first() == Some(&0) {
            return Err(DecodeError::NonMinimalBitset);
        }
        let len = bytes.len();
        let mut indices = BTreeSet::new();
        for (pos, byte) in bytes.iter().enumerate() {
            let base = (len - 1 - pos) * 8;
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    indices.insert(base + bit);
                }
            }
        }
        Ok(Self { indices })
    }
}

impl FromIterator<usize> for SignerBitset {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self::from_indices(iter)
    }
}
