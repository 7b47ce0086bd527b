//! # Canonical Committee
//!
//! An ordered validator snapshot that fixes what each bitset position means.
//!
//! Ordering rules:
//! - members sorted ascending by compressed public-key bytes
//! - duplicate keys merged, weights summed
//! - zero-weight entries dropped
//!
//! Every snapshot carries an `epoch`. Bitsets are only meaningful against the
//! snapshot they were produced for.

use std::collections::HashMap;

use shared_crypto::{BlsPublicKey, PUBLIC_KEY_LEN};

use super::bitset::SignerBitset;
use super::errors::{CommitteeMismatch, WarpError};

/// One weighted signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitteeMember {
    /// BLS public key.
    pub public_key: BlsPublicKey,
    /// Stake weight.
    pub weight: u64,
}

/// Canonically ordered committee at a given epoch.
#[derive(Clone, Debug)]
pub struct Committee {
    epoch: u64,
    members: Vec<CommitteeMember>,
    total_weight: u64,
    index: HashMap<[u8; PUBLIC_KEY_LEN], usize>,
}

impl Committee {
    /// Build the canonical snapshot from unordered `(key, weight)` entries.
    pub fn new(
        epoch: u64,
        entries: impl IntoIterator<Item = (BlsPublicKey, u64)>,
    ) -> Result<Self, WarpError> {
        let mut merged: Vec<CommitteeMember> = Vec::new();
        let mut sorted: Vec<(BlsPublicKey, u64)> =
            entries.into_iter().filter(|(_, w)| *w > 0).collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        for (public_key, weight) in sorted {
            match merged.last_mut() {
                Some(last) if last.public_key == public_key => {
                    last.weight = last.weight.checked_add(weight).ok_or_else(|| {
                        WarpError::InvalidCommittee("member weight overflows u64".into())
                    })?;
                }
                _ => merged.push(CommitteeMember { public_key, weight }),
            }
        }

        if merged.is_empty() {
            return Err(WarpError::InvalidCommittee(
                "committee has no weighted members".into(),
            ));
        }

        let total_weight = merged
            .iter()
            .try_fold(0u64, |acc, m| acc.checked_add(m.weight))
            .ok_or_else(|| WarpError::InvalidCommittee("total weight overflows u64".into()))?;

        let index = merged
            .iter()
            .enumerate()
            .map(|(i, m)| (m.public_key.to_bytes(), i))
            .collect();

        Ok(Self {
            epoch,
            members: merged,
            total_weight,
            index,
        })
    }

    /// Snapshot epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true for a constructed committee.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member weights.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Members in canonical order.
    pub fn members(&self) -> &[CommitteeMember] {
        &self.members
    }

    /// Member at a canonical index.
    pub fn member(&self, index: usize) -> Option<&CommitteeMember> {
        self.members.get(index)
    }

    /// Resolve a signer's canonical index.
    pub fn index_of(&self, public_key: &BlsPublicKey) -> Result<usize, WarpError> {
        self.index.get(public_key.as_bytes()).copied().ok_or_else(|| {
            CommitteeMismatch::UnknownSigner {
                public_key: hex::encode(public_key.as_bytes()),
            }
            .into()
        })
    }

    /// Fail if the bitset references a position outside the committee.
    pub fn check_bitset(&self, bitset: &SignerBitset) -> Result<(), WarpError> {
        match bitset.max_index() {
            Some(index) if index >= self.members.len() => {
                Err(CommitteeMismatch::IndexOutOfRange {
                    index,
                    size: self.members.len(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    /// Combined weight of the signers in `bitset`.
    pub fn weight_of(&self, bitset: &SignerBitset) -> Result<u64, WarpError> {
        self.check_bitset(bitset)?;
        // total_weight fits in u64, so any subset does too
        Ok(bitset.iter().map(|i| self.members[i].weight).sum())
    }

    /// Public keys of the signers in `bitset`, in canonical order.
    pub fn public_keys_of(&self, bitset: &SignerBitset) -> Result<Vec<BlsPublicKey>, WarpError> {
        self.check_bitset(bitset)?;
        Ok(bitset
            .iter()
            .map(|i| self.members[i].public_key.clone())
            .collect())
    }
}
