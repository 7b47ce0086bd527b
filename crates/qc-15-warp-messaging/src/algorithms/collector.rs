//! # Signature Collector
//!
//! Order-independent fold over signer contributions. Each contribution is
//! checked against the committee snapshot and the unsigned bytes before it
//! counts; duplicates by index are ignored. Two collectors over the same
//! message and the same snapshot (epoch and members) merge by set union.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared_crypto::BlsSignature;
use tracing::{debug, warn};

use super::signing::aggregate;
use crate::domain::{
    invariant_claimed_index_matches, invariant_same_committee, BitSetSignature, Committee,
    CommitteeMismatch, Quorum, SignatureContribution, SignerBitset, UnsignedMessage, WarpError,
};

/// Accumulates verified contributions for one unsigned message.
#[derive(Clone, Debug)]
pub struct SignatureCollector {
    committee: Arc<Committee>,
    unsigned: UnsignedMessage,
    signatures: BTreeMap<usize, BlsSignature>,
    signed_weight: u64,
}

impl SignatureCollector {
    /// Start collecting for `unsigned` against `committee`.
    pub fn new(committee: Arc<Committee>, unsigned: UnsignedMessage) -> Self {
        Self {
            committee,
            unsigned,
            signatures: BTreeMap::new(),
            signed_weight: 0,
        }
    }

    /// Fold a whole stream of contributions.
    pub fn collect(
        committee: Arc<Committee>,
        unsigned: UnsignedMessage,
        contributions: impl IntoIterator<Item = SignatureContribution>,
    ) -> Result<Self, WarpError> {
        let mut collector = Self::new(committee, unsigned);
        for contribution in contributions {
            collector.add(contribution)?;
        }
        Ok(collector)
    }

    /// Epoch of the committee snapshot.
    pub fn epoch(&self) -> u64 {
        self.committee.epoch()
    }

    /// Committee snapshot the bitset positions refer to.
    pub fn committee(&self) -> &Committee {
        &self.committee
    }

    /// The message being signed.
    pub fn unsigned(&self) -> &UnsignedMessage {
        &self.unsigned
    }

    /// Add one contribution.
    ///
    /// Returns `Ok(false)` if the index already contributed.
    pub fn add(&mut self, contribution: SignatureContribution) -> Result<bool, WarpError> {
        let index = self.committee.index_of(&contribution.public_key)?;
        invariant_claimed_index_matches(contribution.claimed_index, index)?;

        if self.signatures.contains_key(&index) {
            debug!(index, "Ignoring duplicate contribution");
            return Ok(false);
        }

        if !contribution
            .public_key
            .verify(self.unsigned.bytes(), &contribution.signature)
        {
            warn!(
                index,
                message_id = %self.unsigned.id(),
                "Rejected contribution with invalid signature"
            );
            return Err(WarpError::Signature(format!(
                "contribution from index {index} does not verify"
            )));
        }

        self.accept(index, contribution.signature)?;
        Ok(true)
    }

    fn accept(&mut self, index: usize, signature: BlsSignature) -> Result<(), WarpError> {
        let member = self
            .committee
            .member(index)
            .ok_or(CommitteeMismatch::IndexOutOfRange {
                index,
                size: self.committee.len(),
            })?;
        self.signed_weight += member.weight;
        self.signatures.insert(index, signature);
        debug!(
            index,
            signed_weight = self.signed_weight,
            total_weight = self.committee.total_weight(),
            "Accepted contribution"
        );
        Ok(())
    }

    /// Union with another collector over the same message and snapshot.
    ///
    /// Bit positions only carry meaning within one snapshot, so a committee
    /// that shares the epoch number but not the members is rejected.
    pub fn merge(&mut self, other: &SignatureCollector) -> Result<(), WarpError> {
        invariant_same_committee(&self.committee, &other.committee)?;
        if other.unsigned != self.unsigned {
            return Err(WarpError::Signature(format!(
                "cannot merge contributions for message {} into {}",
                other.unsigned.id(),
                self.unsigned.id()
            )));
        }
        for (index, signature) in &other.signatures {
            if !self.signatures.contains_key(index) {
                self.accept(*index, signature.clone())?;
            }
        }
        Ok(())
    }

    /// Indices that have contributed.
    pub fn signers(&self) -> SignerBitset {
        self.signatures.keys().copied().collect()
    }

    /// Weight of the contributors.
    pub fn signed_weight(&self) -> u64 {
        self.signed_weight
    }

    /// True once the contributors meet `quorum`.
    pub fn has_quorum(&self, quorum: &Quorum) -> bool {
        quorum.is_met(self.signed_weight, self.committee.total_weight())
    }

    /// Aggregate everything collected so far.
    pub fn finish(&self) -> Result<BitSetSignature, WarpError> {
        if self.signatures.is_empty() {
            return Err(WarpError::Signature("no contributions collected".into()));
        }
        let signatures: Vec<BlsSignature> = self.signatures.values().cloned().collect();
        let aggregate = aggregate(&signatures)?;
        Ok(BitSetSignature::new(&self.signers(), &aggregate))
    }

    /// Aggregate, failing if `quorum` is not met.
    pub fn finish_with_quorum(&self, quorum: &Quorum) -> Result<BitSetSignature, WarpError> {
        if !self.has_quorum(quorum) {
            return Err(quorum.shortfall(self.signed_weight, self.committee.total_weight()));
        }
        self.finish()
    }
}
