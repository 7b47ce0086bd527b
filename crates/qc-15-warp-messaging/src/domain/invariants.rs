//! # Domain Invariants
//!
//! Rules every signature must satisfy before its aggregate is trusted.

use super::bitset::SignerBitset;
use super::committee::Committee;
use super::errors::{CommitteeMismatch, WarpError};
use super::value_objects::Quorum;

/// Invariant: bitset bytes carry no leading zero byte.
pub fn invariant_minimal_bitset(bytes: &[u8]) -> bool {
    bytes.first() != Some(&0)
}

/// Invariant: every set bit addresses a committee member.
pub fn invariant_signers_in_committee(bitset: &SignerBitset, committee: &Committee) -> bool {
    bitset.max_index().map_or(true, |max| max < committee.len())
}

/// Invariant: signers hold at least the quorum share of total weight.
pub fn invariant_sufficient_weight(
    signed: u64,
    total: u64,
    quorum: &Quorum,
) -> Result<(), WarpError> {
    if quorum.is_met(signed, total) {
        Ok(())
    } else {
        Err(quorum.shortfall(signed, total))
    }
}

/// Invariant: a contributor sits at the index it claims.
pub fn invariant_claimed_index_matches(claimed: usize, actual: usize) -> Result<(), WarpError> {
    if claimed != actual {
        return Err(CommitteeMismatch::IndexMismatch { claimed, actual }.into());
    }
    Ok(())
}

/// Invariant: a committee snapshot belongs to the expected epoch.
pub fn invariant_same_epoch(expected: u64, committee: &Committee) -> Result<(), WarpError> {
    if committee.epoch() != expected {
        return Err(CommitteeMismatch::EpochMismatch {
            expected,
            actual: committee.epoch(),
        }
        .into());
    }
    Ok(())
}

/// Invariant: two snapshots agree on epoch and on every member and weight.
pub fn invariant_same_committee(expected: &Committee, actual: &Committee) -> Result<(), WarpError> {
    invariant_same_epoch(expected.epoch(), actual)?;
    if expected.members() != actual.members() {
        return Err(CommitteeMismatch::MembershipMismatch {
            epoch: expected.epoch(),
        }
        .into());
    }
    Ok(())
}
