//! # Domain Value Objects
//!
//! Registration lifecycle state and quorum thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::WarpError;

/// Registration lifecycle.
///
/// `Pending → Signed` happens inside this crate. `Submitted` and
/// `Acknowledged` are recorded on behalf of the transaction issuer and the
/// receiving chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationState {
    /// Payload and unsigned message built.
    #[default]
    Pending,
    /// Signature attached.
    Signed,
    /// Handed to the transaction issuer.
    Submitted,
    /// Accepted by the receiving chain.
    Acknowledged,
}

impl RegistrationState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: RegistrationState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Signed)
                | (Self::Signed, Self::Submitted)
                | (Self::Submitted, Self::Acknowledged)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Acknowledged)
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Signed => "Signed",
            Self::Submitted => "Submitted",
            Self::Acknowledged => "Acknowledged",
        };
        f.write_str(name)
    }
}

/// Fraction of committee weight required for a valid aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    /// Numerator.
    pub numerator: u64,
    /// Denominator.
    pub denominator: u64,
}

impl Quorum {
    /// Default numerator (67%).
    pub const DEFAULT_NUMERATOR: u64 = 67;
    /// Default denominator.
    pub const DEFAULT_DENOMINATOR: u64 = 100;

    /// Build a threshold in `(0, 1]`.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, WarpError> {
        if denominator == 0 || numerator == 0 || numerator > denominator {
            return Err(WarpError::InvalidCommittee(format!(
                "quorum {numerator}/{denominator} must be in (0, 1]"
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `signed / total >= numerator / denominator`, without overflow.
    pub fn is_met(&self, signed: u64, total: u64) -> bool {
        u128::from(signed) * u128::from(self.denominator)
            >= u128::from(total) * u128::from(self.numerator)
    }

    /// Error describing a shortfall.
    pub fn shortfall(&self, signed: u64, total: u64) -> WarpError {
        WarpError::InsufficientWeight {
            signed,
            total,
            numerator: self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Default for Quorum {
    fn default() -> Self {
        Self {
            numerator: Self::DEFAULT_NUMERATOR,
            denominator: Self::DEFAULT_DENOMINATOR,
        }
    }
}
