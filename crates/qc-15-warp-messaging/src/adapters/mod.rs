//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for key material, node identity and
//! transaction issuance.

mod issuer;
mod key_provider;
mod node_info;

pub use issuer::{dry_run_tx_id, DryRunIssuer};
pub use key_provider::{HexKeyProvider, RawKeyProvider};
pub use node_info::LocalNodeInfoProvider;
