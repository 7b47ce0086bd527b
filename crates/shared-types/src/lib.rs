//! # Shared Types Crate
//!
//! Identifier types used by the Warp messaging core and the registration
//! runtime.
//!
//! ## Design Principles
//!
//! - **Opaque**: identifiers are fixed-width byte strings compared by equality.
//! - **Human-readable**: every identifier round-trips through its cb58 string.

pub mod cb58;
pub mod errors;
pub mod ids;

pub use errors::IdError;
pub use ids::*;
