//! # Register Validator Runtime
//!
//! Drives one subnet validator registration end to end on top of
//! `qc-15-warp-messaging`.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then `WARP_*` environment)
//! 2. Validate configuration and committee snapshot
//! 3. Bind key provider, node-info provider and transaction issuer
//! 4. Run the registration pipeline
//! 5. Print the receipt
//!
//! ## Modules
//!
//! - `config/` - `RegistrationConfig` and environment overrides
//! - `pipeline/` - `RegistrationPipeline` and its receipt

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod pipeline;

pub use config::{CommitteeEntry, ConfigError, RegistrationConfig};
pub use pipeline::{RegistrationError, RegistrationPipeline, RegistrationReceipt};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
