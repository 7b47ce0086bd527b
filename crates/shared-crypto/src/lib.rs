//! # Shared Crypto - Signing and Hashing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `bls` | BLS12-381 (min-pk) | Warp message signatures, aggregation, proof of possession |
//! | `hashing` | SHA-256 | Message and validation identifiers |
//!
//! ## Security Properties
//!
//! - **BLS**: proof-of-possession ciphersuite, so aggregating public keys of
//!   signers over one message is safe against rogue-key attacks
//! - **Secret keys**: zeroized on drop, redacted from `Debug`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod errors;
pub mod hashing;

// Re-exports
pub use bls::{
    BlsProofOfPossession, BlsPublicKey, BlsSecretKey, BlsSignature, PUBLIC_KEY_LEN,
    SECRET_KEY_LEN, SIGNATURE_LEN,
};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Hash, Sha256Hasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
