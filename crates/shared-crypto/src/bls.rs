//! BLS12-381 Signature Implementation
//!
//! Provides BLS signature primitives for:
//! - Key parsing and generation
//! - Sign/verify operations
//! - Signature and public key aggregation
//! - Proof of possession
//!
//! Uses blst's `min_pk` variant: public keys on G1 (48 bytes compressed),
//! signatures on G2 (96 bytes compressed).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use blst::min_pk::{AggregatePublicKey, AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::RngCore;
use zeroize::Zeroize;

use crate::CryptoError;

/// Secret key length in bytes (big-endian scalar).
pub const SECRET_KEY_LEN: usize = 32;

/// Compressed public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed signature length in bytes.
pub const SIGNATURE_LEN: usize = 96;

/// Domain separation tag for message signatures.
const SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Domain separation tag for proofs of possession.
const POP_DST: &[u8] = b"BLS_POP_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// BLS secret key.
pub struct BlsSecretKey {
    secret: SecretKey,
}

impl BlsSecretKey {
    /// Generate a new random secret key.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut ikm = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut ikm);
        let secret = SecretKey::key_gen(&ikm, &[])
            .map_err(|e| CryptoError::KeyGenerationFailed(format!("{e:?}")));
        ikm.zeroize();
        Ok(Self { secret: secret? })
    }

    /// Parse a 32-byte big-endian secret key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let secret = SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// Get the secret key bytes (be careful with this!)
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LEN] {
        self.secret.to_bytes()
    }

    /// Derive the public key.
    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey::from_point(self.secret.sk_to_pk())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.secret.sign(message, SIGNATURE_DST, &[]))
    }

    /// Sign this key's own public key under the proof-of-possession tag.
    pub fn proof_of_possession(&self) -> BlsProofOfPossession {
        let public_key = self.public_key();
        let proof = BlsSignature(self.secret.sign(&public_key.to_bytes(), POP_DST, &[]));
        BlsProofOfPossession { public_key, proof }
    }
}

impl fmt::Debug for BlsSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlsSecretKey(<redacted>)")
    }
}

/// BLS public key (48 bytes compressed).
#[derive(Clone)]
pub struct BlsPublicKey {
    point: PublicKey,
    bytes: [u8; PUBLIC_KEY_LEN],
}

impl BlsPublicKey {
    fn from_point(point: PublicKey) -> Self {
        let bytes = point.to_bytes();
        Self { point, bytes }
    }

    /// Parse a compressed public key, rejecting the identity and points
    /// outside the prime-order subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            });
        }
        PublicKey::key_validate(bytes)
            .map(Self::from_point)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to 48-byte compressed form.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.bytes
    }

    /// Borrow the compressed form.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.bytes
    }

    /// Verify a signature against this public key.
    pub fn verify(&self, message: &[u8], signature: &BlsSignature) -> bool {
        signature
            .0
            .verify(true, message, SIGNATURE_DST, &[], &self.point, false)
            == BLST_ERROR::BLST_SUCCESS
    }

    /// Aggregate multiple public keys into one.
    ///
    /// The aggregated key can verify aggregated signatures over one message.
    pub fn aggregate(keys: &[BlsPublicKey]) -> Result<Self, CryptoError> {
        if keys.is_empty() {
            return Err(CryptoError::InvalidInput("empty key list".into()));
        }
        let refs: Vec<&PublicKey> = keys.iter().map(|k| &k.point).collect();
        AggregatePublicKey::aggregate(&refs, false)
            .map(|apk| Self::from_point(apk.to_public_key()))
            .map_err(|_| CryptoError::AggregationFailed)
    }
}

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for BlsPublicKey {}

impl PartialOrd for BlsPublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlsPublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for BlsPublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Debug for BlsPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsPublicKey(0x")?;
        for b in &self.bytes {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

/// BLS signature (96 bytes compressed).
#[derive(Clone, Debug)]
pub struct BlsSignature(Signature);

impl BlsSignature {
    /// Parse a compressed signature, checking it is a valid G2 point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            });
        }
        Signature::sig_validate(bytes, false)
            .map(BlsSignature)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Serialize to 96-byte compressed form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0.to_bytes()
    }

    /// Aggregate multiple signatures into one.
    ///
    /// Point addition is commutative, so the result does not depend on the
    /// order of `sigs`. A single signature aggregates to itself.
    pub fn aggregate(sigs: &[BlsSignature]) -> Result<Self, CryptoError> {
        if sigs.is_empty() {
            return Err(CryptoError::InvalidInput("empty signature list".into()));
        }
        let refs: Vec<&Signature> = sigs.iter().map(|s| &s.0).collect();
        AggregateSignature::aggregate(&refs, false)
            .map(|asig| BlsSignature(asig.to_signature()))
            .map_err(|_| CryptoError::AggregationFailed)
    }
}

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for BlsSignature {}

/// Proof that the holder of `public_key` controls the matching secret key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsProofOfPossession {
    /// The claimed public key.
    pub public_key: BlsPublicKey,
    /// Signature over the compressed public key under the PoP tag.
    pub proof: BlsSignature,
}

impl BlsProofOfPossession {
    /// Parse from raw public key and proof bytes.
    pub fn from_bytes(public_key: &[u8], proof: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            public_key: BlsPublicKey::from_bytes(public_key)?,
            proof: BlsSignature::from_bytes(proof)?,
        })
    }

    /// Check the proof against the claimed public key.
    pub fn verify(&self) -> bool {
        self.proof.0.verify(
            true,
            self.public_key.as_bytes(),
            POP_DST,
            &[],
            &self.public_key.point,
            false,
        ) == BLST_ERROR::BLST_SUCCESS
    }
}
