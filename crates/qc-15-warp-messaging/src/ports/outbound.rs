//! # Outbound Ports
//!
//! External collaborators the registration flow calls into: node identity,
//! signing key material and transaction issuance. Failures are reported and
//! never retried here.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_crypto::{BlsProofOfPossession, BlsSecretKey};
use shared_types::{Id, NodeId};

use crate::domain::WarpError;

/// Identity of the node being registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    /// Node identifier.
    pub node_id: NodeId,
    /// BLS public key and its proof of possession.
    pub proof_of_possession: BlsProofOfPossession,
}

/// Node-info provider - outbound port.
#[async_trait]
pub trait NodeInfoProvider: Send + Sync {
    /// Fetch the node's identity and BLS credentials.
    async fn node_info(&self) -> Result<NodeInfo, WarpError>;
}

/// Key provider - outbound port.
pub trait KeyProvider: Send + Sync {
    /// Load the signing key; malformed material fails with a key error.
    fn signing_key(&self) -> Result<BlsSecretKey, WarpError>;
}

/// Register-validator transaction contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterValidatorTx {
    /// Balance funding the validator (nAVAX).
    pub balance: u64,
    /// Node's BLS proof of possession.
    pub proof_of_possession: BlsProofOfPossession,
    /// Signed Warp message bytes.
    pub message: Vec<u8>,
}

/// Transaction issuer - outbound port.
#[async_trait]
pub trait TransactionIssuer: Send + Sync {
    /// Build, sign and submit the transaction; returns its ID.
    async fn issue_register_validator(&self, tx: RegisterValidatorTx) -> Result<Id, WarpError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock node-info provider for testing.
#[derive(Clone, Debug)]
pub struct MockNodeInfoProvider {
    /// Returned identity.
    pub info: NodeInfo,
    /// Should fail?
    pub should_fail: bool,
}

impl MockNodeInfoProvider {
    /// Provider reporting `node_id` with credentials from `key`.
    pub fn new(node_id: NodeId, key: &BlsSecretKey) -> Self {
        Self {
            info: NodeInfo {
                node_id,
                proof_of_possession: key.proof_of_possession(),
            },
            should_fail: false,
        }
    }
}

#[async_trait]
impl NodeInfoProvider for MockNodeInfoProvider {
    async fn node_info(&self) -> Result<NodeInfo, WarpError> {
        if self.should_fail {
            return Err(WarpError::Network("Mock failure".to_string()));
        }
        Ok(self.info.clone())
    }
}

/// Mock transaction issuer for testing.
#[derive(Clone, Debug, Default)]
pub struct MockTransactionIssuer {
    /// Every transaction received.
    pub submissions: Arc<Mutex<Vec<RegisterValidatorTx>>>,
    /// Should fail?
    pub should_fail: bool,
}

impl MockTransactionIssuer {
    /// Number of transactions received.
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().len()
    }
}

#[async_trait]
impl TransactionIssuer for MockTransactionIssuer {
    async fn issue_register_validator(&self, tx: RegisterValidatorTx) -> Result<Id, WarpError> {
        if self.should_fail {
            return Err(WarpError::Network("Mock failure".to_string()));
        }
        let mut submissions = self.submissions.lock();
        submissions.push(tx);
        Ok(Id::new([submissions.len() as u8; 32]))
    }
}
