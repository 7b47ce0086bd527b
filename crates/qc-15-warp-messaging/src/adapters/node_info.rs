//! Node Info Adapter
//!
//! Implements `NodeInfoProvider` from a locally held staking identity.

use async_trait::async_trait;
use shared_crypto::BlsSecretKey;
use shared_types::NodeId;
use tracing::debug;

use crate::domain::WarpError;
use crate::ports::outbound::{NodeInfo, NodeInfoProvider};

/// Node identity derived from a configured BLS staking key.
pub struct LocalNodeInfoProvider {
    node_id: NodeId,
    staking_key: BlsSecretKey,
}

impl LocalNodeInfoProvider {
    /// Provider for `node_id` signing with `staking_key`.
    pub fn new(node_id: NodeId, staking_key: BlsSecretKey) -> Self {
        Self {
            node_id,
            staking_key,
        }
    }
}

#[async_trait]
impl NodeInfoProvider for LocalNodeInfoProvider {
    async fn node_info(&self) -> Result<NodeInfo, WarpError> {
        let proof_of_possession = self.staking_key.proof_of_possession();
        debug!("[qc-15] Local node info for {}", self.node_id);
        Ok(NodeInfo {
            node_id: self.node_id,
            proof_of_possession,
        })
    }
}
