//! # Registration Pipeline
//!
//! One registration attempt, start to finish:
//!
//! 1. Fetch node identity and proof of possession (timeout-bounded)
//! 2. Build the `RegisterSubnetValidator` message
//! 3. Sign locally, or collect peer contributions up to quorum
//! 4. Verify the signed message against the committee
//! 5. Hand it to the transaction issuer (timeout-bounded)
//!
//! Any failure aborts the attempt. Nothing is persisted locally, so an
//! aborted attempt can simply be discarded.

use std::sync::Arc;
use std::time::Instant;

use qc_15_warp_messaging::{
    Committee, KeyProvider, NodeInfoProvider, Payload, RegistrationParams, RegistrationState,
    SignatureContribution, TransactionIssuer, WarpError, WarpMessagingApi, WarpMessagingService,
};
use serde::Serialize;
use shared_types::{Id, NodeId};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::{unix_now, ConfigError, RegistrationConfig};

/// Registration attempt errors.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Configuration rejected before any work started.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Protocol or collaborator failure.
    #[error(transparent)]
    Warp(#[from] WarpError),
}

/// Outcome of a successful attempt.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    /// Attempt identifier, as recorded in logs.
    pub attempt_id: Uuid,
    /// Durable handle of the registration.
    #[serde(rename = "validationID")]
    pub validation_id: Id,
    /// ID of the signed unsigned-message.
    #[serde(rename = "messageID")]
    pub message_id: Id,
    /// Issued transaction.
    #[serde(rename = "txID")]
    pub tx_id: Id,
    /// Registered node.
    #[serde(rename = "nodeID")]
    pub node_id: NodeId,
    /// Expiry placed in the payload.
    pub expiry: u64,
    /// Signed message, hex.
    pub signed_message: String,
    /// Final lifecycle state.
    pub state: RegistrationState,
}

/// Drives a registration through its external boundaries.
pub struct RegistrationPipeline<N: NodeInfoProvider, I: TransactionIssuer> {
    config: RegistrationConfig,
    node_info: N,
    service: WarpMessagingService<I>,
}

impl<N: NodeInfoProvider, I: TransactionIssuer> RegistrationPipeline<N, I> {
    /// Validate `config` and bind the collaborators.
    pub fn new(
        config: RegistrationConfig,
        keys: &dyn KeyProvider,
        node_info: N,
        issuer: I,
    ) -> Result<Self, RegistrationError> {
        config.validate()?;

        let mut entries = config.committee_keys()?;
        if entries.is_empty() {
            entries.push((keys.signing_key()?.public_key(), 1));
        }
        let committee = Arc::new(Committee::new(config.committee_epoch, entries)?);
        info!(
            epoch = committee.epoch(),
            members = committee.len(),
            total_weight = committee.total_weight(),
            "Committee snapshot loaded"
        );

        let service = WarpMessagingService::new(keys, committee, config.quorum, issuer)?;
        Ok(Self {
            config,
            node_info,
            service,
        })
    }

    /// The underlying messaging service.
    pub fn service(&self) -> &WarpMessagingService<I> {
        &self.service
    }

    /// Run one attempt, signing with the local key only.
    pub async fn run(&self) -> Result<RegistrationReceipt, RegistrationError> {
        self.run_attempt(None).await
    }

    /// Run one attempt, adding peer contributions from `peers` until quorum.
    pub async fn run_with_peers(
        &self,
        peers: mpsc::Receiver<SignatureContribution>,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        self.run_attempt(Some(peers)).await
    }

    async fn run_attempt(
        &self,
        peers: Option<mpsc::Receiver<SignatureContribution>>,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let attempt_id = Uuid::new_v4();
        let span = info_span!("registration", %attempt_id);
        self.attempt(attempt_id, peers).instrument(span).await
    }

    async fn attempt(
        &self,
        attempt_id: Uuid,
        peers: Option<mpsc::Receiver<SignatureContribution>>,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        // 1. node identity
        let started = Instant::now();
        let timeout = self.config.node_info_timeout;
        let node = tokio::time::timeout(timeout, self.node_info.node_info())
            .await
            .map_err(|_| WarpError::Timeout {
                operation: "node info",
                after_ms: timeout.as_millis() as u64,
            })??;
        info!(
            node_id = %node.node_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched node info"
        );
        if !node.proof_of_possession.verify() {
            return Err(WarpError::Signature(
                "node proof of possession does not verify".into(),
            )
            .into());
        }

        // 2. message
        let expiry = self.config.expiry_at(unix_now())?;
        let params = RegistrationParams {
            network_id: self.config.network_id,
            source_chain_id: self.config.source_chain_id,
            source_address: self.config.source_address.clone(),
            subnet_id: self.config.subnet_id,
            node_id: node.node_id,
            bls_public_key: node.proof_of_possession.public_key.to_bytes(),
            expiry,
            remaining_balance_owner: Default::default(),
            disable_owner: Default::default(),
            weight: self.config.weight,
        };
        let mut registration = self.service.build_registration(&params)?;
        debug!(
            payload = %Payload::from(registration.payload().clone()).to_json_pretty(),
            "Registration payload"
        );

        // 3. signature
        match peers {
            None => {
                self.service.sign_registration(&mut registration)?;
            }
            Some(peers) => {
                let mut collector = self.service.new_collector(registration.unsigned());
                collector.add(self.service.contribute(registration.unsigned())?)?;
                let signature = self
                    .service
                    .collect_quorum_from(collector, peers, self.config.collect_timeout)
                    .await?;
                registration.attach_signature(signature)?;
            }
        }

        // 4. self-check
        let message = registration
            .message()
            .cloned()
            .ok_or_else(|| WarpError::Signature("registration left unsigned".into()))?;
        self.service.verify_message(&message)?;

        // 5. issue
        let started = Instant::now();
        let tx_id = self
            .service
            .submit(
                &mut registration,
                node.proof_of_possession,
                self.config.balance,
                self.config.issue_timeout,
            )
            .await?;
        info!(
            %tx_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Issued register-validator transaction"
        );

        Ok(RegistrationReceipt {
            attempt_id,
            validation_id: registration.validation_id(),
            message_id: message.id(),
            tx_id,
            node_id: node.node_id,
            expiry,
            signed_message: hex::encode(message.bytes()),
            state: registration.state(),
        })
    }
}
