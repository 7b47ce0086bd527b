//! # Warp Messaging Service
//!
//! Application service layer that implements the `WarpMessagingApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`WarpMessagingApi`)
//! - Uses the outbound port (`TransactionIssuer`) to hand off signed messages
//! - Delegates encoding and signing to the algorithms layer
//!
//! Signature collection is the only suspending step: `collect_quorum` drains
//! a channel of independent contributions until quorum, channel close or
//! deadline, without holding any lock.

use std::sync::Arc;
use std::time::Duration;

use shared_crypto::{BlsProofOfPossession, BlsSecretKey};
use shared_types::Id;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::algorithms::{self, SignatureCollector};
use crate::domain::{
    invariant_same_committee, BitSetSignature, Committee, Message, Quorum, Registration, RegistrationParams,
    RegistrationState, SignatureContribution, UnsignedMessage, WarpError,
};
use crate::ports::inbound::WarpMessagingApi;
use crate::ports::outbound::{KeyProvider, RegisterValidatorTx, TransactionIssuer};

/// Warp Messaging Service.
///
/// Holds the local signing key, the committee snapshot it signs for and the
/// issuer that receives finished messages.
pub struct WarpMessagingService<I: TransactionIssuer> {
    signing_key: BlsSecretKey,
    committee: Arc<Committee>,
    quorum: Quorum,
    issuer: I,
}

impl<I: TransactionIssuer> WarpMessagingService<I> {
    /// Create a new service.
    ///
    /// # Arguments
    /// * `keys` - Source of the local signing key
    /// * `committee` - Canonical committee snapshot
    /// * `quorum` - Weight threshold for verification and collection
    /// * `issuer` - Transaction issuer for signed messages
    pub fn new(
        keys: &dyn KeyProvider,
        committee: Arc<Committee>,
        quorum: Quorum,
        issuer: I,
    ) -> Result<Self, WarpError> {
        let signing_key = keys.signing_key()?;
        // fail early rather than at first signature
        committee.index_of(&signing_key.public_key())?;
        Ok(Self {
            signing_key,
            committee,
            quorum,
            issuer,
        })
    }

    /// Quorum in use.
    pub fn quorum(&self) -> Quorum {
        self.quorum
    }

    /// The issuer behind this service.
    pub fn issuer(&self) -> &I {
        &self.issuer
    }

    /// Drain contributions until quorum is reached.
    ///
    /// Invalid contributions are logged and skipped. Fails with
    /// `InsufficientWeight` if the channel closes short of quorum and with
    /// `Timeout` if `timeout` elapses first.
    pub async fn collect_quorum(
        &self,
        unsigned: &UnsignedMessage,
        contributions: mpsc::Receiver<SignatureContribution>,
        timeout: Duration,
    ) -> Result<BitSetSignature, WarpError> {
        self.collect_quorum_from(self.new_collector(unsigned), contributions, timeout)
            .await
    }

    /// Like [`Self::collect_quorum`], starting from contributions already
    /// folded into `collector`.
    ///
    /// `collector` must be built over this service's committee snapshot.
    pub async fn collect_quorum_from(
        &self,
        mut collector: SignatureCollector,
        mut contributions: mpsc::Receiver<SignatureContribution>,
        timeout: Duration,
    ) -> Result<BitSetSignature, WarpError> {
        invariant_same_committee(&self.committee, collector.committee())?;
        let deadline = Instant::now() + timeout;

        while !collector.has_quorum(&self.quorum) {
            let next = tokio::time::timeout_at(deadline, contributions.recv())
                .await
                .map_err(|_| WarpError::Timeout {
                    operation: "signature collection",
                    after_ms: timeout.as_millis() as u64,
                })?;
            let Some(contribution) = next else {
                debug!("Contribution channel closed before quorum");
                break;
            };
            let index = contribution.claimed_index;
            if let Err(e) = collector.add(contribution) {
                warn!(index, error = %e, "Skipping contribution");
            }
        }

        let signature = collector.finish_with_quorum(&self.quorum)?;
        info!(
            message_id = %collector.unsigned().id(),
            signers = collector.signers().len(),
            signed_weight = collector.signed_weight(),
            total_weight = self.committee.total_weight(),
            "Collected quorum signature"
        );
        Ok(signature)
    }

    /// Hand a signed registration to the issuer and mark it submitted.
    pub async fn submit(
        &self,
        registration: &mut Registration,
        proof_of_possession: BlsProofOfPossession,
        balance: u64,
        timeout: Duration,
    ) -> Result<Id, WarpError> {
        let message = registration
            .message()
            .ok_or_else(|| WarpError::InvalidStateTransition {
                from: registration.state().to_string(),
                to: RegistrationState::Submitted.to_string(),
            })?
            .bytes()
            .to_vec();

        let tx = RegisterValidatorTx {
            balance,
            proof_of_possession,
            message,
        };
        let tx_id = tokio::time::timeout(timeout, self.issuer.issue_register_validator(tx))
            .await
            .map_err(|_| WarpError::Timeout {
                operation: "transaction issuance",
                after_ms: timeout.as_millis() as u64,
            })??;

        registration.transition_to(RegistrationState::Submitted)?;
        info!(
            validation_id = %registration.validation_id(),
            %tx_id,
            "Submitted registration"
        );
        Ok(tx_id)
    }
}

impl<I: TransactionIssuer> WarpMessagingApi for WarpMessagingService<I> {
    fn build_registration(&self, params: &RegistrationParams) -> Result<Registration, WarpError> {
        algorithms::build_registration(params)
    }

    fn contribute(&self, unsigned: &UnsignedMessage) -> Result<SignatureContribution, WarpError> {
        algorithms::contribute(&self.signing_key, unsigned, &self.committee)
    }

    fn sign_registration<'a>(
        &self,
        registration: &'a mut Registration,
    ) -> Result<&'a Message, WarpError> {
        algorithms::sign_registration(registration, &self.signing_key, self.committee.clone())
    }

    fn new_collector(&self, unsigned: &UnsignedMessage) -> SignatureCollector {
        SignatureCollector::new(self.committee.clone(), unsigned.clone())
    }

    fn verify_message(&self, message: &Message) -> Result<(), WarpError> {
        message.verify(&self.committee, &self.quorum)
    }

    fn committee(&self) -> &Committee {
        &self.committee
    }
}
