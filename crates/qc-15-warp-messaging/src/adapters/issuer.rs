//! Transaction Issuer Adapter
//!
//! Implements `TransactionIssuer` without a network: the transaction ID is
//! derived from the submission and every submission is kept in memory.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::Sha256Hasher;
use shared_types::Id;
use tracing::info;

use crate::domain::WarpError;
use crate::ports::outbound::{RegisterValidatorTx, TransactionIssuer};

/// Issuer that records transactions instead of broadcasting them.
#[derive(Default)]
pub struct DryRunIssuer {
    submissions: RwLock<Vec<(Id, RegisterValidatorTx)>>,
}

impl DryRunIssuer {
    /// Create an empty issuer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions issued so far, with their IDs.
    pub fn submissions(&self) -> Vec<(Id, RegisterValidatorTx)> {
        self.submissions.read().clone()
    }
}

/// Deterministic ID over every field of the transaction.
pub fn dry_run_tx_id(tx: &RegisterValidatorTx) -> Id {
    let mut hasher = Sha256Hasher::new();
    hasher
        .update(&tx.balance.to_be_bytes())
        .update(tx.proof_of_possession.public_key.as_bytes())
        .update(&tx.proof_of_possession.proof.to_bytes())
        .update(&tx.message);
    Id::new(hasher.finalize())
}

#[async_trait]
impl TransactionIssuer for DryRunIssuer {
    async fn issue_register_validator(&self, tx: RegisterValidatorTx) -> Result<Id, WarpError> {
        let tx_id = dry_run_tx_id(&tx);
        info!(
            "[qc-15] Dry-run RegisterL1ValidatorTx {} ({} message bytes, balance {})",
            tx_id,
            tx.message.len(),
            tx.balance
        );
        self.submissions.write().push((tx_id, tx));
        Ok(tx_id)
    }
}
