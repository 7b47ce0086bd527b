//! # Registration Runtime Flows
//!
//! The `register-validator` pipeline driven with several committee members.
//! Peers sign the same unsigned message independently and stream their
//! contributions in; the issuer plays the receiving chain and checks the
//! signed message before accepting it.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use qc_15_warp_messaging::{
        build_registration, contribute, dry_run_tx_id, Committee, HexKeyProvider, Message,
        MockNodeInfoProvider, PChainOwner, Quorum, RegisterValidatorTx, RegistrationParams,
        RegistrationState, TransactionIssuer, UnsignedMessage, WarpError,
    };
    use register_validator::{
        CommitteeEntry, RegistrationConfig, RegistrationError, RegistrationPipeline,
    };
    use shared_crypto::BlsSecretKey;
    use shared_types::Id;
    use tokio::sync::mpsc;

    use crate::integration::vectors::SIGNER_KEY_HEX;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const EXPIRY: u64 = 1_731_005_097;

    fn signer() -> BlsSecretKey {
        BlsSecretKey::from_bytes(&hex::decode(SIGNER_KEY_HEX).unwrap()).unwrap()
    }

    fn peer(seed: u8) -> BlsSecretKey {
        BlsSecretKey::from_bytes(&[seed; 32]).unwrap()
    }

    fn node_key() -> BlsSecretKey {
        peer(0x33)
    }

    fn members() -> Vec<(BlsSecretKey, u64)> {
        vec![(signer(), 1), (peer(0x11), 1), (peer(0x22), 1)]
    }

    fn committee() -> Committee {
        Committee::new(0, members().iter().map(|(k, w)| (k.public_key(), *w))).unwrap()
    }

    fn config() -> RegistrationConfig {
        RegistrationConfig {
            committee: members()
                .iter()
                .map(|(k, w)| CommitteeEntry {
                    public_key_hex: hex::encode(k.public_key().to_bytes()),
                    weight: *w,
                })
                .collect(),
            expiry: Some(EXPIRY),
            collect_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    /// The unsigned message every member derives from shared inputs.
    fn expected_unsigned() -> UnsignedMessage {
        let cfg = config();
        let params = RegistrationParams {
            network_id: cfg.network_id,
            source_chain_id: cfg.source_chain_id,
            source_address: cfg.source_address.clone(),
            subnet_id: cfg.subnet_id,
            node_id: cfg.node_id,
            bls_public_key: node_key().public_key().to_bytes(),
            expiry: EXPIRY,
            remaining_balance_owner: PChainOwner::unowned(),
            disable_owner: PChainOwner::unowned(),
            weight: cfg.weight,
        };
        build_registration(&params).unwrap().unsigned().clone()
    }

    /// Issuer that accepts only messages the committee actually signed.
    #[derive(Clone)]
    struct ReceivingChain {
        committee: Arc<Committee>,
        accepted: Arc<Mutex<Vec<Message>>>,
    }

    impl ReceivingChain {
        fn new() -> Self {
            Self {
                committee: Arc::new(committee()),
                accepted: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl TransactionIssuer for ReceivingChain {
        async fn issue_register_validator(
            &self,
            tx: RegisterValidatorTx,
        ) -> Result<Id, WarpError> {
            if !tx.proof_of_possession.verify() {
                return Err(WarpError::Signature("bad proof of possession".into()));
            }
            let message = Message::from_bytes(&tx.message)?;
            message.verify(&self.committee, &Quorum::default())?;
            let tx_id = dry_run_tx_id(&tx);
            self.accepted.lock().push(message);
            Ok(tx_id)
        }
    }

    fn pipeline(
        issuer: ReceivingChain,
    ) -> RegistrationPipeline<MockNodeInfoProvider, ReceivingChain> {
        let cfg = config();
        let node = MockNodeInfoProvider::new(cfg.node_id, &node_key());
        let keys = HexKeyProvider::new(SIGNER_KEY_HEX);
        RegistrationPipeline::new(cfg, &keys, node, issuer).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_peers_complete_registration() {
        let chain = ReceivingChain::new();
        let pipeline = pipeline(chain.clone());
        let unsigned = expected_unsigned();
        let committee = committee();
        let (tx, rx) = mpsc::channel(4);

        for seed in [0x11u8, 0x22] {
            let c = contribute(&peer(seed), &unsigned, &committee).unwrap();
            tx.send(c).await.unwrap();
        }

        let receipt = pipeline.run_with_peers(rx).await.unwrap();
        assert_eq!(receipt.state, RegistrationState::Submitted);
        assert_eq!(receipt.message_id, unsigned.id());

        let accepted = chain.accepted.lock();
        assert_eq!(accepted.len(), 1);
        assert_eq!(hex::encode(accepted[0].bytes()), receipt.signed_message);
    }

    #[tokio::test]
    async fn test_local_signature_alone_is_not_submitted() {
        let chain = ReceivingChain::new();
        let pipeline = pipeline(chain.clone());

        // 1 of 3 is below 67%
        assert!(matches!(
            pipeline.run().await,
            Err(RegistrationError::Warp(WarpError::InsufficientWeight {
                signed: 1,
                total: 3,
                ..
            }))
        ));
        assert!(chain.accepted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_peer_signing_other_message_is_skipped() {
        let chain = ReceivingChain::new();
        let pipeline = pipeline(chain.clone());
        let committee = committee();
        let (tx, rx) = mpsc::channel(4);

        // a peer that saw a different expiry signs different bytes
        let cfg = config();
        let params = RegistrationParams {
            network_id: cfg.network_id,
            source_chain_id: cfg.source_chain_id,
            source_address: cfg.source_address,
            subnet_id: cfg.subnet_id,
            node_id: cfg.node_id,
            bls_public_key: node_key().public_key().to_bytes(),
            expiry: EXPIRY + 1,
            remaining_balance_owner: PChainOwner::unowned(),
            disable_owner: PChainOwner::unowned(),
            weight: cfg.weight,
        };
        let stale = build_registration(&params).unwrap().unsigned().clone();
        tx.send(contribute(&peer(0x11), &stale, &committee).unwrap())
            .await
            .unwrap();
        // the other peer is honest
        tx.send(contribute(&peer(0x22), &expected_unsigned(), &committee).unwrap())
            .await
            .unwrap();
        drop(tx);

        // 2 of 3 is still short of 67%
        assert!(matches!(
            pipeline.run_with_peers(rx).await,
            Err(RegistrationError::Warp(WarpError::InsufficientWeight {
                signed: 2,
                total: 3,
                ..
            }))
        ));
        assert!(chain.accepted.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_peers_time_out() {
        let chain = ReceivingChain::new();
        let cfg = RegistrationConfig {
            collect_timeout: Duration::from_millis(500),
            ..config()
        };
        let node = MockNodeInfoProvider::new(cfg.node_id, &node_key());
        let keys = HexKeyProvider::new(SIGNER_KEY_HEX);
        let pipeline = RegistrationPipeline::new(cfg, &keys, node, chain.clone()).unwrap();
        let (_tx, rx) = mpsc::channel(1);

        assert!(matches!(
            pipeline.run_with_peers(rx).await,
            Err(RegistrationError::Warp(WarpError::Timeout {
                operation: "signature collection",
                after_ms: 500,
            }))
        ));
        assert!(chain.accepted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_receiving_chain_rejects_other_committee() {
        // a chain tracking a different validator set refuses the message
        let other = Committee::new(0, [(peer(0x44).public_key(), 1)]).unwrap();
        let chain = ReceivingChain {
            committee: Arc::new(other),
            accepted: Arc::new(Mutex::new(Vec::new())),
        };
        let pipeline = pipeline(chain.clone());
        let unsigned = expected_unsigned();
        let committee = committee();
        let (tx, rx) = mpsc::channel(4);
        for seed in [0x11u8, 0x22] {
            tx.send(contribute(&peer(seed), &unsigned, &committee).unwrap())
                .await
                .unwrap();
        }

        assert!(pipeline.run_with_peers(rx).await.is_err());
        assert!(chain.accepted.lock().is_empty());
    }
}
