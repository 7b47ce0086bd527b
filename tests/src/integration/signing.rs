//! # Multi-Signer Flows
//!
//! Independent committee members sign the same unsigned message and their
//! contributions are folded into one bit-set signature.
//!
//! ## Flows Tested:
//!
//! 1. **Order independence**: any arrival order yields identical bytes
//! 2. **Partial collectors**: merging overlapping halves equals one collector,
//!    and only collectors over the same committee snapshot merge
//! 3. **Concurrent signers**: contributions over a channel reach quorum
//! 4. **Weighted quorum**: heavy members count for more than light ones

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use qc_15_warp_messaging::{
        build_unsigned, contribute, finalize, weight_update_message, Committee, Message,
        MockTransactionIssuer, Payload, Quorum, RawKeyProvider, SignatureCollector,
        SignatureContribution, UnsignedMessage, WarpError, WarpMessagingApi,
        WarpMessagingService,
    };
    use rand::seq::SliceRandom;
    use shared_crypto::BlsSecretKey;
    use shared_types::{Id, LOCAL_ID};
    use tokio::sync::mpsc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn secret(seed: u8) -> BlsSecretKey {
        BlsSecretKey::from_bytes(&[seed; 32]).unwrap()
    }

    fn committee(weights: &[u64]) -> Arc<Committee> {
        let entries = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (secret(i as u8 + 1).public_key(), *w));
        Arc::new(Committee::new(7, entries).unwrap())
    }

    fn unsigned() -> UnsignedMessage {
        weight_update_message(LOCAL_ID, Id::new([4; 32]), b"manager", Id::new([9; 32]), 3, 40)
            .unwrap()
    }

    fn contributions(
        seeds: &[u8],
        unsigned: &UnsignedMessage,
        committee: &Committee,
    ) -> Vec<SignatureContribution> {
        seeds
            .iter()
            .map(|s| contribute(&secret(*s), unsigned, committee).unwrap())
            .collect()
    }

    // =============================================================================
    // COLLECTION
    // =============================================================================

    #[test]
    fn test_arrival_order_does_not_matter() {
        let committee = committee(&[1; 6]);
        let msg = unsigned();
        let mut contribs = contributions(&[1, 2, 3, 4, 5, 6], &msg, &committee);

        let reference = SignatureCollector::collect(committee.clone(), msg.clone(), contribs.clone())
            .unwrap()
            .finish()
            .unwrap();

        let mut rng = rand::thread_rng();
        for _ in 0..5 {
            contribs.shuffle(&mut rng);
            let sig = SignatureCollector::collect(committee.clone(), msg.clone(), contribs.clone())
                .unwrap()
                .finish()
                .unwrap();
            assert_eq!(sig, reference);
        }
        assert_eq!(
            finalize(&msg, reference.clone()).unwrap(),
            Message::new(msg.clone(), reference).bytes()
        );
    }

    #[test]
    fn test_merged_halves_equal_single_collector() {
        let committee = committee(&[1; 4]);
        let msg = unsigned();
        let all = contributions(&[1, 2, 3, 4], &msg, &committee);

        let whole = SignatureCollector::collect(committee.clone(), msg.clone(), all.clone())
            .unwrap();
        let mut left =
            SignatureCollector::collect(committee.clone(), msg.clone(), all[..2].to_vec())
                .unwrap();
        let right =
            SignatureCollector::collect(committee.clone(), msg.clone(), all[1..].to_vec())
                .unwrap();
        left.merge(&right).unwrap();

        assert_eq!(left.signers(), whole.signers());
        assert_eq!(left.signed_weight(), whole.signed_weight());
        assert_eq!(left.finish().unwrap(), whole.finish().unwrap());
    }

    #[test]
    fn test_collector_for_other_message_cannot_merge() {
        let committee = committee(&[1; 2]);
        let msg = unsigned();
        let other = build_unsigned(LOCAL_ID, Id::new([4; 32]), &[], b"other").unwrap();

        let mut a = SignatureCollector::new(committee.clone(), msg);
        let b = SignatureCollector::new(committee, other);
        assert!(a.merge(&b).is_err());
    }

    #[test]
    fn test_collector_for_other_members_cannot_merge() {
        // same epoch 7, different keys at every position
        let committee = committee(&[1; 2]);
        let msg = unsigned();
        let outsiders = Arc::new(
            Committee::new(7, [0x61u8, 0x62].map(|s| (secret(s).public_key(), 1))).unwrap(),
        );
        let mut mine = SignatureCollector::collect(
            committee.clone(),
            msg.clone(),
            contributions(&[1], &msg, &committee),
        )
        .unwrap();
        let theirs = SignatureCollector::collect(
            outsiders.clone(),
            msg.clone(),
            contributions(&[0x61, 0x62], &msg, &outsiders),
        )
        .unwrap();

        assert!(matches!(
            mine.merge(&theirs),
            Err(WarpError::CommitteeMismatch(_))
        ));
        assert_eq!(mine.signed_weight(), 1);
        assert!(mine.finish_with_quorum(&Quorum::default()).is_err());
    }

    #[test]
    fn test_weighted_quorum() {
        // one heavy member outweighs three light ones
        let committee = committee(&[70, 10, 10, 10]);
        let msg = unsigned();
        let quorum = Quorum::default();
        let heavy_key = secret(1).public_key();
        let heavy_index = committee.index_of(&heavy_key).unwrap();

        let light: Vec<_> = contributions(&[2, 3, 4], &msg, &committee);
        let collector =
            SignatureCollector::collect(committee.clone(), msg.clone(), light).unwrap();
        assert_eq!(collector.signed_weight(), 30);
        assert!(matches!(
            collector.finish_with_quorum(&quorum),
            Err(WarpError::InsufficientWeight {
                signed: 30,
                total: 100,
                ..
            })
        ));

        let heavy = contributions(&[1], &msg, &committee);
        assert_eq!(heavy[0].claimed_index, heavy_index);
        let collector = SignatureCollector::collect(committee.clone(), msg.clone(), heavy).unwrap();
        let sig = collector.finish_with_quorum(&quorum).unwrap();
        let message = Message::new(msg, sig);
        assert!(message.verify(&committee, &quorum).is_ok());
    }

    #[test]
    fn test_signed_message_survives_wire() {
        let committee = committee(&[1; 3]);
        let msg = unsigned();
        let sig = SignatureCollector::collect(
            committee.clone(),
            msg.clone(),
            contributions(&[1, 2, 3], &msg, &committee),
        )
        .unwrap()
        .finish()
        .unwrap();
        let bytes = finalize(&msg, sig).unwrap();

        let decoded = Message::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.unsigned(), &msg);
        assert!(decoded.verify(&committee, &Quorum::default()).is_ok());

        // signature is bound to the committee that produced it
        let swapped = committee_with_swapped_member();
        assert!(decoded.verify(&swapped, &Quorum::default()).is_err());
    }

    fn committee_with_swapped_member() -> Committee {
        let entries = [1u8, 2, 0x50].map(|s| (secret(s).public_key(), 1));
        Committee::new(7, entries).unwrap()
    }

    // =============================================================================
    // CONCURRENT SIGNERS
    // =============================================================================

    #[tokio::test]
    async fn test_concurrent_signers_reach_quorum() {
        let committee = committee(&[1; 5]);
        let service = WarpMessagingService::new(
            &RawKeyProvider::new(vec![1u8; 32]),
            committee.clone(),
            Quorum::default(),
            MockTransactionIssuer::default(),
        )
        .unwrap();
        let msg = unsigned();
        let (tx, rx) = mpsc::channel(16);

        for seed in 2..=5u8 {
            let tx = tx.clone();
            let msg = msg.clone();
            let committee = committee.clone();
            tokio::spawn(async move {
                let c = contribute(&secret(seed), &msg, &committee).unwrap();
                let _ = tx.send(c).await;
            });
        }
        drop(tx);

        let mut collector = service.new_collector(&msg);
        collector.add(service.contribute(&msg).unwrap()).unwrap();
        let sig = service
            .collect_quorum_from(collector, rx, Duration::from_secs(5))
            .await
            .unwrap();

        // 67% of 5 needs 4 signers; collection stops once reached
        let signers = sig.signer_bitset().unwrap().len();
        assert!((4..=5).contains(&signers));
        assert!(service.verify_message(&Message::new(msg, sig)).is_ok());
    }

    #[tokio::test]
    async fn test_collection_rejects_other_epoch() {
        let committee = committee(&[1; 3]);
        let service = WarpMessagingService::new(
            &RawKeyProvider::new(vec![1u8; 32]),
            committee.clone(),
            Quorum::default(),
            MockTransactionIssuer::default(),
        )
        .unwrap();
        let msg = unsigned();

        let stale_entries = (1..=3u8).map(|s| (secret(s).public_key(), 1));
        let stale = Arc::new(Committee::new(6, stale_entries).unwrap());
        let collector = SignatureCollector::new(stale, msg);
        let (_tx, rx) = mpsc::channel(1);

        assert!(matches!(
            service
                .collect_quorum_from(collector, rx, Duration::from_secs(1))
                .await,
            Err(WarpError::CommitteeMismatch(_))
        ));
    }

    #[test]
    fn test_weight_update_payload_round_trip() {
        let msg = unsigned();
        let call = qc_15_warp_messaging::AddressedCall::from_bytes(msg.payload()).unwrap();
        assert_eq!(call.source_address, b"manager");
        match Payload::decode(&call.payload).unwrap() {
            Payload::SubnetValidatorWeight(p) => {
                assert_eq!(p.validation_id, Id::new([9; 32]));
                assert_eq!(p.nonce, 3);
                assert_eq!(p.weight, 40);
            }
            other => panic!("Expected SubnetValidatorWeight, got {:?}", other),
        }
    }
}
