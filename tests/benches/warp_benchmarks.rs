//! # Warp Messaging Benchmarks
//!
//! | Operation | Dominant cost |
//! |-----------|---------------|
//! | Payload + validation ID | one sha256 |
//! | Unsigned message build | encoding, one sha256 on first `id()` |
//! | Contribution | one BLS sign |
//! | Collection | one BLS verify per contribution |
//! | Signed message verify | key aggregation + one pairing check |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_15_warp_messaging::{
    build_registration, contribute, derive_validation_id, Committee, Message, PChainOwner,
    PayloadBody, Quorum, RegistrationParams, SignatureCollector, SignatureContribution,
    UnsignedMessage,
};
use shared_crypto::BlsSecretKey;
use shared_types::{Id, NodeId, LOCAL_ID};

fn secret(seed: u64) -> BlsSecretKey {
    let mut ikm = [0x5a; 32];
    ikm[..8].copy_from_slice(&seed.to_be_bytes());
    BlsSecretKey::from_bytes(&ikm).expect("benchmark key")
}

fn params() -> RegistrationParams {
    RegistrationParams {
        network_id: LOCAL_ID,
        source_chain_id: Id::new([1; 32]),
        source_address: Vec::new(),
        subnet_id: Id::new([2; 32]),
        node_id: NodeId::new([3; 20]),
        bls_public_key: BlsSecretKey::from_bytes(&[0x42; 32]).expect("node key").public_key().to_bytes(),
        expiry: 1_731_005_097,
        remaining_balance_owner: PChainOwner::unowned(),
        disable_owner: PChainOwner::unowned(),
        weight: 1,
    }
}

fn setup(size: usize) -> (Arc<Committee>, UnsignedMessage, Vec<SignatureContribution>) {
    let keys: Vec<_> = (0..size as u64).map(secret).collect();
    let committee =
        Arc::new(Committee::new(0, keys.iter().map(|k| (k.public_key(), 1))).expect("committee"));
    let unsigned = build_registration(&params()).expect("registration").unsigned().clone();
    let contributions = keys
        .iter()
        .map(|k| contribute(k, &unsigned, &committee).expect("member"))
        .collect();
    (committee, unsigned, contributions)
}

// ============================================================================
// Encoding
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-15-encoding");
    let params = params();

    group.bench_function("payload_and_validation_id", |b| {
        b.iter(|| {
            let payload = black_box(&params).payload();
            black_box((payload.to_bytes(), derive_validation_id(&payload)))
        })
    });

    group.bench_function("build_registration", |b| {
        b.iter(|| black_box(build_registration(black_box(&params)).expect("registration")))
    });

    let (committee, unsigned, contributions) = setup(16);
    let signature = SignatureCollector::collect(committee, unsigned.clone(), contributions)
        .expect("collect")
        .finish()
        .expect("finish");
    let bytes = Message::new(unsigned, signature).bytes().to_vec();
    group.bench_function("decode_signed_message", |b| {
        b.iter(|| black_box(Message::from_bytes(black_box(&bytes)).expect("decode")))
    });

    group.finish();
}

// ============================================================================
// Signing and collection
// ============================================================================

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-15-signing");
    group.measurement_time(Duration::from_secs(10));

    let (committee, unsigned, _) = setup(1);
    let key = secret(0);
    group.bench_function("contribute", |b| {
        b.iter(|| black_box(contribute(&key, &unsigned, &committee).expect("member")))
    });

    for size in [4usize, 16, 64] {
        let (committee, unsigned, contributions) = setup(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("collect", size), &size, |b, _| {
            b.iter(|| {
                let collector = SignatureCollector::collect(
                    committee.clone(),
                    unsigned.clone(),
                    contributions.clone(),
                )
                .expect("collect");
                black_box(collector.finish().expect("finish"))
            })
        });

        let signature = SignatureCollector::collect(committee.clone(), unsigned.clone(), contributions)
            .expect("collect")
            .finish()
            .expect("finish");
        let message = Message::new(unsigned, signature);
        let quorum = Quorum::default();
        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| black_box(message.verify(&committee, &quorum).is_ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_signing);
criterion_main!(benches);
