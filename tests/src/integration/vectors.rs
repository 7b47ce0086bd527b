//! # Regression Vectors
//!
//! Byte-exact encodings for a local-network registration. Any change here is
//! a wire-format break: receivers would compute different message IDs and
//! reject every signature.
//!
//! | Input | Value |
//! |-------|-------|
//! | network | 12345 |
//! | subnet | `2DeHa7Qb6sufPkmQcFWG2uCd4pBPv9WB6dkzroiMQhd1NSRtof` |
//! | source chain | `2BMFrJ9xeh5JdwZEx6uuFcjfZC2SV2hdbMT8ee5HrvjtfJb5br` |
//! | node | bytes 1..=20 |
//! | BLS key | 0xAA x 48 |
//! | expiry | 1731005097 |
//! | owners | empty, threshold 0 |
//! | weight | 1 |

/// Local test subnet.
pub const SUBNET: &str = "2DeHa7Qb6sufPkmQcFWG2uCd4pBPv9WB6dkzroiMQhd1NSRtof";

/// Local test source chain.
pub const SOURCE_CHAIN: &str = "2BMFrJ9xeh5JdwZEx6uuFcjfZC2SV2hdbMT8ee5HrvjtfJb5br";

/// Local test signer key.
pub const SIGNER_KEY_HEX: &str = "3f783929b295f16cd1172396acb23b20eed057b9afb1caa419e9915f92860b35";

/// Encoded `RegisterSubnetValidator` payload (138 bytes).
pub const PAYLOAD_HEX: &str = concat!(
    "0000",
    "00000001",
    "a0673b4ee5ec44e57c8ab250dd7cd7b68d04421f64bd6559a4284a3ee358ff2b",
    "0102030405060708090a0b0c0d0e0f1011121314",
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
    "00000000672d0aa9",
    "0000000000000000",
    "0000000000000000",
    "0000000000000001",
);

/// Unsigned message header plus addressed-call header, before the payload.
pub const UNSIGNED_PREFIX_HEX: &str = concat!(
    "0000",
    "00003039",
    "9b32002dae82f243961a2634073dcec7135b765fa86068f24fb3677593bac053",
    "00000098",
    "0000",
    "00000001",
    "00000000",
    "0000008a",
);

/// sha256 of the payload.
pub const VALIDATION_ID_HEX: &str =
    "32a40397a0ffdda3a64b55fd11ea6276faaf739e7476b898d17d3c0857a11b1d";

/// Same validation ID in cb58.
pub const VALIDATION_ID_CB58: &str = "PJYo9BLhvm6x1edjXomiAJ79sRWPt3ccWvSuMiZxNDAw6oMhg";

/// Validation ID of the same payload at weight 2.
pub const VALIDATION_ID_WEIGHT_2_HEX: &str =
    "028ed74ecdfd0ee7991c85152fa097fc4b8a2fe7d13f1f4c58e6bf93ee712cc7";

/// sha256 of the unsigned message.
pub const UNSIGNED_ID_HEX: &str =
    "d07ed0b063d1bfc37703272897131baec982feddea46779f948c031b0d40e114";

/// Signature of the unsigned message by [`SIGNER_KEY_HEX`].
pub const SIGNATURE_HEX: &str = concat!(
    "8f7cccb6b82dbfb3aa6c4d8bb9037c6def23d46ee2ef39dc244906b413699c2d",
    "db5dc4c7745085c6d4c63cd9dbd551fb167e4b0acad51f13d51879e65ff5ee21",
    "ee4aa00ae6b145638023b6b4151f27b6e786187b77a4e90c16a8472d3bebcfbf",
);

/// Bit-set signature header for a lone signer at index 0.
pub const SOLO_SIGNATURE_HEADER_HEX: &str = concat!("00000000", "00000001", "01");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use qc_15_warp_messaging::{
        build_registration, derive_validation_id, sign_registration, AddressedCall, Committee,
        Message, PChainOwner, Payload, PayloadBody, Quorum, RegisterSubnetValidator,
        RegistrationParams,
    };
    use shared_crypto::BlsSecretKey;
    use shared_types::{Id, NodeId, LOCAL_ID};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn params() -> RegistrationParams {
        RegistrationParams {
            network_id: LOCAL_ID,
            source_chain_id: SOURCE_CHAIN.parse().unwrap(),
            source_address: Vec::new(),
            subnet_id: SUBNET.parse().unwrap(),
            node_id: NodeId::new(std::array::from_fn(|i| i as u8 + 1)),
            bls_public_key: [0xAA; 48],
            expiry: 1_731_005_097,
            remaining_balance_owner: PChainOwner::unowned(),
            disable_owner: PChainOwner::unowned(),
            weight: 1,
        }
    }

    fn signer() -> BlsSecretKey {
        let bytes = hex::decode(SIGNER_KEY_HEX).unwrap();
        BlsSecretKey::from_bytes(&bytes).unwrap()
    }

    fn solo_committee() -> Arc<Committee> {
        Arc::new(Committee::new(0, [(signer().public_key(), 1)]).unwrap())
    }

    // =============================================================================
    // IDENTIFIERS
    // =============================================================================

    #[test]
    fn test_cb58_ids_decode_to_payload_bytes() {
        let subnet: Id = SUBNET.parse().unwrap();
        let chain: Id = SOURCE_CHAIN.parse().unwrap();
        assert_eq!(&PAYLOAD_HEX[12..76], hex::encode(subnet.as_bytes()));
        assert_eq!(&UNSIGNED_PREFIX_HEX[12..76], hex::encode(chain.as_bytes()));
        assert_eq!(subnet.to_string(), SUBNET);
        assert_eq!(chain.to_string(), SOURCE_CHAIN);
    }

    #[test]
    fn test_node_id_string_form() {
        assert_eq!(
            params().node_id.to_string(),
            "NodeID-6L5yRNPTuciSgXGHqYwn9N6NeoKMvqvy"
        );
    }

    // =============================================================================
    // PAYLOAD AND VALIDATION ID
    // =============================================================================

    #[test]
    fn test_payload_bytes() {
        let bytes = params().payload().to_bytes();
        assert_eq!(bytes.len(), 138);
        assert_eq!(hex::encode(&bytes), PAYLOAD_HEX);
    }

    #[test]
    fn test_payload_decodes_to_same_value() {
        let bytes = hex::decode(PAYLOAD_HEX).unwrap();
        match Payload::decode(&bytes).unwrap() {
            Payload::RegisterSubnetValidator(p) => assert_eq!(p, params().payload()),
            other => panic!("Expected RegisterSubnetValidator, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_id() {
        let id = derive_validation_id(&params().payload());
        assert_eq!(hex::encode(id.as_bytes()), VALIDATION_ID_HEX);
        assert_eq!(id.to_string(), VALIDATION_ID_CB58);
    }

    #[test]
    fn test_validation_id_tracks_weight() {
        let payload = RegisterSubnetValidator {
            weight: 2,
            ..params().payload()
        };
        let id = derive_validation_id(&payload);
        assert_eq!(hex::encode(id.as_bytes()), VALIDATION_ID_WEIGHT_2_HEX);
    }

    // =============================================================================
    // UNSIGNED MESSAGE
    // =============================================================================

    #[test]
    fn test_unsigned_message_bytes() {
        let reg = build_registration(&params()).unwrap();
        let expected = format!("{UNSIGNED_PREFIX_HEX}{PAYLOAD_HEX}");
        assert_eq!(reg.unsigned().bytes().len(), 194);
        assert_eq!(hex::encode(reg.unsigned().bytes()), expected);
        assert_eq!(hex::encode(reg.unsigned().id().as_bytes()), UNSIGNED_ID_HEX);
        assert_eq!(hex::encode(reg.validation_id().as_bytes()), VALIDATION_ID_HEX);
    }

    #[test]
    fn test_addressed_call_length() {
        let reg = build_registration(&params()).unwrap();
        let call = AddressedCall::from_bytes(reg.unsigned().payload()).unwrap();
        assert_eq!(reg.unsigned().payload().len(), 152);
        assert!(call.source_address.is_empty());
        assert_eq!(hex::encode(&call.payload), PAYLOAD_HEX);
    }

    // =============================================================================
    // SIGNED MESSAGE
    // =============================================================================

    #[test]
    fn test_signature_bytes() {
        let reg = build_registration(&params()).unwrap();
        let sig = signer().sign(reg.unsigned().bytes());
        assert_eq!(hex::encode(sig.to_bytes()), SIGNATURE_HEX);
    }

    #[test]
    fn test_signed_message_bytes() {
        let mut reg = build_registration(&params()).unwrap();
        let message = sign_registration(&mut reg, &signer(), solo_committee()).unwrap();
        let expected = format!(
            "{UNSIGNED_PREFIX_HEX}{PAYLOAD_HEX}{SOLO_SIGNATURE_HEADER_HEX}{SIGNATURE_HEX}"
        );
        assert_eq!(hex::encode(message.bytes()), expected);
    }

    #[test]
    fn test_signature_is_deterministic_and_verifies() {
        let committee = solo_committee();
        let mut first = build_registration(&params()).unwrap();
        let mut second = build_registration(&params()).unwrap();
        let a = sign_registration(&mut first, &signer(), committee.clone())
            .unwrap()
            .clone();
        let b = sign_registration(&mut second, &signer(), committee.clone())
            .unwrap()
            .clone();

        assert_eq!(a.bytes(), b.bytes());
        assert!(a.verify(&committee, &Quorum::default()).is_ok());

        // unsigned ‖ tag ‖ bitset ‖ aggregate
        let bytes = a.bytes();
        assert_eq!(bytes.len(), 194 + 4 + 4 + 1 + 96);
        assert_eq!(hex::encode(&bytes[..194]), format!("{UNSIGNED_PREFIX_HEX}{PAYLOAD_HEX}"));
        assert_eq!(&bytes[194..203], &[0, 0, 0, 0, 0, 0, 0, 1, 0x01]);
    }

    #[test]
    fn test_every_single_bit_flip_rejected() {
        let committee = solo_committee();
        let quorum = Quorum::default();
        let mut reg = build_registration(&params()).unwrap();
        let original = sign_registration(&mut reg, &signer(), committee.clone())
            .unwrap()
            .bytes()
            .to_vec();

        for i in 0..original.len() {
            let mut tampered = original.clone();
            tampered[i] ^= 0x01;
            if let Ok(message) = Message::from_bytes(&tampered) {
                assert!(
                    message.verify(&committee, &quorum).is_err(),
                    "flip at byte {} still verifies",
                    i
                );
            }
        }
    }
}
