//! End-to-end vote casting through the public wallet API.

use ballot_crypto::ElectionSecretKey;
use ballot_genesis::{Block0Builder, ConfigParam, LinearFee, Settings, SettingsProvider};
use ballot_transactions::{
    Certificate, FragmentStatus, Payload, PayloadType, Transaction, TransactionError,
    UnitVectorEncoder, VoteCast,
};
use ballot_types::{
    BlockDate, Discrimination, SpendingCounter, TypesError, Value, VotePlanId, MAX_LANES,
};
use ballot_wallet_core::{Wallet, WalletError};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A 64-byte extended secret key whose scalar half is clamped.
const ACCOUNT_KEY: [u8; 64] = {
    let mut key = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        key[i] = (i as u8).wrapping_mul(37).wrapping_add(11);
        i += 1;
    }
    key[0] &= 0b1111_1000;
    key[31] &= 0b0111_1111;
    key[31] |= 0b0100_0000;
    key
};

const VOTE_PLAN: [u8; 32] = [
    0x0f, 0x46, 0x1c, 0x42, 0x34, 0x8b, 0x58, 0x3e, 0x07, 0x24, 0x45, 0x0d, 0x22, 0xa9, 0x2c,
    0xd1, 0xdb, 0x3b, 0x35, 0x24, 0xc8, 0x6b, 0x32, 0x71, 0x5c, 0x10, 0x3c, 0x53, 0x88, 0x9a,
    0x6e, 0x5f,
];

fn genesis(fee: LinearFee) -> Vec<u8> {
    Block0Builder::new()
        .param(ConfigParam::Discrimination(Discrimination::Test))
        .param(ConfigParam::Block0Date(1_600_000_000))
        .param(ConfigParam::SlotDuration(20))
        .param(ConfigParam::SlotsPerEpoch(180))
        .param(ConfigParam::LinearFee(fee))
        .build().unwrap()
}

fn settings() -> Settings {
    Settings::from_block0_bytes(&genesis(LinearFee::new(10, 2, 5))).unwrap()
}

fn all_lanes_at(value: u32) -> impl Iterator<Item = SpendingCounter> {
    (0..MAX_LANES as u8).map(move |lane| SpendingCounter::new(lane, value))
}

fn wallet(balance: u64) -> Wallet {
    let mut wallet = Wallet::import_key(&ACCOUNT_KEY).unwrap();
    wallet.set_state(Value(balance), all_lanes_at(1)).unwrap();
    assert_eq!(wallet.total_value(), Value(balance));
    wallet
}

fn vote_plan() -> VotePlanId {
    VotePlanId::from_bytes(&VOTE_PLAN).unwrap()
}

#[test]
fn scenario_a_public_vote() {
    let settings = settings();
    let mut wallet = wallet(1000);

    let payload = Payload::new_public(0);
    let cast = VoteCast::new(vote_plan(), 8, payload);
    let fragment = wallet
        .sign_transaction(&settings, BlockDate::new(0, 1), 0, Certificate::vote_cast(cast))
        .unwrap();

    assert_eq!(wallet.spending_counters().get(0).unwrap().value, 2);
    assert!(!fragment.id.is_zero());
    assert_eq!(fragment.status, FragmentStatus::Pending);
    assert_eq!(wallet.fragment_status(&fragment.id), Some(FragmentStatus::Pending));

    wallet.confirm_transaction(&fragment.id).unwrap();
    assert_eq!(wallet.fragment_status(&fragment.id), Some(FragmentStatus::Confirmed));
    // constant 10 + coefficient 2 * one input + certificate 5
    assert_eq!(wallet.total_value(), Value(983));
}

#[test]
fn scenario_b_private_vote() {
    let settings = settings();
    let mut wallet = wallet(1000);
    let mut rng = StdRng::seed_from_u64(7);
    let election = ElectionSecretKey::generate(&mut rng);
    let encryption_key = election.public_key().to_bytes();

    let private = Payload::new_private(&vote_plan(), 4, 0, &encryption_key).unwrap();
    assert_eq!(private.payload_type(), PayloadType::Private);
    let fragment = wallet
        .sign_transaction(
            &settings,
            BlockDate::new(0, 1),
            0,
            Certificate::vote_cast(VoteCast::new(vote_plan(), 8, private)),
        )
        .unwrap();

    let public_fragment = wallet
        .sign_transaction(
            &settings,
            BlockDate::new(0, 1),
            1,
            Certificate::vote_cast(VoteCast::new(vote_plan(), 8, Payload::new_public(0))),
        )
        .unwrap();
    assert!(fragment.bytes.len() > public_fragment.bytes.len());

    // The fragment carries a ballot the tally key can open and anyone can check.
    let tx = Transaction::deserialize(&fragment.bytes).unwrap();
    tx.verify(&settings.chain_tag()).unwrap();
    let Certificate::VoteCast(cast) = tx.certificate();
    assert!(cast.payload.verify(&vote_plan(), &election.public_key()));
    match &cast.payload {
        Payload::Private { encrypted_vote, .. } => {
            assert_eq!(encrypted_vote.num_options(), 4);
            assert_eq!(election.decrypt_vote(encrypted_vote), Some(0));
        }
        Payload::Public { .. } => panic!("expected a private payload"),
    }
}

#[test]
fn scenario_c_insufficient_funds() {
    let settings = settings();
    let mut wallet = wallet(0);
    let before = wallet.spending_counters();

    let err = wallet
        .sign_transaction(
            &settings,
            BlockDate::new(0, 1),
            0,
            Certificate::vote_cast(VoteCast::new(vote_plan(), 8, Payload::new_public(0))),
        )
        .unwrap_err();
    assert_eq!(
        err,
        WalletError::InsufficientFunds {
            needed: Value(17),
            available: Value(0)
        }
    );
    assert_eq!(wallet.spending_counters(), before);
    assert!(wallet.pending_transactions().is_empty());
}

#[test]
fn scenario_d_short_vote_plan_id() {
    assert_eq!(
        VotePlanId::from_bytes(&VOTE_PLAN[..31]),
        Err(TypesError::InvalidIdentifierLength {
            expected: 32,
            got: 31
        })
    );
}

#[test]
fn private_payloads_are_randomised_but_decrypt_alike() {
    let mut rng = StdRng::seed_from_u64(11);
    let election = ElectionSecretKey::generate(&mut rng);
    let key = election.public_key().to_bytes();

    let a = Payload::new_private(&vote_plan(), 3, 2, &key).unwrap();
    let b = Payload::new_private(&vote_plan(), 3, 2, &key).unwrap();
    assert_ne!(a, b);

    for payload in [&a, &b] {
        assert!(payload.verify(&vote_plan(), &election.public_key()));
        match payload {
            Payload::Private { encrypted_vote, .. } => {
                assert_eq!(election.decrypt_vote(encrypted_vote), Some(2))
            }
            Payload::Public { .. } => unreachable!(),
        }
    }
}

#[test]
fn invalid_choice_and_key_are_rejected() {
    let mut rng = StdRng::seed_from_u64(12);
    let key = ElectionSecretKey::generate(&mut rng).public_key().to_bytes();
    assert!(matches!(
        Payload::new_private(&vote_plan(), 4, 4, &key),
        Err(TransactionError::Crypto(
            ballot_crypto::CryptoError::InvalidChoice { .. }
        ))
    ));
    assert!(matches!(
        Payload::new_private(&vote_plan(), 4, 1, &[0xFF; 32]),
        Err(TransactionError::Crypto(
            ballot_crypto::CryptoError::InvalidEncryptionKey
        ))
    ));
}

#[test]
fn key_import_fails_fast() {
    assert!(matches!(
        Wallet::import_key(&ACCOUNT_KEY[..32]),
        Err(WalletError::Crypto(_))
    ));
    let mut unclamped = ACCOUNT_KEY;
    unclamped[0] |= 0b0000_0001;
    assert!(Wallet::import_key(&unclamped).is_err());
}

#[test]
fn fragment_id_tracks_every_signed_field() {
    let settings = settings();
    let other_chain = Settings::from_block0_bytes(&genesis(LinearFee::new(10, 2, 6))).unwrap();
    assert_ne!(settings.chain_tag(), other_chain.chain_tag());

    let cert = |choice| {
        Certificate::vote_cast(VoteCast::new(vote_plan(), 8, Payload::new_public(choice)))
    };
    let sign = |settings: &Settings, lane: u8, counter: u32, choice: u8| {
        let mut wallet = Wallet::import_key(&ACCOUNT_KEY).unwrap();
        wallet
            .set_state(Value(1000), [SpendingCounter::new(lane, counter)])
            .unwrap();
        wallet
            .sign_transaction(settings, BlockDate::new(0, 1), lane, cert(choice))
            .unwrap()
            .id
    };

    let base = sign(&settings, 0, 1, 0);
    assert_eq!(base, sign(&settings, 0, 1, 0));
    assert_ne!(base, sign(&settings, 1, 1, 0));
    assert_ne!(base, sign(&settings, 0, 2, 0));
    assert_ne!(base, sign(&settings, 0, 1, 1));
    assert_ne!(base, sign(&other_chain, 0, 1, 0));
}

#[test]
fn lenient_confirmation_ignores_unknown_fragments() {
    let config = ballot_wallet_core::WalletConfig::from_toml_str("strict_confirmation = false")
        .unwrap();
    let mut wallet = Wallet::import_key_with_config(&ACCOUNT_KEY, &config).unwrap();
    let id = ballot_types::FragmentId::new([1u8; 32]);
    assert_eq!(wallet.confirm_transaction(&id), Ok(()));
}

#[test]
fn seeded_encoder_gives_reproducible_payloads() {
    let mut rng = StdRng::seed_from_u64(13);
    let key = ElectionSecretKey::generate(&mut rng).public_key().to_bytes();
    let encode = |seed| {
        let mut encoder = UnitVectorEncoder::with_rng(StdRng::seed_from_u64(seed));
        Payload::new_private_with(&mut encoder, &vote_plan(), 2, 1, &key).unwrap()
    };
    assert_eq!(encode(1), encode(1));
    assert_ne!(encode(1), encode(2));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn signing_advances_only_its_lane(lane in 0u8..8, start in 0u32..1_000) {
        let settings = settings();
        let mut wallet = Wallet::import_key(&ACCOUNT_KEY).unwrap();
        wallet.set_state(Value(1000), all_lanes_at(start)).unwrap();

        wallet
            .sign_transaction(
                &settings,
                BlockDate::new(0, 1),
                lane,
                Certificate::vote_cast(VoteCast::new(vote_plan(), 0, Payload::new_public(1))),
            )
            .unwrap();

        for counter in wallet.spending_counters().iter() {
            let expected = if counter.lane == lane { start + 1 } else { start };
            prop_assert_eq!(counter.value, expected);
        }
    }

    #[test]
    fn out_of_range_lane_always_fails(lane in 8u8.., balance in any::<u64>()) {
        let settings = settings();
        let mut wallet = Wallet::import_key(&ACCOUNT_KEY).unwrap();
        wallet.set_state(Value(balance), all_lanes_at(0)).unwrap();
        let before = wallet.spending_counters();

        let err = wallet
            .sign_transaction(
                &settings,
                BlockDate::new(0, 1),
                lane,
                Certificate::vote_cast(VoteCast::new(vote_plan(), 0, Payload::new_public(0))),
            )
            .unwrap_err();
        prop_assert_eq!(err, WalletError::Types(TypesError::InvalidLane(lane)));
        prop_assert_eq!(wallet.spending_counters(), before);
    }

    #[test]
    fn set_state_reports_balance(balance in any::<u64>()) {
        let mut wallet = Wallet::import_key(&ACCOUNT_KEY).unwrap();
        wallet.set_state(Value(balance), all_lanes_at(3)).unwrap();
        prop_assert_eq!(wallet.total_value(), Value(balance));
    }
}
