use ballot_crypto::{encrypt_vote, verify_vote, AccountSecretKey, ElectionSecretKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn account_key() -> AccountSecretKey {
    AccountSecretKey::from_seed(&[7u8; 32]).unwrap()
}

fn ed25519_sign_bench(c: &mut Criterion) {
    let key = account_key();
    let msg = [42u8; 98];

    c.bench_function("ed25519_sign_witness", |b| {
        b.iter(|| ballot_crypto::sign_message(black_box(&msg), &key))
    });
}

fn ed25519_verify_bench(c: &mut Criterion) {
    let key = account_key();
    let msg = [42u8; 98];
    let sig = ballot_crypto::sign_message(&msg, &key);
    let pk = ballot_crypto::Signer::public_key(&key);

    c.bench_function("ed25519_verify_witness", |b| {
        b.iter(|| ballot_crypto::verify_signature(black_box(&msg), &sig, &pk))
    });
}

fn blake2b_256_bench(c: &mut Criterion) {
    let data = vec![0xCDu8; 1024];

    c.bench_function("blake2b_256_1KB", |b| {
        b.iter(|| ballot_crypto::blake2b_256(black_box(&data)))
    });
}

fn encrypt_vote_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let pk = ElectionSecretKey::generate(&mut rng).public_key();

    let mut group = c.benchmark_group("encrypt_vote");
    for options in [2u8, 4, 8] {
        group.bench_function(format!("{options}_options"), |b| {
            b.iter(|| encrypt_vote(&pk, options, 1, black_box(b"plan"), &mut rng).unwrap())
        });
    }
    group.finish();
}

fn verify_vote_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let pk = ElectionSecretKey::generate(&mut rng).public_key();
    let (vote, proof) = encrypt_vote(&pk, 4, 2, b"plan", &mut rng).unwrap();

    c.bench_function("verify_vote_4_options", |b| {
        b.iter(|| verify_vote(&pk, black_box(&vote), &proof, b"plan"))
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    ed25519_verify_bench,
    blake2b_256_bench,
    encrypt_vote_bench,
    verify_vote_bench,
);
criterion_main!(benches);
