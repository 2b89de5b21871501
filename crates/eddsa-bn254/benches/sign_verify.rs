use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;

use eddsa_bn254::{FieldHasher, MiMC, PrivateKey};

fn sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("eddsa");
    group.sample_size(10);
    // a committee worth of keys signing one block each
    const NUM_VALIDATORS: usize = 150;
    let rng = &mut rand::thread_rng();

    let msgs = (0..NUM_VALIDATORS)
        .map(|_| (0..32).map(|_| rng.gen()).collect::<Vec<u8>>())
        .collect::<Vec<_>>();
    let keys = (0..NUM_VALIDATORS)
        .map(|_| PrivateKey::generate(rng).unwrap())
        .collect::<Vec<_>>();
    let pubkeys = keys
        .iter()
        .map(|sk| sk.public_key().unwrap())
        .collect::<Vec<_>>();

    group.bench_function("signing", |b| {
        b.iter(|| {
            keys.iter().zip(&msgs).for_each(|(sk, msg)| {
                sk.sign(msg).unwrap();
            })
        })
    });

    let sigs = keys
        .iter()
        .zip(&msgs)
        .map(|(sk, msg)| sk.sign(msg).unwrap())
        .collect::<Vec<_>>();
    group.bench_function("individual verification", |b| {
        b.iter(|| {
            pubkeys
                .iter()
                .zip(&sigs)
                .zip(&msgs)
                .for_each(|((pk, sig), msg)| assert!(pk.verify_signature(msg, sig)))
        })
    });

    // the validator slate hashed by the light header: 150 slots of three field elements
    let slate = vec![0u8; NUM_VALIDATORS * 3 * 32];
    group.bench_function("mimc validator slate", |b| b.iter(|| MiMC::digest(&slate)));
}

criterion_group!(benches, sign_verify);
criterion_main!(benches);
