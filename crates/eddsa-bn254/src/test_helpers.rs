use crate::{PrivateKey, PublicKey};
use rand::{rngs::StdRng, SeedableRng};

// Same RNG for all tests
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5dbe_6259_8d31_3d76)
}

/// generate a keypair
pub fn keygen(rng: &mut StdRng) -> (PrivateKey, PublicKey) {
    let secret_key = PrivateKey::generate(rng).expect("seeded rng never fails");
    let public_key = secret_key
        .public_key()
        .expect("generated keys are initialized");
    (secret_key, public_key)
}

/// generate N keypairs
pub fn keygen_mul(num: usize) -> (Vec<PrivateKey>, Vec<PublicKey>) {
    let rng = &mut rng();
    let mut secret_keys = Vec::new();
    let mut public_keys = Vec::new();
    for _ in 0..num {
        let (secret_key, public_key) = keygen(rng);
        secret_keys.push(secret_key);
        public_keys.push(public_key);
    }
    (secret_keys, public_keys)
}

/// generate `num_batches` sets of keypair vectors, each `num_per_batch` size, all distinct
#[allow(clippy::type_complexity)]
pub fn keygen_batch(
    num_batches: usize,
    num_per_batch: usize,
) -> (Vec<Vec<PrivateKey>>, Vec<Vec<PublicKey>>) {
    let rng = &mut rng();
    let mut secret_keys = Vec::new();
    let mut public_keys = Vec::new();
    (0..num_batches).for_each(|_| {
        let (secret_keys_i, public_keys_i): (Vec<_>, Vec<_>) =
            (0..num_per_batch).map(|_| keygen(rng)).unzip();
        secret_keys.push(secret_keys_i);
        public_keys.push(public_keys_i);
    });
    (secret_keys, public_keys)
}
