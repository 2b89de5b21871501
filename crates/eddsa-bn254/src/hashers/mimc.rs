use super::FieldHasher;
use crate::field::{self, Fr, FIELD_ELEMENT_SIZE};

use ark_ff::{Field, Zero};
use once_cell::sync::Lazy;
use sha3::{Digest, Keccak256};

/// Number of rounds of the MiMC permutation
pub const MIMC_ROUNDS: usize = 91;

/// Number of input bytes absorbed per permutation call
pub const BLOCK_SIZE: usize = FIELD_ELEMENT_SIZE;

const SEED: &[u8] = b"seed";

/// Round constants. The seed is hashed once before use, then every constant is the Keccak256
/// of the previous one.
static ROUND_CONSTANTS: Lazy<Vec<Fr>> = Lazy::new(|| {
    let mut rnd = Keccak256::digest(SEED).to_vec();
    (0..MIMC_ROUNDS)
        .map(|_| {
            rnd = Keccak256::digest(&rnd).to_vec();
            field::from_bytes(&rnd)
        })
        .collect()
});

/// MiMC-7 over the BN254 scalar field in Miyaguchi-Preneel mode.
///
/// Input is consumed in 32 byte big endian blocks, each reduced modulo the field order. For
/// every block `x` the chaining value becomes `E_h(x) + h + x`, where `E_h` is the keyed MiMC
/// permutation. A trailing partial block is left padded with zeros, and a digest requested
/// over no input at all absorbs a single zero block.
///
/// # Examples
///
/// ```rust
/// use eddsa_bn254::{FieldHasher, MiMC};
///
/// let mut hasher = MiMC::default();
/// hasher.update(&[0u8; 32]);
/// let digest = hasher.finalize();
///
/// assert_eq!(digest, MiMC::digest(&[0u8; 32]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MiMC {
    /// Chaining value
    h: Fr,
    /// Bytes of a block that is not complete yet
    pending: Vec<u8>,
    /// Blocks absorbed since the last digest
    absorbed: usize,
}

impl MiMC {
    /// Forces the lazily evaluated round constants
    pub fn init() {
        Lazy::force(&ROUND_CONSTANTS);
    }

    fn encrypt(&self, mut m: Fr) -> Fr {
        for c in ROUND_CONSTANTS.iter() {
            let t = m + self.h + c;
            // t^7
            m = t.square() * t;
            m = m.square() * t;
        }
        m + self.h
    }

    fn absorb(&mut self, block: &[u8]) {
        let x = field::from_bytes(block);
        let e = self.encrypt(x);
        self.h = e + self.h + x;
        self.absorbed += 1;
    }
}

impl FieldHasher for MiMC {
    fn update(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
        let full = self.pending.len() - self.pending.len() % BLOCK_SIZE;
        if full == 0 {
            return;
        }
        let blocks = self.pending.drain(..full).collect::<Vec<_>>();
        for block in blocks.chunks(BLOCK_SIZE) {
            self.absorb(block);
        }
    }

    fn finalize(&mut self) -> Fr {
        if !self.pending.is_empty() {
            let mut block = [0u8; BLOCK_SIZE];
            block[BLOCK_SIZE - self.pending.len()..].copy_from_slice(&self.pending);
            self.pending.clear();
            self.absorb(&block);
        } else if self.absorbed == 0 {
            self.absorb(&[0u8; BLOCK_SIZE]);
        }
        self.absorbed = 0;
        self.h
    }

    fn reset(&mut self) {
        self.h = Fr::zero();
        self.pending.clear();
        self.absorbed = 0;
    }
}
