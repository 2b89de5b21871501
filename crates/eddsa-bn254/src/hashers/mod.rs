mod mimc;
pub use mimc::{MiMC, BLOCK_SIZE, MIMC_ROUNDS};

use crate::field::{self, Fr, FIELD_ELEMENT_SIZE};

/// A streaming hash whose digest is a BN254 scalar field element. Implementations are expected
/// to be cheap to express as arithmetic constraints over that field.
pub trait FieldHasher: Default {
    /// Absorbs more input. Writes may be split arbitrarily, only the concatenation matters.
    fn update(&mut self, data: &[u8]);

    /// Returns the digest of everything absorbed so far. The chaining state is kept, so further
    /// updates continue from it.
    fn finalize(&mut self) -> Fr;

    /// Returns the hasher to its initial state
    fn reset(&mut self);

    /// Digest encoded as 32 big endian bytes
    fn sum(&mut self) -> [u8; FIELD_ELEMENT_SIZE] {
        field::to_bytes(&self.finalize())
    }

    /// Hashes `data` with a fresh instance
    fn digest(data: &[u8]) -> Fr {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}
