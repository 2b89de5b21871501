/// Implements EdDSA on the twisted Edwards curve over the BN254 scalar field, with a
/// `FieldHasher` (MiMC by default) hashing the challenge `H(R, A, M)`.
mod secret;
pub use secret::PrivateKey;

mod public;
pub use public::PublicKey;

mod signature;
pub use signature::Signature;

mod cache;
pub use cache::{PublicKeyCache, DEFAULT_CACHE_SIZE};

use crate::{
    curve::{EdwardsAffine, ScalarField},
    field::{self, FIELD_ELEMENT_SIZE},
    EddsaError, EddsaResult, FieldHasher,
};

use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// Compressed encoding of a curve point: the `y` coordinate with the sign of `x` folded into
/// the spare top bit
pub(crate) fn compress(point: &EdwardsAffine) -> [u8; FIELD_ELEMENT_SIZE] {
    let mut out = [0u8; FIELD_ELEMENT_SIZE];
    point
        .serialize_compressed(&mut out[..])
        .expect("a compressed point always fits in 32 bytes");
    out
}

/// Decodes a compressed point. The point must be on the curve and in the prime order subgroup.
pub(crate) fn decompress(bytes: &[u8]) -> EddsaResult<EdwardsAffine> {
    check_len(bytes, FIELD_ELEMENT_SIZE)?;
    Ok(EdwardsAffine::deserialize_compressed(bytes)?)
}

/// Big endian encoding of a scalar
pub(crate) fn scalar_to_bytes(scalar: &ScalarField) -> [u8; FIELD_ELEMENT_SIZE] {
    let mut out = [0u8; FIELD_ELEMENT_SIZE];
    let bytes = scalar.into_bigint().to_bytes_be();
    out[FIELD_ELEMENT_SIZE - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Strict big endian scalar decoding, values at or above the group order are rejected
pub(crate) fn scalar_from_bytes(bytes: &[u8]) -> EddsaResult<ScalarField> {
    check_len(bytes, FIELD_ELEMENT_SIZE)?;
    let mut le = bytes.to_vec();
    le.reverse();
    ScalarField::deserialize_compressed(&le[..]).map_err(|_| EddsaError::NonCanonicalScalar)
}

/// The challenge `H(R.x || R.y || A.x || A.y || M)`, reduced modulo the group order
pub(crate) fn challenge<H: FieldHasher>(
    r: &EdwardsAffine,
    a: &EdwardsAffine,
    message: &[u8],
) -> ScalarField {
    let mut hasher = H::default();
    hasher.update(&field::to_bytes(&r.x));
    hasher.update(&field::to_bytes(&r.y));
    hasher.update(&field::to_bytes(&a.x));
    hasher.update(&field::to_bytes(&a.y));
    hasher.update(message);
    ScalarField::from_be_bytes_mod_order(&hasher.sum())
}

pub(crate) fn check_len(bytes: &[u8], expected: usize) -> EddsaResult<()> {
    if bytes.len() != expected {
        return Err(EddsaError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
