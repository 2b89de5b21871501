use ark_ff::{BigInteger, PrimeField};

/// The BN254 scalar field. It is also the base field of the twisted Edwards curve the keys live
/// on, so public key coordinates are elements of it.
pub use ark_bn254::Fr;

/// Size in bytes of a canonically encoded field element
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Big endian, fixed width encoding of a field element
pub fn to_bytes(element: &Fr) -> [u8; FIELD_ELEMENT_SIZE] {
    let mut out = [0u8; FIELD_ELEMENT_SIZE];
    let bytes = element.into_bigint().to_bytes_be();
    out[FIELD_ELEMENT_SIZE - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Interprets the bytes as a big endian integer and reduces it modulo the field order
pub fn from_bytes(bytes: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Embeds a signed integer. Negative values map to `r - |v|`.
pub fn from_i64(value: i64) -> Fr {
    Fr::from(value)
}
