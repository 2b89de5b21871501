use super::{check_len, compress, decompress, scalar_from_bytes, scalar_to_bytes};
use crate::{
    curve::{EdwardsAffine, ScalarField},
    EddsaResult, SIGNATURE_SIZE,
};

const POINT_SIZE: usize = SIGNATURE_SIZE / 2;

/// An EdDSA signature `(R, S)`. Encoded as the compressed point `R` followed by the big endian
/// scalar `S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: EdwardsAffine,
    s: ScalarField,
}

impl Signature {
    pub(crate) fn new(r: EdwardsAffine, s: ScalarField) -> Signature {
        Signature { r, s }
    }

    /// The commitment point `R`
    pub fn r(&self) -> &EdwardsAffine {
        &self.r
    }

    /// The response scalar `S`
    pub fn s(&self) -> ScalarField {
        self.s
    }

    /// The 64 byte encoding
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..POINT_SIZE].copy_from_slice(&compress(&self.r));
        out[POINT_SIZE..].copy_from_slice(&scalar_to_bytes(&self.s));
        out
    }

    /// Decodes a 64 byte signature. `R` must be a valid subgroup point and `S` must be
    /// reduced modulo the group order.
    pub fn from_bytes(bytes: &[u8]) -> EddsaResult<Signature> {
        check_len(bytes, SIGNATURE_SIZE)?;
        let r = decompress(&bytes[..POINT_SIZE])?;
        let s = scalar_from_bytes(&bytes[POINT_SIZE..])?;
        Ok(Signature { r, s })
    }
}

impl_base64_serde!(Signature);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EddsaError, PrivateKey};
    use ark_ff::{BigInteger, PrimeField};
    use rand::{thread_rng, Rng};

    #[test]
    fn test_signature_serialization() {
        let rng = &mut thread_rng();

        for _ in 0..100 {
            let message: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
            let sk = PrivateKey::generate(rng).unwrap();
            let sig = sk.sign(&message).unwrap();
            let sig_bytes = sig.to_bytes();
            let de = Signature::from_bytes(&sig_bytes).unwrap();
            assert_eq!(sig, de);
        }
    }

    #[test]
    fn rejects_non_canonical_scalars() {
        let sig = PrivateKey::from_secret(b"scalar").sign(b"m").unwrap();
        let mut bytes = sig.to_bytes();
        let modulus = ScalarField::MODULUS.to_bytes_be();
        bytes[POINT_SIZE..].copy_from_slice(&modulus);
        assert!(matches!(
            Signature::from_bytes(&bytes),
            Err(EddsaError::NonCanonicalScalar)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let sig = PrivateKey::from_secret(b"length").sign(b"m").unwrap();
        let bytes = sig.to_bytes();
        assert!(matches!(
            Signature::from_bytes(&bytes[1..]),
            Err(EddsaError::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual: 63
            })
        ));
    }
}
