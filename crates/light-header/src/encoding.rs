use eddsa_bn254::{
    field::{self, FIELD_ELEMENT_SIZE},
    EddsaError, PublicKey,
};
use thiserror::Error;

/// Size in bytes of one validator slot: `x`, `y` and voting power
pub const SLOT_SIZE: usize = 3 * FIELD_ELEMENT_SIZE;

/// An unoccupied slot
pub const EMPTY_SLOT: [u8; SLOT_SIZE] = [0u8; SLOT_SIZE];

#[derive(Debug, Error)]
/// Errors raised while building or decoding light headers
pub enum HeaderError {
    /// A validator's public key could not be decoded. The block it belongs to was already
    /// finalized, so there is no header that can be produced for it.
    #[error("validator {index} has a malformed public key: {source}")]
    MalformedValidatorKey {
        index: usize,
        #[source]
        source: EddsaError,
    },
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// The field element at the given position is not reduced modulo the field order
    #[error("field element {0} is not canonically encoded")]
    NonCanonicalField(usize),
}

impl HeaderError {
    /// Returns true when the error must halt the caller. A finalized block whose validator set
    /// cannot be committed to is a consensus invariant violation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HeaderError::MalformedValidatorKey { .. })
    }
}

/// Encodes an occupied slot: the public key coordinates then the voting power, each as a big
/// endian field element
pub fn encode_validator(public_key: &PublicKey, voting_power: i64) -> [u8; SLOT_SIZE] {
    let mut slot = [0u8; SLOT_SIZE];
    slot[..FIELD_ELEMENT_SIZE].copy_from_slice(&field::to_bytes(&public_key.x()));
    slot[FIELD_ELEMENT_SIZE..2 * FIELD_ELEMENT_SIZE]
        .copy_from_slice(&field::to_bytes(&public_key.y()));
    slot[2 * FIELD_ELEMENT_SIZE..]
        .copy_from_slice(&field::to_bytes(&field::from_i64(voting_power)));
    slot
}

#[cfg(test)]
mod test {
    use super::*;
    use eddsa_bn254::test_helpers::{keygen, rng};

    #[test]
    fn slot_layout() {
        let (_, pk) = keygen(&mut rng());
        let slot = encode_validator(&pk, 10);

        assert_eq!(&slot[..32], &field::to_bytes(&pk.x())[..]);
        assert_eq!(&slot[32..64], &field::to_bytes(&pk.y())[..]);
        assert_eq!(&slot[64..95], &[0u8; 31][..]);
        assert_eq!(slot[95], 10);
    }

    #[test]
    fn negative_power_wraps() {
        let (_, pk) = keygen(&mut rng());
        let slot = encode_validator(&pk, -1);
        assert_eq!(&slot[64..], &field::to_bytes(&field::from_i64(-1))[..]);
        assert_ne!(&slot[64..], &[0u8; 32][..]);
    }

    #[test]
    fn only_key_errors_are_fatal() {
        let err = HeaderError::MalformedValidatorKey {
            index: 3,
            source: EddsaError::InvalidLength {
                expected: 32,
                actual: 31,
            },
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("validator 3"));

        assert!(!HeaderError::NonCanonicalField(0).is_fatal());
        assert!(!HeaderError::InvalidLength {
            expected: 128,
            actual: 0
        }
        .is_fatal());
    }
}
