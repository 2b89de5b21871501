//! The oneof style public key message used by the binary transport. Only the EdDSA-BN254 arm
//! is handled here; the other key types belong to their own crates and are reported as
//! unsupported.

use crate::{EddsaError, EddsaResult, PublicKey, PUBLIC_KEY_SIZE};

/// The `sum` oneof of the public key message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKeySum {
    Ed25519(Vec<u8>),
    Secp256k1(Vec<u8>),
    Eddsabn254(Vec<u8>),
}

impl PublicKeySum {
    fn name(&self) -> &'static str {
        match self {
            PublicKeySum::Ed25519(_) => "ed25519",
            PublicKeySum::Secp256k1(_) => "secp256k1",
            PublicKeySum::Eddsabn254(_) => crate::KEY_TYPE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicKeyProto {
    pub sum: Option<PublicKeySum>,
}

/// Wraps the raw 32 byte key in the `eddsabn254` arm
pub fn pub_key_to_proto(key: &PublicKey) -> PublicKeyProto {
    PublicKeyProto {
        sum: Some(PublicKeySum::Eddsabn254(key.to_bytes().to_vec())),
    }
}

/// Extracts the key, re-checking the declared length before decoding the point
pub fn pub_key_from_proto(proto: &PublicKeyProto) -> EddsaResult<PublicKey> {
    match &proto.sum {
        Some(PublicKeySum::Eddsabn254(bytes)) => {
            if bytes.len() != PUBLIC_KEY_SIZE {
                return Err(EddsaError::InvalidLength {
                    expected: PUBLIC_KEY_SIZE,
                    actual: bytes.len(),
                });
            }
            PublicKey::from_bytes(bytes)
        }
        Some(other) => Err(EddsaError::UnsupportedKeyType(other.name())),
        None => Err(EddsaError::MissingKey),
    }
}
