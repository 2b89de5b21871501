//! # EdDSA over BN254
//!
//! This crate implements EdDSA signatures on the twisted Edwards curve defined over the BN254
//! scalar field. The scheme's internal hash is MiMC, so signatures and the public keys they
//! commit to can be re-verified cheaply inside a SNARK over BN254.

/// Tagged text envelopes and the type registry
#[macro_use]
pub mod codec;
pub use codec::{Tagged, TaggedKey, TypeRegistry};

/// The twisted Edwards curve keys live on
pub mod curve;

/// EdDSA signing
pub(crate) mod eddsa;
pub use eddsa::{PrivateKey, PublicKey, PublicKeyCache, Signature, DEFAULT_CACHE_SIZE};

/// Canonical encodings of BN254 scalar field elements
pub mod field;

/// Circuit friendly hash functions
pub mod hashers;
pub use hashers::{FieldHasher, MiMC};

/// Mapping of public keys to the oneof wire message
pub mod proto;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use thiserror::Error;

/// Convenience result alias
pub type EddsaResult<T> = std::result::Result<T, EddsaError>;

/// Size in bytes of an encoded public key (a compressed curve point)
pub const PUBLIC_KEY_SIZE: usize = field::FIELD_ELEMENT_SIZE;

/// Size in bytes of an encoded private key: the public key, the secret scalar and the
/// random source used to derive signing nonces
pub const PRIVATE_KEY_SIZE: usize = 2 * field::FIELD_ELEMENT_SIZE + 32;

/// Size in bytes of an encoded signature: the compressed point `R` and the scalar `S`
pub const SIGNATURE_SIZE: usize = 2 * field::FIELD_ELEMENT_SIZE;

/// Short name of the key type
pub const KEY_TYPE: &str = "eddsabn254";

/// Type tag of private keys inside tagged text envelopes
pub const PRIV_KEY_NAME: &str = "tendermint/PrivKeyEddsabn254";

/// Type tag of public keys inside tagged text envelopes
pub const PUB_KEY_NAME: &str = "tendermint/PubKeyEddsabn254";

/// Address length, in bytes
pub const ADDRESS_SIZE: usize = 20;

/// A 20 byte account address derived from a public key
pub type Address = [u8; ADDRESS_SIZE];

#[derive(Debug, Error)]
/// Error type
pub enum EddsaError {
    /// A byte buffer did not have the expected fixed length
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// A curve point or field element could not be decoded
    #[error("{0}")]
    SerializationError(#[from] ark_serialize::SerializationError),
    /// The scalar half of a signature is not reduced modulo the group order
    #[error("signature scalar is not canonical")]
    NonCanonicalScalar,
    #[error("invalid pubkey: unset X or Y coordinate")]
    UnsetCoordinate,
    #[error("base64 error {0}")]
    Base64Error(#[from] base64::DecodeError),
    #[error("json error {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("no type registered for tag {0:?}")]
    UnknownTypeTag(String),
    #[error("type tag {0:?} is already registered")]
    DuplicateTypeTag(&'static str),
    /// The decoded envelope holds a different kind of key than requested
    #[error("expected a value tagged {expected:?}, got {actual:?}")]
    UnexpectedTypeTag {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("key type {0} is not supported")]
    UnsupportedKeyType(&'static str),
    #[error("public key message carries no key")]
    MissingKey,
    /// A condition the caller must not recover from
    #[error("unrecoverable: {0}")]
    Fatal(#[from] Unrecoverable),
}

impl EddsaError {
    /// Returns true when the error belongs to the unrecoverable channel. Callers must abort the
    /// operation that produced it instead of retrying or falling back.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EddsaError::Fatal(_))
    }
}

/// Conditions after which continuing risks using broken key material
#[derive(Debug, Error)]
pub enum Unrecoverable {
    #[error("secure randomness source failed: {0}")]
    RandomnessUnavailable(#[source] rand::Error),
    #[error("private key is not initialized")]
    UninitializedPrivateKey,
}
