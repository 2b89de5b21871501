//! Text transport for keys.
//!
//! Keys serialize through serde as bare base64 strings. Inside an amino style envelope,
//! `{"type": "<tag>", "value": "<base64>"}`, the tag tells the decoder which key type to
//! produce. The tag to decoder mapping lives in a [`TypeRegistry`] value that the application
//! builds once at startup.

use crate::{EddsaError, EddsaResult, PrivateKey, PublicKey, PRIV_KEY_NAME, PUB_KEY_NAME};

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    collections::{hash_map::Entry, HashMap},
    convert::TryFrom,
};

/// Standard, padded base64
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn decode_base64(encoded: &str) -> EddsaResult<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(encoded)?)
}

/// Implements serde for a type with `to_bytes` / `from_bytes` as a base64 string
macro_rules! impl_base64_serde {
    ($type:ty) => {
        impl serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&$crate::codec::encode_base64(&self.to_bytes()))
            }
        }

        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let encoded = <String as serde::Deserialize>::deserialize(deserializer)?;
                let bytes =
                    $crate::codec::decode_base64(&encoded).map_err(serde::de::Error::custom)?;
                <$type>::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A value which travels inside a tagged envelope
pub trait Tagged: Sized {
    /// The fixed type string identifying the value
    const TYPE_TAG: &'static str;

    fn tagged_bytes(&self) -> Vec<u8>;

    fn from_tagged_bytes(bytes: &[u8]) -> EddsaResult<Self>;
}

impl Tagged for PrivateKey {
    const TYPE_TAG: &'static str = PRIV_KEY_NAME;

    fn tagged_bytes(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_tagged_bytes(bytes: &[u8]) -> EddsaResult<Self> {
        PrivateKey::from_bytes(bytes)
    }
}

impl Tagged for PublicKey {
    const TYPE_TAG: &'static str = PUB_KEY_NAME;

    fn tagged_bytes(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_tagged_bytes(bytes: &[u8]) -> EddsaResult<Self> {
        PublicKey::from_bytes(bytes)
    }
}

/// Any value a registry can decode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaggedKey {
    Private(PrivateKey),
    Public(PublicKey),
}

impl TaggedKey {
    pub fn type_tag(&self) -> &'static str {
        match self {
            TaggedKey::Private(_) => PrivateKey::TYPE_TAG,
            TaggedKey::Public(_) => PublicKey::TYPE_TAG,
        }
    }
}

impl From<PrivateKey> for TaggedKey {
    fn from(key: PrivateKey) -> Self {
        TaggedKey::Private(key)
    }
}

impl From<PublicKey> for TaggedKey {
    fn from(key: PublicKey) -> Self {
        TaggedKey::Public(key)
    }
}

impl TryFrom<TaggedKey> for PrivateKey {
    type Error = EddsaError;

    fn try_from(key: TaggedKey) -> EddsaResult<Self> {
        match key {
            TaggedKey::Private(key) => Ok(key),
            other => Err(EddsaError::UnexpectedTypeTag {
                expected: PrivateKey::TYPE_TAG,
                actual: other.type_tag(),
            }),
        }
    }
}

impl TryFrom<TaggedKey> for PublicKey {
    type Error = EddsaError;

    fn try_from(key: TaggedKey) -> EddsaResult<Self> {
        match key {
            TaggedKey::Public(key) => Ok(key),
            other => Err(EddsaError::UnexpectedTypeTag {
                expected: PublicKey::TYPE_TAG,
                actual: other.type_tag(),
            }),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    type_tag: String,
    value: String,
}

type Decoder = fn(&[u8]) -> EddsaResult<TaggedKey>;

fn decode_tagged<T: Tagged + Into<TaggedKey>>(bytes: &[u8]) -> EddsaResult<TaggedKey> {
    T::from_tagged_bytes(bytes).map(Into::into)
}

/// Maps type tags to decoders. Registration is explicit and its order does not matter,
/// registering a tag twice is an error.
///
/// ```rust
/// use eddsa_bn254::{PrivateKey, PublicKey, TypeRegistry};
///
/// let registry = TypeRegistry::with_eddsa_bn254().unwrap();
/// let pk = PrivateKey::from_secret(b"doc").public_key().unwrap();
///
/// let json = registry.encode(&pk).unwrap();
/// let decoded: PublicKey = registry.decode_as(&json).unwrap();
/// assert_eq!(pk, decoded);
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    decoders: HashMap<&'static str, Decoder>,
}

impl TypeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the EdDSA-BN254 private and public key types
    pub fn with_eddsa_bn254() -> EddsaResult<Self> {
        let mut registry = Self::new();
        registry.register::<PublicKey>()?;
        registry.register::<PrivateKey>()?;
        Ok(registry)
    }

    pub fn register<T: Tagged + Into<TaggedKey>>(&mut self) -> EddsaResult<()> {
        match self.decoders.entry(T::TYPE_TAG) {
            Entry::Occupied(_) => Err(EddsaError::DuplicateTypeTag(T::TYPE_TAG)),
            Entry::Vacant(entry) => {
                debug!("registering type tag {}", T::TYPE_TAG);
                entry.insert(decode_tagged::<T>);
                Ok(())
            }
        }
    }

    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.decoders.contains_key(type_tag)
    }

    /// Wraps the value in its tagged envelope. The value's type must be registered.
    pub fn encode<T: Tagged>(&self, value: &T) -> EddsaResult<String> {
        if !self.is_registered(T::TYPE_TAG) {
            return Err(EddsaError::UnknownTypeTag(T::TYPE_TAG.to_owned()));
        }
        let envelope = Envelope {
            type_tag: T::TYPE_TAG.to_owned(),
            value: encode_base64(&value.tagged_bytes()),
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    /// Decodes an envelope into whichever registered type its tag names
    pub fn decode(&self, json: &str) -> EddsaResult<TaggedKey> {
        let envelope: Envelope = serde_json::from_str(json)?;
        let decoder = self
            .decoders
            .get(envelope.type_tag.as_str())
            .ok_or_else(|| EddsaError::UnknownTypeTag(envelope.type_tag.clone()))?;
        decoder(&decode_base64(&envelope.value)?)
    }

    /// Decodes an envelope which must hold a `T`
    pub fn decode_as<T>(&self, json: &str) -> EddsaResult<T>
    where
        T: Tagged + TryFrom<TaggedKey, Error = EddsaError>,
    {
        T::try_from(self.decode(json)?)
    }
}
