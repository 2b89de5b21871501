use crate::builder::{FinalizedBlock, ValidatorInfo, ValidatorLookup};
use eddsa_bn254::PublicKey;
use serde::{Deserialize, Serialize};

/// A committee member as exchanged in JSON files
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Compressed EdDSA-BN254 public key, hex encoded
    #[serde(with = "hex_bytes")]
    pub pub_key: Vec<u8>,
    pub voting_power: i64,
}

impl Validator {
    pub fn new(public_key: &PublicKey, voting_power: i64) -> Self {
        Self {
            pub_key: public_key.to_bytes().to_vec(),
            voting_power,
        }
    }
}

impl ValidatorInfo for Validator {
    fn pub_key_bytes(&self) -> &[u8] {
        &self.pub_key
    }

    fn voting_power(&self) -> i64 {
        self.voting_power
    }
}

/// An ordered validator set. Index `i` is the `i`th element of the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorSet {
    validators: Vec<Validator>,
}

impl ValidatorSet {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

impl From<Vec<Validator>> for ValidatorSet {
    fn from(validators: Vec<Validator>) -> Self {
        Self::new(validators)
    }
}

impl ValidatorLookup for ValidatorSet {
    type Validator = Validator;

    fn len(&self) -> usize {
        self.validators.len()
    }

    fn get_by_index(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }
}

/// The parts of a finalized block the light header commits to
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(with = "hex_bytes")]
    pub app_hash: Vec<u8>,
    /// Unix seconds
    pub time: i64,
    pub height: i64,
}

impl FinalizedBlock for Block {
    fn app_hash(&self) -> &[u8] {
        &self.app_hash
    }

    fn unix_time(&self) -> i64 {
        self.time
    }

    fn height(&self) -> i64 {
        self.height
    }
}

/// Hex strings, with or without a `0x` prefix
mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(D::Error::custom)
    }
}
