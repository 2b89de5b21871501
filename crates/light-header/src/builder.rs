use crate::{
    encoding::{encode_validator, HeaderError, EMPTY_SLOT},
    header_aux::HeaderAux,
    MAX_VALIDATORS,
};
use eddsa_bn254::{
    field::{self, Fr},
    EddsaResult, FieldHasher, MiMC, PublicKey, PublicKeyCache,
};
use tracing::{debug, error, span, warn, Level};

/// Read access to a block that consensus has finalized
pub trait FinalizedBlock {
    /// The application state hash, as opaque bytes
    fn app_hash(&self) -> &[u8];
    /// Block time in unix seconds
    fn unix_time(&self) -> i64;
    fn height(&self) -> i64;
}

/// A committee member
pub trait ValidatorInfo {
    /// The compressed EdDSA-BN254 public key
    fn pub_key_bytes(&self) -> &[u8];
    fn voting_power(&self) -> i64;
}

/// Indexed access to the validator set of a block
pub trait ValidatorLookup {
    type Validator: ValidatorInfo;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the validator at `index`, or `None` past the end of the set
    fn get_by_index(&self, index: usize) -> Option<&Self::Validator>;
}

/// Derives the auxiliary header of a finalized block.
///
/// Fails only when a validator's public key cannot be decoded. That error is fatal: the caller
/// must stop processing instead of skipping the block.
pub fn build_light_header<B, V>(block: &B, validators: &V) -> Result<HeaderAux, HeaderError>
where
    B: FinalizedBlock,
    V: ValidatorLookup,
{
    build_with(block, validators, PublicKey::from_bytes)
}

/// MiMC hash of the validator slate: [`MAX_VALIDATORS`] slots, each either the encoded
/// validator or [`EMPTY_SLOT`]
pub fn validators_hash<V: ValidatorLookup>(validators: &V) -> Result<Fr, HeaderError> {
    validators_hash_with(validators, PublicKey::from_bytes)
}

/// Builds headers for consecutive blocks, keeping decoded validator keys in an LRU cache.
/// Validator sets rarely change between blocks, so most keys are only decompressed once.
pub struct LightHeaderBuilder {
    cache: PublicKeyCache,
}

impl Default for LightHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LightHeaderBuilder {
    pub fn new() -> Self {
        Self {
            cache: PublicKeyCache::new(),
        }
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: PublicKeyCache::with_capacity(capacity),
        }
    }

    /// Same as [`build_light_header`]
    pub fn build<B, V>(&mut self, block: &B, validators: &V) -> Result<HeaderAux, HeaderError>
    where
        B: FinalizedBlock,
        V: ValidatorLookup,
    {
        let cache = &mut self.cache;
        build_with(block, validators, |bytes| cache.deserialize(bytes))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear_cache()
    }
}

fn build_with<B, V, F>(block: &B, validators: &V, decode: F) -> Result<HeaderAux, HeaderError>
where
    B: FinalizedBlock,
    V: ValidatorLookup,
    F: FnMut(&[u8]) -> EddsaResult<PublicKey>,
{
    let span = span!(Level::DEBUG, "light_header", height = block.height());
    let _enter = span.enter();

    let header = HeaderAux {
        app_hash: MiMC::digest(block.app_hash()),
        validators_hash: validators_hash_with(validators, decode)?,
        time: field::from_i64(block.unix_time()),
        height: field::from_i64(block.height()),
    };
    debug!(
        validators = validators.len(),
        digest = %hex::encode(field::to_bytes(&header.digest())),
        "built light header"
    );
    Ok(header)
}

fn validators_hash_with<V, F>(validators: &V, mut decode: F) -> Result<Fr, HeaderError>
where
    V: ValidatorLookup,
    F: FnMut(&[u8]) -> EddsaResult<PublicKey>,
{
    if validators.len() > MAX_VALIDATORS {
        warn!(
            validators = validators.len(),
            slots = MAX_VALIDATORS,
            "validator set exceeds the slate, extra validators are not committed"
        );
    }

    let mut hasher = MiMC::default();
    for index in 0..MAX_VALIDATORS {
        match validators.get_by_index(index) {
            Some(validator) => {
                let public_key = decode(validator.pub_key_bytes()).map_err(|source| {
                    error!(index, %source, "cannot decode validator public key");
                    HeaderError::MalformedValidatorKey { index, source }
                })?;
                hasher.update(&encode_validator(&public_key, validator.voting_power()));
            }
            None => hasher.update(&EMPTY_SLOT),
        }
    }
    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{Block, Validator, ValidatorSet};
    use eddsa_bn254::test_helpers::keygen_mul;

    fn block() -> Block {
        Block {
            app_hash: vec![7u8; 32],
            time: 1_700_000_000,
            height: 100,
        }
    }

    #[test]
    fn cached_builder_matches_plain_build() {
        let (_, pks) = keygen_mul(4);
        let set = ValidatorSet::new(pks.iter().map(|pk| Validator::new(pk, 1)).collect());

        let expected = build_light_header(&block(), &set).unwrap();
        let mut builder = LightHeaderBuilder::with_cache_capacity(2);
        assert_eq!(builder.build(&block(), &set).unwrap(), expected);
        // second pass hits the cache for some of the keys
        assert_eq!(builder.build(&block(), &set).unwrap(), expected);
        builder.clear_cache();
        assert_eq!(builder.build(&block(), &set).unwrap(), expected);
    }

    #[test]
    fn reports_the_failing_slot() {
        let (_, pks) = keygen_mul(3);
        let mut validators = pks
            .iter()
            .map(|pk| Validator::new(pk, 1))
            .collect::<Vec<_>>();
        validators[2].pub_key.truncate(31);
        let set = ValidatorSet::new(validators);

        let err = build_light_header(&block(), &set).unwrap_err();
        assert!(err.is_fatal());
        match err {
            HeaderError::MalformedValidatorKey { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(LightHeaderBuilder::new().build(&block(), &set).is_err());
    }

    #[test]
    fn slate_hash_matches_header() {
        let (_, pks) = keygen_mul(2);
        let set = ValidatorSet::new(pks.iter().map(|pk| Validator::new(pk, 3)).collect());
        let header = build_light_header(&block(), &set).unwrap();
        assert_eq!(header.validators_hash, validators_hash(&set).unwrap());
    }
}
