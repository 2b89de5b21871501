use super::PublicKey;
use crate::EddsaResult;

use log::trace;
use lru::LruCache;

/// Default number of decoded keys kept around
pub const DEFAULT_CACHE_SIZE: usize = 512;

/// Allows deserializing public keys while holding a cache to improve performance. Decoding a
/// compressed key costs a square root and a subgroup check, and validator committees change
/// slowly, so most lookups are hits.
pub struct PublicKeyCache {
    /// An in-memory mapping of serialized pubkey byte arrays to their decoded point
    pub de: LruCache<Vec<u8>, PublicKey>,
}

impl Default for PublicKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicKeyCache {
    /// Initializes an empty cache
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_SIZE)
    }

    /// Initializes an empty cache holding at most `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            de: LruCache::new(capacity),
        }
    }

    /// Clears the deserialization cache's keys
    pub fn clear_cache(&mut self) {
        self.de.clear();
    }

    /// Returns the PublicKey corresponding to the serialized data from the cache, or decodes
    /// it, saves it to the cache for later use and returns it. Failed decodes are not cached.
    pub fn deserialize(&mut self, data: &[u8]) -> EddsaResult<PublicKey> {
        let key = data.to_vec();
        if let Some(cached) = self.de.get(&key) {
            return Ok(*cached);
        }
        trace!("public key cache miss for {}", hex::encode(data));
        let decoded = PublicKey::from_bytes(data)?;
        self.de.put(key, decoded);
        Ok(decoded)
    }
}
