use crate::encoding::HeaderError;
use eddsa_bn254::{
    field::{self, Fr, FIELD_ELEMENT_SIZE},
    FieldHasher, MiMC,
};
use serde::{Deserialize, Serialize};

/// Size in bytes of an encoded header
pub const HEADER_AUX_SIZE: usize = 4 * FIELD_ELEMENT_SIZE;

/// The auxiliary header of a finalized block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderAux {
    /// MiMC hash of the block's application state hash
    pub app_hash: Fr,
    /// MiMC hash of the validator slate
    pub validators_hash: Fr,
    /// Block time in unix seconds
    pub time: Fr,
    /// Block height
    pub height: Fr,
}

impl HeaderAux {
    /// Creates a new header
    pub fn new(app_hash: Fr, validators_hash: Fr, time: Fr, height: Fr) -> Self {
        Self {
            app_hash,
            validators_hash,
            time,
            height,
        }
    }

    /// The fields in commitment order
    pub fn fields(&self) -> [Fr; 4] {
        [self.app_hash, self.validators_hash, self.time, self.height]
    }

    /// Hashes the four fields, in order, with MiMC
    pub fn digest(&self) -> Fr {
        self.hash_with::<MiMC>()
    }

    /// Hashes the four fields, in order, with the provided hasher
    pub fn hash_with<H: FieldHasher>(&self) -> Fr {
        let mut hasher = H::default();
        for element in self.fields().iter() {
            hasher.update(&field::to_bytes(element));
        }
        hasher.finalize()
    }

    /// Concatenation of the big endian encoded fields
    pub fn to_bytes(&self) -> [u8; HEADER_AUX_SIZE] {
        let mut out = [0u8; HEADER_AUX_SIZE];
        for (chunk, element) in out.chunks_mut(FIELD_ELEMENT_SIZE).zip(self.fields().iter()) {
            chunk.copy_from_slice(&field::to_bytes(element));
        }
        out
    }

    /// Decodes a header. Each field must be below the field order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() != HEADER_AUX_SIZE {
            return Err(HeaderError::InvalidLength {
                expected: HEADER_AUX_SIZE,
                actual: bytes.len(),
            });
        }

        let mut fields = [Fr::default(); 4];
        for (i, chunk) in bytes.chunks(FIELD_ELEMENT_SIZE).enumerate() {
            let element = field::from_bytes(chunk);
            if field::to_bytes(&element)[..] != *chunk {
                return Err(HeaderError::NonCanonicalField(i));
            }
            fields[i] = element;
        }
        let [app_hash, validators_hash, time, height] = fields;
        Ok(Self::new(app_hash, validators_hash, time, height))
    }
}

/// A header and its digest with every field as 32 byte big endian hex, the way the command line
/// tool prints them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderReport {
    pub app_hash: String,
    pub validators_hash: String,
    pub time: String,
    pub height: String,
    pub digest: String,
}

impl From<&HeaderAux> for HeaderReport {
    fn from(header: &HeaderAux) -> Self {
        let encode = |element: &Fr| hex::encode(field::to_bytes(element));
        Self {
            app_hash: encode(&header.app_hash),
            validators_hash: encode(&header.validators_hash),
            time: encode(&header.time),
            height: encode(&header.height),
            digest: encode(&header.digest()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::Zero;

    fn header() -> HeaderAux {
        HeaderAux::new(
            MiMC::digest(b"app"),
            MiMC::digest(b"validators"),
            field::from_i64(1_700_000_000),
            field::from_i64(100),
        )
    }

    #[test]
    fn digest_hashes_fields_in_order() {
        let header = header();
        assert_eq!(header.digest(), MiMC::digest(&header.to_bytes()));

        let mut swapped = header;
        swapped.time = header.height;
        swapped.height = header.time;
        assert_ne!(header.digest(), swapped.digest());
    }

    #[test]
    fn bytes_roundtrip() {
        let header = header();
        let bytes = header.to_bytes();
        assert_eq!(&bytes[96..127], &[0u8; 31][..]);
        assert_eq!(bytes[127], 100);
        assert_eq!(HeaderAux::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn rejects_bad_encodings() {
        match HeaderAux::from_bytes(&[0u8; 127]) {
            Err(HeaderError::InvalidLength { expected, actual }) => {
                assert_eq!(expected, HEADER_AUX_SIZE);
                assert_eq!(actual, 127);
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut bytes = header().to_bytes();
        bytes[64..96].copy_from_slice(&[0xff; 32]);
        match HeaderAux::from_bytes(&bytes) {
            Err(HeaderError::NonCanonicalField(2)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn report_is_hex_encoded() {
        let header = header();
        let report = HeaderReport::from(&header);
        assert_eq!(report.height, format!("{:064x}", 100));
        assert_eq!(report.time, format!("{:064x}", 1_700_000_000));
        assert_eq!(hex::decode(&report.digest).unwrap(), field::to_bytes(&header.digest()));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["app_hash"], report.app_hash.as_str());
        assert_eq!(serde_json::from_value::<HeaderReport>(json).unwrap(), report);
    }

    #[test]
    fn default_is_all_zeroes() {
        let header = HeaderAux::default();
        assert!(header.fields().iter().all(|f| f.is_zero()));
        assert_eq!(header.to_bytes(), [0u8; HEADER_AUX_SIZE]);
    }
}
