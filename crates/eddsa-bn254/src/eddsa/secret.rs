use super::{challenge, check_len, decompress, PublicKey, Signature};
use crate::{
    curve::{EdwardsAffine, ScalarField},
    hashers::MiMC,
    EddsaResult, FieldHasher, Unrecoverable, KEY_TYPE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use log::{error, trace};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use std::fmt;

const SCALAR_SIZE: usize = 32;
const SEED_SIZE: usize = 32;

/// An EdDSA private key.
///
/// Besides the secret scalar it carries its public key and a 32 byte random source which
/// is hashed together with each message to derive the signing nonce, so signing is
/// deterministic and needs no randomness.
#[derive(Clone)]
pub struct PrivateKey {
    public: EdwardsAffine,
    /// big endian, not reduced modulo the group order
    scalar: [u8; SCALAR_SIZE],
    rand_src: [u8; 32],
}

impl Default for PrivateKey {
    /// The uninitialized key. Deriving a public key from it or signing with it is fatal.
    fn default() -> Self {
        PrivateKey {
            public: EdwardsAffine::zero(),
            scalar: [0u8; SCALAR_SIZE],
            rand_src: [0u8; 32],
        }
    }
}

impl PrivateKey {
    /// Generates a new key from the operating system's randomness source
    pub fn generate_key() -> EddsaResult<PrivateKey> {
        Self::generate(&mut OsRng)
    }

    /// Generates a new key by drawing a seed from `rng`. A failing source is unrecoverable.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> EddsaResult<PrivateKey> {
        let mut seed = [0u8; SEED_SIZE];
        if let Err(e) = rng.try_fill_bytes(&mut seed) {
            error!("could not draw a key seed: {}", e);
            return Err(Unrecoverable::RandomnessUnavailable(e).into());
        }
        Ok(Self::from_seed(&seed))
    }

    /// Deterministically derives a key from a secret: the secret is hashed with SHA256 and the
    /// digest is used as the seed. The secret should be the output of a KDF if it comes from
    /// user input.
    pub fn from_secret(secret: &[u8]) -> PrivateKey {
        let mut seed = [0u8; SEED_SIZE];
        seed.copy_from_slice(&Sha256::digest(secret));
        Self::from_seed(&seed)
    }

    /// Expands a 32 byte seed with Blake2b-512. The lower half, pruned as in RFC 8032, is the
    /// secret scalar and the upper half is the nonce random source.
    pub fn from_seed(seed: &[u8; SEED_SIZE]) -> PrivateKey {
        let h = blake2b_simd::blake2b(seed);
        let h = h.as_bytes();

        let mut rand_src = [0u8; 32];
        rand_src.copy_from_slice(&h[32..64]);

        let mut scalar = [0u8; SCALAR_SIZE];
        scalar.copy_from_slice(&h[..SCALAR_SIZE]);
        scalar[0] &= 0xF8;
        scalar[31] &= 0x7F;
        scalar[31] |= 0x40;
        // the pruned bytes are little endian, the key stores big endian
        scalar.reverse();

        let sk = ScalarField::from_be_bytes_mod_order(&scalar);
        let public = (EdwardsAffine::generator() * sk).into_affine();
        trace!(
            "derived eddsa key with public key {}",
            hex::encode(super::compress(&public))
        );

        PrivateKey {
            public,
            scalar,
            rand_src,
        }
    }

    /// Whether the key holds a secret scalar
    pub fn is_initialized(&self) -> bool {
        self.scalar != [0u8; SCALAR_SIZE]
    }

    /// Returns the public key. Fails with an unrecoverable error on the uninitialized key.
    pub fn public_key(&self) -> EddsaResult<PublicKey> {
        if !self.is_initialized() {
            error!("public key requested from an uninitialized private key");
            return Err(Unrecoverable::UninitializedPrivateKey.into());
        }
        Ok(PublicKey::from(self.public))
    }

    /// Signs the message using MiMC as the challenge hash
    pub fn sign(&self, message: &[u8]) -> EddsaResult<Signature> {
        self.sign_with::<MiMC>(message)
    }

    /// Signs the message using `H` as the challenge hash.
    ///
    /// `r = Blake2b(rand_src || M)[..32] mod l`, `R = r * G` and `S = r + H(R, A, M) * s`.
    pub fn sign_with<H: FieldHasher>(&self, message: &[u8]) -> EddsaResult<Signature> {
        let public = self.public_key()?;

        let mut nonce_input = Vec::with_capacity(self.rand_src.len() + message.len());
        nonce_input.extend_from_slice(&self.rand_src);
        nonce_input.extend_from_slice(message);
        let nonce_hash = blake2b_simd::blake2b(&nonce_input);
        let r = ScalarField::from_be_bytes_mod_order(&nonce_hash.as_bytes()[..SCALAR_SIZE]);

        let big_r = (EdwardsAffine::generator() * r).into_affine();
        let k = challenge::<H>(&big_r, public.as_ref(), message);
        let s = r + k * ScalarField::from_be_bytes_mod_order(&self.scalar);

        Ok(Signature::new(big_r, s))
    }

    /// Encodes the key as `public key || scalar || random source`
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        let mut out = [0u8; PRIVATE_KEY_SIZE];
        out[..PUBLIC_KEY_SIZE].copy_from_slice(&super::compress(&self.public));
        out[PUBLIC_KEY_SIZE..PUBLIC_KEY_SIZE + SCALAR_SIZE].copy_from_slice(&self.scalar);
        out[PUBLIC_KEY_SIZE + SCALAR_SIZE..].copy_from_slice(&self.rand_src);
        out
    }

    /// Decodes a 96 byte key. The embedded public key must be a valid point.
    pub fn from_bytes(bytes: &[u8]) -> EddsaResult<PrivateKey> {
        check_len(bytes, PRIVATE_KEY_SIZE)?;
        let public = decompress(&bytes[..PUBLIC_KEY_SIZE])?;
        let mut scalar = [0u8; SCALAR_SIZE];
        scalar.copy_from_slice(&bytes[PUBLIC_KEY_SIZE..PUBLIC_KEY_SIZE + SCALAR_SIZE]);
        let mut rand_src = [0u8; 32];
        rand_src.copy_from_slice(&bytes[PUBLIC_KEY_SIZE + SCALAR_SIZE..]);
        Ok(PrivateKey {
            public,
            scalar,
            rand_src,
        })
    }

    pub fn key_type(&self) -> &'static str {
        KEY_TYPE
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for PrivateKey {
    /// Runs in time independent of where the encodings differ
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &hex::encode(super::compress(&self.public)))
            .finish_non_exhaustive()
    }
}

impl_base64_serde!(PrivateKey);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EddsaError, SIGNATURE_SIZE};
    use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source exhausted"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_simple_sig() {
        let rng = &mut thread_rng();
        for _ in 0..10 {
            let message: Vec<u8> = (0..rng.gen_range(0..100)).map(|_| rng.gen()).collect();
            let sk = PrivateKey::generate(rng).unwrap();

            let sig = sk.sign(&message).unwrap();
            let pk = sk.public_key().unwrap();
            assert!(pk.verify_signature(&message, &sig));
            assert!(pk.verify(&message, &sig.to_bytes()));

            let message2 = b"goodbye";
            assert!(!pk.verify_signature(&message2[..], &sig));
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let sk = PrivateKey::generate(&mut StdRng::seed_from_u64(1)).unwrap();
        let sig1 = sk.sign(b"hello").unwrap();
        let sig2 = sk.sign(b"hello").unwrap();
        assert_eq!(sig1, sig2);
        assert_eq!(sig1.to_bytes().len(), SIGNATURE_SIZE);
        assert_ne!(sig1, sk.sign(b"hello!").unwrap());
    }

    #[test]
    fn public_key_is_stable() {
        let sk = PrivateKey::generate_key().unwrap();
        let pk1 = sk.public_key().unwrap();
        let pk2 = sk.public_key().unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(pk1.to_bytes(), pk2.to_bytes());
    }

    #[test]
    fn secret_derivation_is_deterministic() {
        let a = PrivateKey::from_secret(b"correct horse battery staple");
        let b = PrivateKey::from_secret(b"correct horse battery staple");
        let c = PrivateKey::from_secret(b"correct horse battery stapler");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is_initialized());
        assert_eq!(a.public_key().unwrap(), b.public_key().unwrap());
    }

    #[test]
    fn failing_randomness_is_fatal() {
        let err = PrivateKey::generate(&mut FailingRng).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            err,
            EddsaError::Fatal(Unrecoverable::RandomnessUnavailable(_))
        ));
    }

    #[test]
    fn uninitialized_key_is_fatal() {
        let sk = PrivateKey::default();
        assert!(!sk.is_initialized());
        let err = sk.public_key().unwrap_err();
        assert!(err.is_fatal());
        assert!(sk.sign(b"hello").unwrap_err().is_fatal());
    }

    #[test]
    fn bytes_roundtrip() {
        let rng = &mut StdRng::seed_from_u64(2);
        for _ in 0..10 {
            let sk = PrivateKey::generate(rng).unwrap();
            let bytes = sk.to_bytes();
            assert_eq!(bytes.len(), PRIVATE_KEY_SIZE);
            let de = PrivateKey::from_bytes(&bytes).unwrap();
            assert_eq!(sk, de);
            assert_eq!(
                sk.sign(b"roundtrip").unwrap(),
                de.sign(b"roundtrip").unwrap()
            );
        }
    }

    #[test]
    fn rejects_wrong_length() {
        let sk = PrivateKey::from_secret(b"length");
        let bytes = sk.to_bytes();
        assert!(matches!(
            PrivateKey::from_bytes(&bytes[..PRIVATE_KEY_SIZE - 1]),
            Err(EddsaError::InvalidLength {
                expected: PRIVATE_KEY_SIZE,
                actual: 95
            })
        ));
    }

    #[test]
    fn equality_detects_a_single_flipped_bit() {
        let sk = PrivateKey::from_secret(b"flip");
        assert_eq!(sk, sk);
        assert_eq!(sk, sk.clone());

        let mut bytes = sk.to_bytes();
        bytes[PRIVATE_KEY_SIZE - 1] ^= 0x01;
        let flipped = PrivateKey::from_bytes(&bytes).unwrap();
        assert_ne!(sk, flipped);
        assert_ne!(flipped, sk);
    }

    #[test]
    fn json_is_base64() {
        let sk = PrivateKey::from_secret(b"json");
        let json = serde_json::to_string(&sk).unwrap();
        let expected = format!("\"{}\"", crate::codec::encode_base64(&sk.to_bytes()));
        assert_eq!(json, expected);
        let de: PrivateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(sk, de);
    }

    #[test]
    fn debug_does_not_print_the_secret() {
        let sk = PrivateKey::from_secret(b"debug");
        let printed = format!("{:?}", sk);
        assert!(!printed.contains(&hex::encode(&sk.to_bytes()[PUBLIC_KEY_SIZE..])));
    }

    #[test]
    fn known_answer() {
        let sk = PrivateKey::from_secret(b"eddsa-bn254 test vector");
        let pk = sk.public_key().unwrap();
        assert_eq!(
            hex::encode(pk.to_bytes()),
            "545224851ad96c79d0f9e8ec31fa800c0961d2149c3dfe925704164c59c34c9f"
        );
        assert_eq!(
            hex::encode(sk.to_bytes()),
            "545224851ad96c79d0f9e8ec31fa800c0961d2149c3dfe925704164c59c34c9f\
             7d961ca7071a2d48283b3098c7b440d41907e64a6019366794c18a7643725810\
             6fcc8f3e37888d9f001679870273064455c22386a48c04ebc0e37570c6a3f4f6"
        );

        let message = b"finalized block";
        let sig = sk.sign(message).unwrap();
        let expected = "60dd9bdc7903a5392210feb154a5426274d917cb60c450a64f7fc771f8c64684\
                        02e7265a1570208c08db799064d5a7df2b8a4c12af372b3ebca285844603eea9";
        assert_eq!(hex::encode(sig.to_bytes()), expected);

        let sig_bytes = hex::decode(expected).unwrap();
        assert!(pk.verify(message, &sig_bytes));
        assert!(!pk.verify(b"another block", &sig_bytes));
    }
}
