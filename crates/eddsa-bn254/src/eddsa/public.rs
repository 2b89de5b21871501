use super::{challenge, compress, decompress, Signature};
use crate::{
    curve::EdwardsAffine, field::Fr, hashers::MiMC, Address, EddsaError, EddsaResult,
    FieldHasher, ADDRESS_SIZE, KEY_TYPE, PUBLIC_KEY_SIZE,
};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use log::debug;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// An EdDSA public key, a point `A = s * G` on the twisted Edwards curve over BN254's scalar
/// field. Its coordinates are BN254 scalar field elements, which is what makes the key cheap to
/// use inside a circuit.
#[derive(Clone, Copy, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicKey(EdwardsAffine);

impl From<EdwardsAffine> for PublicKey {
    fn from(pk: EdwardsAffine) -> PublicKey {
        PublicKey(pk)
    }
}

impl AsRef<EdwardsAffine> for PublicKey {
    fn as_ref(&self) -> &EdwardsAffine {
        &self.0
    }
}

impl PublicKey {
    /// Decodes a 32 byte compressed key. Decoding checks that the point is on the curve and in
    /// the prime order subgroup.
    pub fn from_bytes(bytes: &[u8]) -> EddsaResult<PublicKey> {
        Ok(PublicKey(decompress(bytes)?))
    }

    /// The 32 byte compressed encoding
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        compress(&self.0)
    }

    /// The `X` coordinate
    pub fn x(&self) -> Fr {
        self.0.x
    }

    /// The `Y` coordinate
    pub fn y(&self) -> Fr {
        self.0.y
    }

    /// Rejects keys with an unset (zero) coordinate.
    ///
    /// This alone does not prove the point is on the curve or in the right subgroup. Keys
    /// obtained through `from_bytes` have already passed both checks, keys built from a raw
    /// point with `From<EdwardsAffine>` have not.
    pub fn validate_basic(&self) -> EddsaResult<()> {
        if self.0.x.is_zero() || self.0.y.is_zero() {
            return Err(EddsaError::UnsetCoordinate);
        }
        Ok(())
    }

    /// The first 20 bytes of the SHA256 of the encoded key
    pub fn address(&self) -> Address {
        let digest = Sha256::digest(self.to_bytes());
        let mut address = [0u8; ADDRESS_SIZE];
        address.copy_from_slice(&digest[..ADDRESS_SIZE]);
        address
    }

    /// Verifies an encoded signature with MiMC as the challenge hash. Malformed signatures
    /// are reported as `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_bytes(signature) {
            Ok(signature) => self.verify_signature(message, &signature),
            Err(e) => {
                debug!(
                    "rejecting malformed signature ({} byte message, {} byte signature): {}",
                    message.len(),
                    signature.len(),
                    e
                );
                false
            }
        }
    }

    /// Verifies a signature with MiMC as the challenge hash
    pub fn verify_signature(&self, message: &[u8], signature: &Signature) -> bool {
        self.verify_with::<MiMC>(message, signature)
    }

    /// Checks `[8](S * G) == [8](R + H(R, A, M) * A)`
    pub fn verify_with<H: FieldHasher>(&self, message: &[u8], signature: &Signature) -> bool {
        let k = challenge::<H>(signature.r(), &self.0, message);
        let lhs = EdwardsAffine::generator() * signature.s();
        let rhs = signature.r().into_group() + self.0 * k;
        let valid = (lhs - rhs)
            .into_affine()
            .mul_by_cofactor_to_group()
            .is_zero();
        if !valid {
            debug!("signature verification failed");
        }
        valid
    }

    pub fn key_type(&self) -> &'static str {
        KEY_TYPE
    }
}

impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

impl PartialEq for PublicKey {
    /// Runs in time independent of where the encodings differ
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PublicKey {}

impl_base64_serde!(PublicKey);
