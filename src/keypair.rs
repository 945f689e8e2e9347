use crate::hash::do_hash;
use crate::{PublicKey, Scalar, SecretKey};

use ark_ec::ProjectiveCurve;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::UniformRand;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha512};

pub struct Keypair<G: ProjectiveCurve>(pub SecretKey<G>, pub PublicKey<G>);

impl<G: ProjectiveCurve> Keypair<G> {
    pub fn generate_keypair<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let secret = Scalar::<G>::rand(rng);
        Self(
            secret,
            G::prime_subgroup_generator().mul(secret.into_repr()),
        )
    }

    /// Generate a keypair whose secret is derived with Ed25519-style
    /// clamping, for Edwards curves of cofactor 8.
    pub fn generate_clamped_keypair<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let secret = new_clamped_key::<G, R>(rng);
        Self(
            secret,
            G::prime_subgroup_generator().mul(secret.into_repr()),
        )
    }

    pub fn secret(&self) -> &SecretKey<G> {
        &self.0
    }

    pub fn public(&self) -> &PublicKey<G> {
        &self.1
    }

    /// Fingerprint of the public key: the SHA-256 digest of its canonical
    /// encoding, base64 URL-safe without padding.
    pub fn pub_id(&self) -> String {
        let mut buf = Vec::with_capacity(self.1.serialized_size());
        self.1.serialize(&mut buf).unwrap();
        URL_SAFE_NO_PAD.encode(do_hash(&buf))
    }
}

/// Clamp a 32-byte scalar candidate: clear the three low bits so the key
/// is a multiple of the cofactor, clear the top bit and set bit 254.
pub fn clamp_scalar_bytes(bytes: &mut [u8; 32]) {
    bytes[0] &= 0xf8;
    bytes[31] &= 0x3f;
    bytes[31] |= 0x40;
}

/// Derive a secret key the way Ed25519 keys are formatted: hash 32
/// random non-zero bytes with SHA-512, keep the first half and clamp it.
pub fn new_clamped_key<G, R>(rng: &mut R) -> SecretKey<G>
where
    G: ProjectiveCurve,
    R: Rng + ?Sized,
{
    let mut buffer = [0u8; 32];
    rng.fill_bytes(&mut buffer);
    // Every byte must be individually non-zero.
    for b in buffer.iter_mut() {
        while *b == 0 {
            *b = rng.gen();
        }
    }
    let digest = Sha512::digest(&buffer);
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&digest[..32]);
    clamp_scalar_bytes(&mut scalar);
    Scalar::<G>::from_le_bytes_mod_order(&scalar)
}
