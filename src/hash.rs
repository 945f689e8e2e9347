use ark_ff::PrimeField;
use ark_std::UniformRand;
use rand::{rngs::StdRng, SeedableRng};
use sha2::{Digest, Sha256};

pub const HASH_SIZE: usize = 32;
pub type Hash = [u8; HASH_SIZE];

pub fn do_hash(bytes: &[u8]) -> Hash {
    let hash = Sha256::digest(bytes);
    hash.into()
}

/// Map a transcript to a scalar by seeding a deterministic stream with its
/// digest, so that prover and verifier derive the same challenge.
pub fn hash_to_scalar<F: PrimeField>(bytes: &[u8]) -> F {
    let mut rng: StdRng = SeedableRng::from_seed(do_hash(bytes));
    F::rand(&mut rng)
}
