mod ark_serde;
pub use ark_serde::*;

pub mod hash;

mod errors;
pub use errors::*;

mod poly;
pub use poly::*;

mod dleq;
pub use dleq::*;

pub mod pvss;

mod keypair;
pub use keypair::*;

pub use rand;

use ark_ec::ProjectiveCurve;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The scalar field of the underlying prime-order group
pub type Scalar<G> = <G as ProjectiveCurve>::ScalarField;

/// A trustee's private key
pub type SecretKey<G> = Scalar<G>;

/// A trustee's public key
pub type PublicKey<G> = G;

pub fn std_rng() -> StdRng {
    StdRng::from_entropy()
}
