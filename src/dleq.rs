use crate::ark_serde::{canonical_deserialize, canonical_serialize};
use crate::hash::hash_to_scalar;
use crate::{PvssError, Scalar};

use ark_ec::ProjectiveCurve;
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A non-interactive proof that two points share the same discrete
/// logarithm with respect to two bases: xg = x*g and xh = x*h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DleqProof<G: ProjectiveCurve> {
    /// Challenge bound to both prover commitments
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub c: Scalar<G>,
    /// Response r = v - c*x
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub r: Scalar<G>,
    /// Prover commitment v*g
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub vg: G,
    /// Prover commitment v*h
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub vh: G,
}

impl<G: ProjectiveCurve> DleqProof<G> {
    /// Prove knowledge of x such that x*g and x*h share the discrete
    /// logarithm x. Returns the proof together with the two
    /// Diffie-Hellman points x*g and x*h.
    pub fn new<R>(g: &G, h: &G, x: &Scalar<G>, rng: &mut R) -> (Self, G, G)
    where
        R: Rng + ?Sized,
    {
        let xg = g.mul(x.into_repr());
        let xh = h.mul(x.into_repr());

        let v = Scalar::<G>::rand(rng);
        let vg = g.mul(v.into_repr());
        let vh = h.mul(v.into_repr());

        let c = challenge::<G>(&vg, &vh);
        let r = v - c * *x;

        (Self { c, r, vg, vh }, xg, xh)
    }

    /// Batched prover: one independently verifiable proof per statement.
    pub fn new_batch<R>(
        g: &[G],
        h: &[G],
        x: &[Scalar<G>],
        rng: &mut R,
    ) -> Result<(Vec<Self>, Vec<G>, Vec<G>), PvssError>
    where
        R: Rng + ?Sized,
    {
        if g.len() != h.len() || h.len() != x.len() {
            return Err(PvssError::DifferentLengths);
        }
        let mut proofs = Vec::with_capacity(x.len());
        let mut xgs = Vec::with_capacity(x.len());
        let mut xhs = Vec::with_capacity(x.len());
        for i in 0..x.len() {
            let (proof, xg, xh) = Self::new(&g[i], &h[i], &x[i], rng);
            proofs.push(proof);
            xgs.push(xg);
            xhs.push(xh);
        }
        Ok((proofs, xgs, xhs))
    }

    /// Verify the proof against the bases (g, h) and the points (xg, xh).
    /// Callers attach the share context to a failed verification.
    pub fn verify(&self, g: &G, h: &G, xg: &G, xh: &G) -> bool {
        let vg = g.mul(self.r.into_repr()) + xg.mul(self.c.into_repr());
        let vh = h.mul(self.r.into_repr()) + xh.mul(self.c.into_repr());
        challenge::<G>(&vg, &vh) == self.c
    }

    /// Wire encoding: c, r, vg, vh in canonical form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PvssError> {
        let mut buf = Vec::new();
        self.c.serialize(&mut buf)?;
        self.r.serialize(&mut buf)?;
        self.vg.serialize(&mut buf)?;
        self.vh.serialize(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PvssError> {
        Self::read_from(bytes)
    }

    pub(crate) fn read_from(bytes: &[u8]) -> Result<Self, PvssError> {
        let c = Scalar::<G>::deserialize(bytes)?;
        let mut rest = &bytes[c.serialized_size()..];
        let r = Scalar::<G>::deserialize(rest)?;
        rest = &rest[r.serialized_size()..];
        let vg = G::deserialize(rest)?;
        rest = &rest[vg.serialized_size()..];
        let vh = G::deserialize(rest)?;
        Ok(Self { c, r, vg, vh })
    }
}

/// The Fiat-Shamir challenge binds both prover commitments.
fn challenge<G: ProjectiveCurve>(vg: &G, vh: &G) -> Scalar<G> {
    let mut buf = Vec::new();
    vg.serialize(&mut buf).unwrap();
    vh.serialize(&mut buf).unwrap();
    hash_to_scalar::<Scalar<G>>(&buf)
}
