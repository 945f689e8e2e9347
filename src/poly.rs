use crate::ark_serde::{canonical_deserialize, canonical_serialize};
use crate::{PvssError, Scalar};

use ark_ec::ProjectiveCurve;
use ark_ff::{Field, One, PrimeField, Zero};
use ark_poly::{univariate::DensePolynomial, Polynomial as Poly, UVPolynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use fnv::FnvHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A private share: the secret polynomial evaluated at index i.
/// Indices are 1-based; index 0 denotes the secret itself and is never
/// issued as a share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriShare<G: ProjectiveCurve> {
    pub i: u32,
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub v: Scalar<G>,
}

/// A public share: a commitment to the secret polynomial evaluated at
/// index i.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubShare<G: ProjectiveCurve> {
    pub i: u32,
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub v: G,
}

impl<G: ProjectiveCurve> PubShare<G> {
    /// Wire encoding: big-endian index followed by the canonical point.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PvssError> {
        let mut buf = Vec::with_capacity(4 + self.v.serialized_size());
        buf.extend_from_slice(&self.i.to_be_bytes());
        self.v.serialize(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PvssError> {
        let (i, rest) = read_be_index(bytes)?;
        let v = G::deserialize(rest)?;
        Ok(Self { i, v })
    }
}

/// A secret sharing polynomial of degree t-1 over the scalar field. The
/// constant coefficient is the shared secret.
#[derive(Debug, Clone)]
pub struct PriPoly<G: ProjectiveCurve> {
    coeffs: Vec<Scalar<G>>,
}

impl<G: ProjectiveCurve> PriPoly<G> {
    /// Draw a fresh polynomial with threshold t. The constant coefficient
    /// is the given secret, or a random one if none is supplied.
    pub fn new<R>(t: usize, secret: Option<Scalar<G>>, rng: &mut R) -> Result<Self, PvssError>
    where
        R: Rng + ?Sized,
    {
        if t < 1 {
            return Err(PvssError::InvalidThreshold);
        }
        let mut coeffs = Vec::with_capacity(t);
        coeffs.push(secret.unwrap_or_else(|| Scalar::<G>::rand(rng)));
        for _ in 1..t {
            coeffs.push(Scalar::<G>::rand(rng));
        }
        Ok(Self { coeffs })
    }

    /// Build a polynomial from explicit coefficients. The constant
    /// coefficient is the shared secret.
    pub fn from_coefficients(coeffs: Vec<Scalar<G>>) -> Result<Self, PvssError> {
        if coeffs.is_empty() {
            return Err(PvssError::InvalidThreshold);
        }
        Ok(Self { coeffs })
    }

    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    /// The shared secret p(0)
    pub fn secret(&self) -> Scalar<G> {
        self.coeffs[0]
    }

    pub fn eval(&self, i: u32) -> PriShare<G> {
        let polynomial = DensePolynomial::from_coefficients_slice(&self.coeffs);
        PriShare {
            i,
            v: polynomial.evaluate(&Scalar::<G>::from(i as u64)),
        }
    }

    /// The shares p(1), ..., p(n). Issuing fewer shares than the threshold
    /// would make the secret unrecoverable.
    pub fn shares(&self, n: usize) -> Result<Vec<PriShare<G>>, PvssError> {
        if n < self.threshold() {
            return Err(PvssError::InvalidThreshold);
        }
        let polynomial = DensePolynomial::from_coefficients_slice(&self.coeffs);
        Ok((0..n)
            .map(|i| {
                let i = i as u32 + 1;
                PriShare {
                    i,
                    v: polynomial.evaluate(&Scalar::<G>::from(i as u64)),
                }
            })
            .collect())
    }

    /// Commit to every coefficient under the given base point.
    pub fn commit(&self, base: &G) -> PubPoly<G> {
        PubPoly {
            b: *base,
            commits: self
                .coeffs
                .iter()
                .map(|c| base.mul(c.into_repr()))
                .collect(),
        }
    }

    /// Coefficient-wise sum of two polynomials of equal threshold.
    pub fn add(&self, other: &Self) -> Result<Self, PvssError> {
        if self.threshold() != other.threshold() {
            return Err(PvssError::InvalidThreshold);
        }
        Ok(Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(other.coeffs.iter())
                .map(|(a, b)| *a + *b)
                .collect(),
        })
    }
}

/// A commitment polynomial: the coefficients of a secret polynomial
/// committed under a common base point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubPoly<G: ProjectiveCurve> {
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub b: G,
    #[serde(serialize_with = "canonical_serialize")]
    #[serde(deserialize_with = "canonical_deserialize")]
    pub commits: Vec<G>,
}

impl<G: ProjectiveCurve> PubPoly<G> {
    pub fn threshold(&self) -> usize {
        self.commits.len()
    }

    /// The commitment to the shared secret, B * p(0)
    pub fn commit(&self) -> G {
        self.commits[0]
    }

    /// Evaluate the commitment polynomial at index i in the group.
    pub fn eval(&self, i: u32) -> PubShare<G> {
        let xi = Scalar::<G>::from(i as u64);
        let mut acc = G::zero();
        for c in self.commits.iter().rev() {
            acc = acc.mul(xi.into_repr());
            acc += *c;
        }
        PubShare { i, v: acc }
    }

    pub fn shares(&self, n: usize) -> Result<Vec<PubShare<G>>, PvssError> {
        if n < self.threshold() {
            return Err(PvssError::InvalidThreshold);
        }
        Ok((1..=n as u32).map(|i| self.eval(i)).collect())
    }

    /// Pointwise sum of two commitment polynomials over the same base.
    pub fn add(&self, other: &Self) -> Result<Self, PvssError> {
        if self.b != other.b {
            return Err(PvssError::DifferentBases);
        }
        if self.threshold() != other.threshold() {
            return Err(PvssError::InvalidThreshold);
        }
        Ok(Self {
            b: self.b,
            commits: self
                .commits
                .iter()
                .zip(other.commits.iter())
                .map(|(a, b)| *a + *b)
                .collect(),
        })
    }

    /// Check a private share against the commitment polynomial.
    pub fn check(&self, share: &PriShare<G>) -> bool {
        self.eval(share.i).v == self.b.mul(share.v.into_repr())
    }

    /// Wire encoding: big-endian commitment count followed by the
    /// canonical commitments. The base point travels out-of-band.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PvssError> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(self.commits.len() as u32).to_be_bytes());
        for c in &self.commits {
            c.serialize(&mut buf)?;
        }
        Ok(buf)
    }

    pub fn from_bytes(base: &G, bytes: &[u8]) -> Result<Self, PvssError> {
        let (len, mut rest) = read_be_index(bytes)?;
        let mut commits = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let c = G::deserialize(rest)?;
            rest = &rest[c.serialized_size()..];
            commits.push(c);
        }
        Ok(Self { b: *base, commits })
    }
}

/// Recover the shared secret p(0) from at least t private shares with
/// distinct indices, via Lagrange interpolation at zero. Duplicate indices
/// are dropped, keeping the first occurrence; the first t distinct shares
/// in input order are used.
pub fn recover_secret<G: ProjectiveCurve>(
    shares: &[PriShare<G>],
    t: usize,
    n: usize,
) -> Result<Scalar<G>, PvssError> {
    let chosen = select_distinct(shares.iter().map(|s| (s.i, s.v)), t, n)?;
    let secret = chosen
        .iter()
        .map(|&(i, v)| v * lagrange_basis_at_zero::<G, _>(i, &chosen))
        .fold(Scalar::<G>::zero(), |acc, x| acc + x);
    Ok(secret)
}

/// Recover the committed secret B * p(0) from at least t public shares
/// with distinct indices, via Lagrange interpolation in the exponent.
pub fn recover_commit<G: ProjectiveCurve>(
    shares: &[PubShare<G>],
    t: usize,
    n: usize,
) -> Result<G, PvssError> {
    let chosen = select_distinct(shares.iter().map(|s| (s.i, s.v)), t, n)?;
    let commit = chosen
        .iter()
        .map(|&(i, v)| v.mul(lagrange_basis_at_zero::<G, _>(i, &chosen).into_repr()))
        .fold(G::zero(), |acc, x| acc + x);
    Ok(commit)
}

fn select_distinct<T, I>(shares: I, t: usize, n: usize) -> Result<Vec<(u32, T)>, PvssError>
where
    I: Iterator<Item = (u32, T)>,
{
    let mut seen = FnvHashSet::default();
    let mut chosen = Vec::with_capacity(t.min(n));
    for (i, v) in shares {
        if seen.insert(i) {
            chosen.push((i, v));
            if chosen.len() == t {
                break;
            }
        }
    }
    if chosen.len() < t {
        return Err(PvssError::TooFewShares);
    }
    Ok(chosen)
}

fn lagrange_basis_at_zero<G: ProjectiveCurve, T>(i: u32, chosen: &[(u32, T)]) -> Scalar<G> {
    let xi = Scalar::<G>::from(i as u64);
    chosen
        .iter()
        .filter(|&&(j, _)| j != i)
        .map(|&(j, _)| {
            let xj = Scalar::<G>::from(j as u64);
            // Indices in the chosen set are distinct, so xj - xi != 0.
            xj * (xj - xi).inverse().unwrap()
        })
        .fold(Scalar::<G>::one(), |lambda, x| lambda * x)
}

pub(crate) fn read_be_index(bytes: &[u8]) -> Result<(u32, &[u8]), PvssError> {
    if bytes.len() < 4 {
        return Err(PvssError::Serialization);
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    Ok((u32::from_be_bytes(buf), &bytes[4..]))
}
