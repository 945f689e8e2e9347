use crate::{
    recover_commit, DleqProof, PriPoly, PubPoly, PubShare, PublicKey, PvssError, Scalar, SecretKey,
};

use ark_ec::ProjectiveCurve;
use ark_ff::{Field, PrimeField, Zero};
use ark_serialize::CanonicalDeserialize;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A publicly verifiable share: a public share point paired with the
/// zero-knowledge proof of its consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubVerShare<G: ProjectiveCurve> {
    #[serde(bound(serialize = "PubShare<G>: Serialize"))]
    #[serde(bound(deserialize = "PubShare<G>: Deserialize<'de>"))]
    pub s: PubShare<G>,
    #[serde(bound(serialize = "DleqProof<G>: Serialize"))]
    #[serde(bound(deserialize = "DleqProof<G>: Deserialize<'de>"))]
    pub p: DleqProof<G>,
}

impl<G: ProjectiveCurve> PubVerShare<G> {
    /// Wire encoding: the share followed by its proof.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PvssError> {
        let mut buf = self.s.to_bytes()?;
        buf.extend_from_slice(&self.p.to_bytes()?);
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PvssError> {
        let (i, rest) = crate::read_be_index(bytes)?;
        let v = G::deserialize(rest)?;
        let p = DleqProof::read_from(&rest[v.serialized_size()..])?;
        Ok(Self {
            s: PubShare { i, v },
            p,
        })
    }
}

/// Creates a list of encrypted publicly verifiable shares of the given
/// secret, one per trustee public key, together with the polynomial
/// commitment under the base point h. Each share X_i * p(i) carries a
/// proof that log_h(h * p(i)) == log_{X_i}(X_i * p(i)).
pub fn enc_shares<G, R>(
    h: &G,
    public_keys: &[PublicKey<G>],
    secret: &Scalar<G>,
    t: usize,
    rng: &mut R,
) -> Result<(Vec<PubVerShare<G>>, PubPoly<G>), PvssError>
where
    G: ProjectiveCurve,
    R: Rng + ?Sized,
{
    let n = public_keys.len();
    if t < 1 || n < t {
        return Err(PvssError::InvalidThreshold);
    }
    if public_keys.iter().any(|x| x.is_zero()) {
        return Err(PvssError::IdentityPoint);
    }

    let pri_poly = PriPoly::<G>::new(t, Some(*secret), rng)?;
    let pri_shares = pri_poly.shares(n)?;
    let pub_poly = pri_poly.commit(h);

    let bases = vec![*h; n];
    let values: Vec<_> = pri_shares.iter().map(|s| s.v).collect();
    let (proofs, _, encrypted) = DleqProof::new_batch(&bases, public_keys, &values, rng)?;

    let enc_shares = pri_shares
        .iter()
        .zip(proofs)
        .zip(encrypted)
        .map(|((ps, p), v)| PubVerShare {
            s: PubShare { i: ps.i, v },
            p,
        })
        .collect();

    Ok((enc_shares, pub_poly))
}

/// Checks that the encrypted share satisfies
/// log_h(sh) == log_x(enc_share.s.v), where sh is the commitment
/// polynomial evaluated at the share index.
pub fn verify_enc_share<G: ProjectiveCurve>(
    h: &G,
    x: &PublicKey<G>,
    sh: &G,
    enc_share: &PubVerShare<G>,
) -> Option<PvssError> {
    if !enc_share.p.verify(h, x, sh, &enc_share.s.v) {
        return Some(PvssError::EncVerification);
    }
    None
}

/// Pointwise verification of a list of encrypted shares. Returns the
/// valid shares together with the corresponding public keys, in input
/// order.
pub fn verify_enc_share_batch<G: ProjectiveCurve>(
    h: &G,
    x: &[PublicKey<G>],
    sh: &[G],
    enc_shares: &[PubVerShare<G>],
) -> Result<(Vec<PublicKey<G>>, Vec<PubVerShare<G>>), PvssError> {
    if x.len() != sh.len() || sh.len() != enc_shares.len() {
        return Err(PvssError::DifferentLengths);
    }
    let mut good_keys = Vec::new();
    let mut good_shares = Vec::new();
    for i in 0..x.len() {
        if verify_enc_share(h, &x[i], &sh[i], &enc_shares[i]).is_none() {
            good_keys.push(x[i]);
            good_shares.push(enc_shares[i].clone());
        }
    }
    Ok((good_keys, good_shares))
}

/// Verifies the encrypted share and, if valid, decrypts it with the
/// trustee secret key and attaches a proof of correct decryption:
/// log_G(X) == log_{v}(enc_share.s.v) for v = x^-1 * enc_share.s.v.
pub fn dec_share<G, R>(
    h: &G,
    x: &PublicKey<G>,
    sh: &G,
    secret_key: &SecretKey<G>,
    enc_share: &PubVerShare<G>,
    rng: &mut R,
) -> Result<PubVerShare<G>, PvssError>
where
    G: ProjectiveCurve,
    R: Rng + ?Sized,
{
    if let Some(e) = verify_enc_share(h, x, sh, enc_share) {
        return Err(e);
    }
    let key_inv = secret_key
        .inverse()
        .expect("trustee secret key must be non-zero");
    let v = enc_share.s.v.mul(key_inv.into_repr());
    let g = G::prime_subgroup_generator();
    let (p, _, _) = DleqProof::new(&g, &v, secret_key, rng);
    Ok(PubVerShare {
        s: PubShare {
            i: enc_share.s.i,
            v,
        },
        p,
    })
}

/// Batch decryption. Invalid encrypted shares are skipped; the returned
/// keys, encrypted shares and decrypted shares stay index-aligned.
pub fn dec_share_batch<G, R>(
    h: &G,
    x: &[PublicKey<G>],
    sh: &[G],
    secret_key: &SecretKey<G>,
    enc_shares: &[PubVerShare<G>],
    rng: &mut R,
) -> Result<(Vec<PublicKey<G>>, Vec<PubVerShare<G>>, Vec<PubVerShare<G>>), PvssError>
where
    G: ProjectiveCurve,
    R: Rng + ?Sized,
{
    if x.len() != sh.len() || sh.len() != enc_shares.len() {
        return Err(PvssError::DifferentLengths);
    }
    let mut good_keys = Vec::new();
    let mut good_enc = Vec::new();
    let mut good_dec = Vec::new();
    for i in 0..x.len() {
        if let Ok(ds) = dec_share(h, &x[i], &sh[i], secret_key, &enc_shares[i], rng) {
            good_keys.push(x[i]);
            good_enc.push(enc_shares[i].clone());
            good_dec.push(ds);
        }
    }
    Ok((good_keys, good_enc, good_dec))
}

/// Checks that the decrypted share satisfies
/// log_g(x) == log_{dec_share.s.v}(enc_share.s.v).
pub fn verify_dec_share<G: ProjectiveCurve>(
    g: &G,
    x: &PublicKey<G>,
    enc_share: &PubVerShare<G>,
    dec_share: &PubVerShare<G>,
) -> Option<PvssError> {
    if !dec_share.p.verify(g, &dec_share.s.v, x, &enc_share.s.v) {
        return Some(PvssError::DecVerification);
    }
    None
}

/// Pointwise verification of a list of decrypted shares. Returns the
/// valid decrypted shares in input order.
pub fn verify_dec_share_batch<G: ProjectiveCurve>(
    g: &G,
    x: &[PublicKey<G>],
    enc_shares: &[PubVerShare<G>],
    dec_shares: &[PubVerShare<G>],
) -> Result<Vec<PubVerShare<G>>, PvssError> {
    if x.len() != enc_shares.len() || enc_shares.len() != dec_shares.len() {
        return Err(PvssError::DifferentLengths);
    }
    let mut good = Vec::new();
    for i in 0..x.len() {
        if verify_dec_share(g, &x[i], &enc_shares[i], &dec_shares[i]).is_none() {
            good.push(dec_shares[i].clone());
        }
    }
    Ok(good)
}

/// Verifies the decrypted shares and recovers the shared secret as the
/// point s * g from any t valid ones. The discrete logarithm s itself is
/// not recoverable.
pub fn recover_secret<G: ProjectiveCurve>(
    g: &G,
    x: &[PublicKey<G>],
    enc_shares: &[PubVerShare<G>],
    dec_shares: &[PubVerShare<G>],
    t: usize,
    n: usize,
) -> Result<G, PvssError> {
    let good = verify_dec_share_batch(g, x, enc_shares, dec_shares)?;
    if good.len() < t {
        return Err(PvssError::TooFewShares);
    }
    let shares: Vec<_> = good.into_iter().map(|s| s.s).collect();
    recover_commit(&shares, t, n)
}
