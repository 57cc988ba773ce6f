//! Types and helpers shared by the threshold schemes.
use crate::crs::{Crs, CrsError};
use crate::group::{PairingCurve, Point, Scalar};
use crate::params::ParamsError;
use crate::poly::{lagrange_at_zero, Idx, PolyError};
use crate::sig::Proof;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Domain separation tag of the baseline scheme.
pub const DST: &[u8] = b"DST";
/// Domain separation tags of the two message hashes of the adaptive scheme.
pub const DST0: &[u8] = b"DST0";
pub const DST1: &[u8] = b"DST1";

#[derive(Debug, Error)]
pub enum ThresholdError {
    #[error("invalid parameters: {0}")]
    ParamsError(#[from] ParamsError),

    #[error("invalid reference string: {0}")]
    CrsError(#[from] CrsError),

    #[error("could not recover signature: {0}")]
    PolyError(#[from] PolyError),

    #[error(transparent)]
    BincodeError(#[from] bincode::Error),

    #[error("could not hash to curve")]
    HashingError,

    #[error("witness has {got} elements, statement expects {expected}")]
    InvalidWitness { got: usize, expected: usize },

    #[error("not enough partial signatures: {0}/{1}")]
    NotEnoughPartialSignatures(usize, usize),

    #[error("no commitment for signer {0}")]
    UnknownSigner(Idx),
}

/// Secret share of the baseline scheme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "S: Scalar")]
pub struct Share<S: Scalar> {
    pub index: Idx,
    pub private: S,
}

impl<S: Scalar> Zeroize for Share<S> {
    fn zeroize(&mut self) {
        self.private.zeroize();
    }
}

impl<S: Scalar> Drop for Share<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// A partial signature together with a proof that it was produced with the
/// secrets behind the signer's public commitment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenPartial<P, S> {
    pub index: Idx,
    pub signature: P,
    pub proof: Proof<S>,
}

pub(crate) fn hash_to_point<P: Point>(dst: &[u8], msg: &[u8]) -> Result<P, ThresholdError> {
    let mut h = P::new();
    h.map(dst, msg).map_err(|err| {
        debug!(?err, "hash to curve failed");
        ThresholdError::HashingError
    })?;
    Ok(h)
}

/// `e(public, hm) * e(-g1, sig) == 1`
pub(crate) fn pairing_verify<C: PairingCurve>(
    crs: &Crs<C>,
    public: &C::G1,
    hm: &C::G2,
    sig: &C::G2,
) -> bool {
    C::pairing_check(
        &[public.clone(), crs.g1_neg().clone()],
        &[hm.clone(), sig.clone()],
    )
}

/// Multi-exponentiates the shares of every party against `generators`:
/// the commitment of party `i` is `prod(generators[k] ^ dims[k][i])`.
pub(crate) fn commit_shares<C: PairingCurve>(
    generators: &[C::G1],
    dims: &[&[C::Scalar]],
) -> Vec<C::G1> {
    let n = dims.first().map_or(0, |d| d.len());
    let commit = |i: usize| {
        let mut scalars = dims.iter().map(|d| d[i].clone()).collect::<Vec<_>>();
        let commitment = C::G1::multi_exp(generators, &scalars);
        scalars.zeroize();
        commitment
    };

    #[cfg(feature = "parallel")]
    {
        (0..n).into_par_iter().map(commit).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(commit).collect()
    }
}

/// Walks the candidates in order and keeps the first `needed` ones which name
/// a known, not yet selected signer and pass `verify`.
pub(crate) fn select_verified<'a, T, F>(
    n: usize,
    needed: usize,
    candidates: &'a [T],
    index: impl Fn(&T) -> Idx,
    verify: F,
) -> Result<Vec<&'a T>, ThresholdError>
where
    F: Fn(&T) -> bool,
{
    let mut selected = Vec::with_capacity(needed);
    let mut seen = vec![false; n];

    for candidate in candidates {
        if selected.len() == needed {
            break;
        }

        let idx = index(candidate);
        let slot = match seen.get_mut(idx as usize) {
            Some(slot) => slot,
            None => {
                warn!(idx, n, "partial signature from unknown signer");
                continue;
            }
        };
        if *slot {
            debug!(idx, "duplicate partial signature");
            continue;
        }
        if !verify(candidate) {
            debug!(idx, "invalid partial signature");
            continue;
        }

        trace!(idx, "partial signature selected");
        *slot = true;
        selected.push(candidate);
    }

    if selected.len() < needed {
        return Err(ThresholdError::NotEnoughPartialSignatures(
            selected.len(),
            needed,
        ));
    }

    Ok(selected)
}

/// Combines partial signatures in the exponent with the Lagrange coefficients
/// at zero of their signers' domain points.
pub(crate) fn interpolate<C: PairingCurve>(
    crs: &Crs<C>,
    partials: &[(Idx, &C::G2)],
) -> Result<C::G2, ThresholdError> {
    let xs = partials
        .iter()
        .map(|(idx, _)| crs.points()[*idx as usize].clone())
        .collect::<Vec<_>>();
    let coeffs = lagrange_at_zero(&xs)?;
    let sigs = partials
        .iter()
        .map(|(_, sig)| (*sig).clone())
        .collect::<Vec<_>>();

    Ok(C::G2::multi_exp(&sigs, &coeffs))
}
