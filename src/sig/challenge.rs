//! Fiat-Shamir challenge derivation.
use crate::group::{PairingCurve, Scalar};
use sha2::{Digest, Sha256};

/// Hashes the compressed encodings of `g1` followed by those of `g2` with
/// SHA-256, and reads the big-endian digest as a scalar reduced modulo the
/// group order.
///
/// Every element is written with the width of its own group, so the transcript
/// is unambiguous without length prefixes.
pub fn challenge<C: PairingCurve>(
    g1: &[&C::G1],
    g2: &[&C::G2],
) -> Result<C::Scalar, bincode::Error> {
    let mut hasher = Sha256::new();
    for p in g1 {
        hasher.update(bincode::serialize(p)?);
    }
    for q in g2 {
        hasher.update(bincode::serialize(q)?);
    }

    Ok(C::Scalar::from_bytes_mod_order(&hasher.finalize()))
}
