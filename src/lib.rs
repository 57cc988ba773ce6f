//! # Adaptively Secure Threshold BLS Signatures
//!
//! This crate implements `(n, t)` threshold BLS signatures over a pairing
//! friendly curve: `n` parties each hold a share of a signing key and any
//! `t + 1` of them can produce a signature which verifies against a single
//! public key, exactly like a plain BLS signature.
//!
//! Two variants are provided:
//!
//! - [`Boldyreva`](sig::Boldyreva): the classic scheme. Partial signatures are
//!   checked with a pairing against the signer's public commitment, or with a
//!   discrete log equality proof when produced with
//!   `partial_sign_with_proof`.
//! - [`AdaptiveBls`](sig::AdaptiveBls): every party additionally holds shares
//!   of a randomizer and a hiding polynomial, and partial signatures always
//!   carry a proof. This keeps the scheme secure against an adversary choosing
//!   whom to corrupt as the protocol runs.
//!
//! Shares are computed by evaluating the sharing polynomials over the `n`-th
//! roots of unity, so `n` must be a power of two.
//!
//! ## Threshold Signatures
//!
//! ```rust
//! use adaptive_threshold_bls::{
//!     params::Parameters,
//!     schemes::bls12_381::{AdaptiveBls, Crs},
//! };
//!
//! let rng = &mut rand::thread_rng();
//! let (n, t) = (8, 3);
//!
//! // the reference string is generated once and shared by everyone
//! let params = Parameters::new(n, t).unwrap();
//! let crs = Crs::adaptive(n, rng).unwrap();
//!
//! // deal the shares
//! let (scheme, public_key, shares) = AdaptiveBls::new(params, crs, rng).unwrap();
//!
//! // each party signs with its share
//! let msg = b"hello";
//! let partials = shares
//!     .iter()
//!     .map(|share| scheme.partial_sign(&msg[..], share, rng).unwrap())
//!     .collect::<Vec<_>>();
//!
//! // anyone can check a partial signature against the signer's commitment
//! let commitment = scheme.commitment(partials[0].index).unwrap();
//! assert!(scheme.partial_verify(&msg[..], commitment, &partials[0]).unwrap());
//!
//! // the first t + 1 valid partials are combined
//! let sig = scheme.combine(&msg[..], &partials).unwrap();
//! assert!(scheme.verify(&msg[..], &public_key, &sig).unwrap());
//! ```
//!
//! ## Features
//!
//! - `bls12_381` (default): the BLS12-381 backend, wrapping arkworks.
//! - `parallel`: computes the per party commitments on the rayon thread pool
//!   and enables the parallel arkworks MSM and FFT.
//!
//! ### Supporting a new curve
//!
//! Curves are implemented in the [`curve`] module. In order to support a new
//! curve, the trait [`PairingCurve`] must be implemented for it, along with the
//! `Scalar`, `Element`, `Point` and `EvaluationDomain` traits for its fields,
//! groups and domain.

/// Curve implementations for the traits defined in the [`group`](group/index.html) module.
pub mod curve;

/// Common reference string generation.
pub mod crs;

/// Definitions of generic traits with scalars of prime fields and points on elliptic curves.
pub mod group;

/// Scheme parameters.
pub mod params;

/// Polynomials for secret sharing, and interpolation at zero.
pub mod poly;

/// Threshold signature schemes, their partial signatures and proofs.
pub mod sig;

pub use group::*;

/// Pre-instantiated signature schemes for each curve
pub mod schemes {
    /// BLS12-381 Schemes
    #[cfg(feature = "bls12_381")]
    pub mod bls12_381 {
        use crate::curve::bls12381::PairingCurve;
        pub use crate::curve::bls12381::{Scalar, G1, G2};

        pub type Crs = crate::crs::Crs<PairingCurve>;

        /// Boldyreva's threshold BLS with public keys over G1 and signatures over G2
        pub type Boldyreva = crate::sig::Boldyreva<PairingCurve>;

        /// Adaptively secure threshold BLS with public keys over G1 and signatures over G2
        pub type AdaptiveBls = crate::sig::AdaptiveBls<PairingCurve>;
    }
}
