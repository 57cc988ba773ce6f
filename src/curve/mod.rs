//! Curve backends implementing the traits of [`crate::group`].

#[cfg(feature = "bls12_381")]
pub mod bls12381;
