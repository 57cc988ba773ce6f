//! Traits for operating on Groups and Elliptic Curves.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use zeroize::Zeroize;

/// Element represents an element of a group with the additive notation
/// which is also equipped with a multiplication transformation.
/// Two implementations are for Scalar which forms a ring so RHS is the same
/// and Point which can be multiplied by a scalar of its prime field.
pub trait Element:
    Clone + Display + Debug + Eq + Serialize + for<'a> Deserialize<'a> + PartialEq + Send + Sync
{
    /// The right-hand-side argument for multiplication
    type RHS;

    /// Returns the zero element of the group
    fn new() -> Self;

    /// Returns the one element of the group
    fn one() -> Self;

    /// Adds the RHS  element to the LHS element in place
    fn add(&mut self, s2: &Self);

    /// Multiplies the LHS element by the RHS element in place
    fn mul(&mut self, mul: &Self::RHS);

    /// Samples a random element using the provided RNG
    fn rand<R: RngCore>(rng: &mut R) -> Self;

    /// Returns the zero element of the group
    fn zero() -> Self {
        Self::new()
    }
}

/// Scalar can be multiplied by only a Scalar, no other elements.
pub trait Scalar: Element + Zeroize {
    fn set_int(&mut self, i: u64);
    fn inverse(&self) -> Option<Self>;
    fn negate(&mut self);
    fn sub(&mut self, other: &Self);

    /// Interprets the big-endian bytes as an integer reduced modulo the
    /// field order.
    fn from_bytes_mod_order(bytes: &[u8]) -> Self;
}

/// Basic point functionality that can be multiplied by a scalar
pub trait Point: Element {
    /// Error which may occur while mapping to the group
    type Error: Debug;

    /// Maps the provided data to a group element under the domain separation
    /// tag `dst`.
    fn map(&mut self, dst: &[u8], data: &[u8]) -> Result<(), <Self as Point>::Error>;

    /// Computes `sum(bases[i] * scalars[i])`. Extra entries on the longer side
    /// are ignored.
    fn multi_exp(bases: &[Self], scalars: &[Self::RHS]) -> Self {
        bases
            .iter()
            .zip(scalars)
            .fold(Self::zero(), |mut acc, (base, scalar)| {
                let mut term = base.clone();
                term.mul(scalar);
                acc.add(&term);
                acc
            })
    }
}

/// Multiplicative subgroup of the scalar field of size `n`, used to evaluate
/// polynomials at all n-th roots of unity at once.
pub trait EvaluationDomain<S: Scalar>: Clone + Debug + Send + Sync + Sized {
    /// Returns `None` unless the field has a subgroup of exactly `size`
    /// elements.
    fn new(size: usize) -> Option<Self>;

    fn size(&self) -> usize;

    /// Returns `w^i` where `w` is the generator of the domain.
    fn element(&self, i: usize) -> S;

    /// Evaluates the polynomial with coefficients `coeffs` at every element of
    /// the domain, in natural order: the i-th output is `p(w^i)`. Returns
    /// `None` when there are more coefficients than domain elements.
    fn fft(&self, coeffs: &[S]) -> Option<Vec<S>>;
}

/// A curve equipped with a bilinear pairing operation.
pub trait PairingCurve: Clone + Debug + Send + Sync {
    type Scalar: Scalar<RHS = Self::Scalar>;

    type G1: Point<RHS = Self::Scalar>;

    type G2: Point<RHS = Self::Scalar>;

    type GT: Element<RHS = Self::GT>;

    type Domain: EvaluationDomain<Self::Scalar>;

    /// Perfors a pairing operation between the 2 group elements
    fn pair(a: &Self::G1, b: &Self::G2) -> Self::GT;

    /// Returns true iff `prod e(a[i], b[i]) == 1`.
    fn pairing_check(a: &[Self::G1], b: &[Self::G2]) -> bool {
        let product = a.iter().zip(b).fold(Self::GT::one(), |mut acc, (p, q)| {
            acc.mul(&Self::pair(p, q));
            acc
        });
        product == Self::GT::one()
    }
}
