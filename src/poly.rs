use crate::group::{Element, EvaluationDomain, Scalar};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

pub type Idx = u32;

/// A value tagged with the index of the party it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eval<A> {
    pub value: A,
    pub index: Idx,
}

/// A polynomial that is using a scalar for the variable x and a generic
/// element for the coefficients. The coefficients must be able to multiply
/// the type of the variable, which is always a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poly<C>(Vec<C>);

impl<C> Poly<C> {
    /// Returns the degree of the polynomial. The empty polynomial has degree 0.
    pub fn degree(&self) -> usize {
        // e.g. c_3 * x^3 + c_2 * x^2 + c_1 * x + c_0
        // ^ 4 coefficients correspond to a 3rd degree poly
        self.0.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[C] {
        &self.0
    }
}

impl<C: Element> Poly<C> {
    /// Returns a new polynomial of the given degree where each coefficients is
    /// sampled at random from the given RNG.
    /// In the context of secret sharing, the threshold is the degree + 1.
    pub fn new_from<R: RngCore>(degree: usize, rng: &mut R) -> Self {
        let coeffs: Vec<C> = (0..=degree).map(|_| C::rand(rng)).collect();
        Self::from(coeffs)
    }

    /// Returns a new polynomial of the given degree where each coefficients is
    /// sampled at random.
    pub fn new(degree: usize) -> Self {
        use rand::prelude::*;
        Self::new_from(degree, &mut thread_rng())
    }

    /// set the given element at the specified index. The index 0 is the free
    /// coefficient of the polynomial. It panics if the index is out of range.
    pub fn set(&mut self, index: usize, value: C) {
        self.0[index] = value;
    }

    /// Returns the constant term of the polynomial, i.e. its value at zero.
    pub fn constant(&self) -> &C {
        &self.0[0]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolyError {
    #[error("Invalid recovery: only has {0}/{1} shares")]
    InvalidRecovery(usize, usize),
    #[error("Could not invert scalar")]
    NoInverse,
    #[error("no evaluation points given")]
    Empty,
    #[error("{coeffs} coefficients do not fit a domain of size {size}")]
    DomainTooSmall { coeffs: usize, size: usize },
}

impl<C> Poly<C>
where
    C: Element,
    C::RHS: Scalar<RHS = C::RHS>,
{
    /// Evaluates the polynomial at `x` with Horner's rule.
    pub fn eval(&self, x: &C::RHS) -> C {
        self.0.iter().rev().fold(C::zero(), |mut sum, coeff| {
            sum.mul(x);
            sum.add(coeff);
            sum
        })
    }

    /// Given at least `t` evaluations `ys[i] = p(xs[i])`, recovers the
    /// polynomial's constant term from the first `t` of them.
    pub fn recover(t: usize, xs: &[C::RHS], ys: &[C]) -> Result<C, PolyError> {
        let available = xs.len().min(ys.len());
        if available < t {
            return Err(PolyError::InvalidRecovery(available, t));
        }

        let coeffs = lagrange_at_zero(&xs[..t])?;
        let res = ys[..t]
            .iter()
            .zip(&coeffs)
            .fold(C::zero(), |mut acc, (y, l)| {
                let mut term = y.clone();
                term.mul(l);
                acc.add(&term);
                acc
            });

        Ok(res)
    }
}

impl<X: Scalar<RHS = X>> Poly<X> {
    /// Evaluates the polynomial at every point of the domain, in natural order.
    /// The domain must be at least as large as the number of coefficients.
    pub fn evaluate_over<D: EvaluationDomain<X>>(
        &self,
        domain: &D,
    ) -> Result<Vec<X>, PolyError> {
        domain.fft(&self.0).ok_or(PolyError::DomainTooSmall {
            coeffs: self.0.len(),
            size: domain.size(),
        })
    }
}

/// Computes the Lagrange coefficients `L_i(0)` for the interpolation points
/// `xs`, so that `p(0) = sum(L_i(0) * p(xs[i]))` for any polynomial of degree
/// below `xs.len()`.
///
/// With `xi = prod(x_j)` and `d_i = x_i * prod_{j != i}(x_j - x_i)`, the
/// coefficient is `L_i(0) = xi / d_i`. All `d_i` are inverted together with a
/// single field inversion, which fails if any point is zero or repeated.
pub fn lagrange_at_zero<S: Scalar<RHS = S>>(xs: &[S]) -> Result<Vec<S>, PolyError> {
    if xs.is_empty() {
        return Err(PolyError::Empty);
    }

    let xi = xs.iter().fold(S::one(), |mut acc, x| {
        acc.mul(x);
        acc
    });

    let denominators = xs
        .iter()
        .enumerate()
        .map(|(i, x_i)| {
            xs.iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(x_i.clone(), |mut acc, (_, x_j)| {
                    let mut diff = x_j.clone();
                    diff.sub(x_i);
                    acc.mul(&diff);
                    acc
                })
        })
        .collect::<Vec<_>>();

    let inverses = batch_inverse(&denominators)?;

    Ok(inverses
        .into_iter()
        .map(|mut inv| {
            inv.mul(&xi);
            inv
        })
        .collect())
}

/// Montgomery's trick: inverts every element with one inversion.
fn batch_inverse<S: Scalar<RHS = S>>(values: &[S]) -> Result<Vec<S>, PolyError> {
    // prefix[i] = values[0] * ... * values[i - 1]
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = S::one();
    for v in values {
        prefix.push(acc.clone());
        acc.mul(v);
    }

    let mut inv = acc.inverse().ok_or(PolyError::NoInverse)?;

    let mut res = vec![S::zero(); values.len()];
    for (i, v) in values.iter().enumerate().rev() {
        let mut r = prefix[i].clone();
        r.mul(&inv);
        res[i] = r;
        inv.mul(v);
    }

    Ok(res)
}

impl<C: Element> From<Vec<C>> for Poly<C> {
    fn from(c: Vec<C>) -> Self {
        Self(c)
    }
}

impl<C: Element> From<Poly<C>> for Vec<C> {
    fn from(poly: Poly<C>) -> Self {
        poly.0
    }
}

impl<C: Zeroize> Zeroize for Poly<C> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<C: fmt::Display> fmt::Display for Poly<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = self
            .0
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}: {}", i, c))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[deg: {}, coeffs: [{}]]", self.degree(), s)
    }
}
