//! Common reference string: the public generators and evaluation domain fixed
//! once per scheme instance.
use crate::group::{Element, EvaluationDomain, PairingCurve, Scalar};
use rand_core::RngCore;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrsError {
    #[error("no evaluation domain of size {0}")]
    InvalidDomain(usize),
    #[error("a reference string needs at least one generator")]
    NoGenerators,
    #[error("reference string has {got} generators, expected {expected}")]
    Generators { got: usize, expected: usize },
    #[error("reference string is for {got} parties, expected {expected}")]
    SizeMismatch { got: usize, expected: usize },
}

/// Public parameters shared by every party of a scheme.
///
/// `generators` holds one first group generator per secret shared
/// polynomial; the first one doubles as the base of the public key.
#[derive(Debug, Clone)]
pub struct Crs<C: PairingCurve> {
    generators: Vec<C::G1>,
    g2: C::G2,
    g1_neg: C::G1,
    domain: C::Domain,
    points: Vec<C::Scalar>,
}

impl<C: PairingCurve> Crs<C> {
    /// Generates a reference string for `n` parties with `k` first group
    /// generators. Each generator is the group generator raised to a fresh
    /// random exponent which is wiped before returning.
    pub fn generate<R: RngCore>(n: usize, k: usize, rng: &mut R) -> Result<Self, CrsError> {
        let domain = C::Domain::new(n).ok_or(CrsError::InvalidDomain(n))?;
        if k == 0 {
            return Err(CrsError::NoGenerators);
        }

        let mut trapdoors = (0..=k).map(|_| C::Scalar::rand(rng)).collect::<Vec<_>>();

        let generators = trapdoors[..k]
            .iter()
            .map(|td| {
                let mut g = C::G1::one();
                g.mul(td);
                g
            })
            .collect::<Vec<_>>();

        let mut g2 = C::G2::one();
        g2.mul(&trapdoors[k]);

        trapdoors.zeroize();

        let mut minus_one = C::Scalar::one();
        minus_one.negate();
        let mut g1_neg = generators[0].clone();
        g1_neg.mul(&minus_one);

        let points = (0..n).map(|i| domain.element(i)).collect();

        debug!(n, k, "generated reference string");

        Ok(Self {
            generators,
            g2,
            g1_neg,
            domain,
            points,
        })
    }

    /// Reference string for the baseline scheme: a single generator.
    pub fn boldyreva<R: RngCore>(n: usize, rng: &mut R) -> Result<Self, CrsError> {
        Self::generate(n, 1, rng)
    }

    /// Reference string for the adaptive scheme: the key, randomization and
    /// hiding generators.
    pub fn adaptive<R: RngCore>(n: usize, rng: &mut R) -> Result<Self, CrsError> {
        Self::generate(n, 3, rng)
    }

    /// Checks the reference string was generated for `n` parties and `k`
    /// generators.
    pub fn check(&self, n: usize, k: usize) -> Result<(), CrsError> {
        if self.size() != n {
            return Err(CrsError::SizeMismatch {
                got: self.size(),
                expected: n,
            });
        }
        if self.generators.len() != k {
            return Err(CrsError::Generators {
                got: self.generators.len(),
                expected: k,
            });
        }

        Ok(())
    }

    pub fn generators(&self) -> &[C::G1] {
        &self.generators
    }

    /// The base of the public key.
    pub fn g1(&self) -> &C::G1 {
        &self.generators[0]
    }

    pub fn g2(&self) -> &C::G2 {
        &self.g2
    }

    pub fn g1_neg(&self) -> &C::G1 {
        &self.g1_neg
    }

    pub fn domain(&self) -> &C::Domain {
        &self.domain
    }

    /// The domain points, `points[i]` being the evaluation point of party `i`.
    pub fn points(&self) -> &[C::Scalar] {
        &self.points
    }

    /// Number of parties.
    pub fn size(&self) -> usize {
        self.points.len()
    }
}

#[cfg(feature = "bls12_381")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::bls12381::{PairingCurve as PCurve, G1};
    use rand::{rngs::StdRng, SeedableRng};

    type Crs = super::Crs<PCurve>;

    #[test]
    fn rejects_invalid_sizes() {
        let rng = &mut rand::thread_rng();
        assert_eq!(Crs::boldyreva(12, rng).unwrap_err(), CrsError::InvalidDomain(12));
        assert_eq!(Crs::adaptive(0, rng).unwrap_err(), CrsError::InvalidDomain(0));
        assert_eq!(Crs::generate(8, 0, rng).unwrap_err(), CrsError::NoGenerators);
    }

    #[test]
    fn generator_layout() {
        let rng = &mut rand::thread_rng();
        let crs = Crs::adaptive(8, rng).unwrap();
        assert_eq!(crs.generators().len(), 3);
        assert_eq!(crs.size(), 8);
        crs.check(8, 3).unwrap();
        assert_eq!(
            crs.check(8, 1).unwrap_err(),
            CrsError::Generators { got: 3, expected: 1 }
        );
        assert_eq!(
            crs.check(16, 3).unwrap_err(),
            CrsError::SizeMismatch { got: 8, expected: 16 }
        );

        let g = crs.generators();
        assert_ne!(g[0], g[1]);
        assert_ne!(g[1], g[2]);
        assert_ne!(g[0], G1::one());

        let mut sum = crs.g1().clone();
        sum.add(crs.g1_neg());
        assert_eq!(sum, G1::zero());
    }

    #[test]
    fn points_are_the_domain() {
        let crs = Crs::boldyreva(16, &mut StdRng::seed_from_u64(7)).unwrap();
        for (i, p) in crs.points().iter().enumerate() {
            assert_eq!(p, &crs.domain().element(i));
        }
        for i in 0..16 {
            for j in (i + 1)..16 {
                assert_ne!(crs.points()[i], crs.points()[j]);
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = Crs::adaptive(4, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Crs::adaptive(4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.generators(), b.generators());
        assert_eq!(a.g2(), b.g2());
    }
}
