//! Scheme configuration.
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("number of parties must be a power of two, got {0}")]
    NotPowerOfTwo(usize),
    #[error("threshold must satisfy 0 < t < n, got t = {t} with n = {n}")]
    InvalidThreshold { n: usize, t: usize },
}

/// The `(n, t)` parameters of a threshold scheme.
///
/// `n` is the number of parties and `t` the degree of the sharing
/// polynomials: any `t + 1` parties can produce a signature.
/// Deserialization goes through [`Parameters::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters")]
pub struct Parameters {
    n: usize,
    t: usize,
}

#[derive(Deserialize)]
struct RawParameters {
    n: usize,
    t: usize,
}

impl TryFrom<RawParameters> for Parameters {
    type Error = ParamsError;

    fn try_from(raw: RawParameters) -> Result<Self, ParamsError> {
        Parameters::new(raw.n, raw.t)
    }
}

impl Parameters {
    pub fn new(n: usize, t: usize) -> Result<Self, ParamsError> {
        if !n.is_power_of_two() {
            return Err(ParamsError::NotPowerOfTwo(n));
        }
        if t == 0 || t >= n {
            return Err(ParamsError::InvalidThreshold { n, t });
        }

        Ok(Self { n, t })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn t(&self) -> usize {
        self.t
    }

    /// Number of partial signatures needed to produce a signature.
    pub fn threshold(&self) -> usize {
        self.t + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parameters() {
        let params = Parameters::new(32, 16).unwrap();
        assert_eq!(params.n(), 32);
        assert_eq!(params.t(), 16);
        assert_eq!(params.threshold(), 17);

        Parameters::new(2, 1).unwrap();
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            Parameters::new(24, 3).unwrap_err(),
            ParamsError::NotPowerOfTwo(24)
        );
        assert_eq!(Parameters::new(0, 0).unwrap_err(), ParamsError::NotPowerOfTwo(0));
        assert_eq!(
            Parameters::new(16, 16).unwrap_err(),
            ParamsError::InvalidThreshold { n: 16, t: 16 }
        );
        assert_eq!(
            Parameters::new(16, 0).unwrap_err(),
            ParamsError::InvalidThreshold { n: 16, t: 0 }
        );
    }

    #[test]
    fn serde_roundtrip() {
        let params = Parameters::new(8, 3).unwrap();
        let ser = bincode::serialize(&params).unwrap();
        let de: Parameters = bincode::deserialize(&ser).unwrap();
        assert_eq!(params, de);
    }

    #[test]
    fn deserialize_validates() {
        let ser = bincode::serialize(&(8u64, 8u64)).unwrap();
        let err = bincode::deserialize::<Parameters>(&ser).unwrap_err();
        assert!(err.to_string().contains("threshold"));

        let ser = bincode::serialize(&(12u64, 3u64)).unwrap();
        bincode::deserialize::<Parameters>(&ser).unwrap_err();

        let ser = bincode::serialize(&(8u64, 3u64)).unwrap();
        let de: Parameters = bincode::deserialize(&ser).unwrap();
        assert_eq!(de, Parameters::new(8, 3).unwrap());
    }
}
