//! Non-interactive proof that a partial signature and a public commitment
//! share their secret exponents.
use crate::group::{PairingCurve, Point, Scalar};
use crate::sig::{challenge, ThresholdError};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The relation being proven, for a witness `w`:
///
/// - `public = prod(g1_bases[i] ^ w[i])`
/// - `signature = prod(g2_bases[j] ^ w[j])`
///
/// The second group relation only covers the leading `g2_bases.len()`
/// elements of the witness.
#[derive(Debug)]
pub struct Statement<'a, C: PairingCurve> {
    pub g1_bases: &'a [C::G1],
    pub public: &'a C::G1,
    pub g2_bases: &'a [C::G2],
    pub signature: &'a C::G2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof<S> {
    challenge: S,
    responses: Vec<S>,
}

impl<S: Scalar<RHS = S>> Proof<S> {
    pub fn prove<C, R>(
        statement: &Statement<C>,
        witness: &[S],
        rng: &mut R,
    ) -> Result<Self, ThresholdError>
    where
        C: PairingCurve<Scalar = S>,
        R: RngCore,
    {
        let dim = statement.g1_bases.len();
        if witness.len() != dim || statement.g2_bases.len() > dim {
            return Err(ThresholdError::InvalidWitness {
                got: witness.len(),
                expected: dim,
            });
        }

        let mut masks = (0..dim).map(|_| S::rand(rng)).collect::<Vec<_>>();
        let x = C::G1::multi_exp(statement.g1_bases, &masks);
        let y = C::G2::multi_exp(statement.g2_bases, &masks[..statement.g2_bases.len()]);

        let challenge = challenge::<C>(&[statement.public, &x], &[statement.signature, &y])?;

        let responses = masks
            .iter()
            .zip(witness)
            .map(|(mask, w)| {
                let mut z = w.clone();
                z.mul(&challenge);
                z.add(mask);
                z
            })
            .collect();
        masks.zeroize();

        Ok(Self {
            challenge,
            responses,
        })
    }

    /// Recomputes the masking commitments from the responses and checks they
    /// hash back to the embedded challenge.
    pub fn verify<C>(&self, statement: &Statement<C>) -> bool
    where
        C: PairingCurve<Scalar = S>,
    {
        let dim = statement.g1_bases.len();
        if self.responses.len() != dim || statement.g2_bases.len() > dim {
            return false;
        }

        let mut minus_c = self.challenge.clone();
        minus_c.negate();

        let mut bases = statement.g1_bases.to_vec();
        bases.push(statement.public.clone());
        let mut scalars = self.responses.clone();
        scalars.push(minus_c.clone());
        let x = C::G1::multi_exp(&bases, &scalars);

        let m = statement.g2_bases.len();
        let mut bases = statement.g2_bases.to_vec();
        bases.push(statement.signature.clone());
        let mut scalars = self.responses[..m].to_vec();
        scalars.push(minus_c);
        let y = C::G2::multi_exp(&bases, &scalars);

        match challenge::<C>(&[statement.public, &x], &[statement.signature, &y]) {
            Ok(c) => c == self.challenge,
            Err(_) => false,
        }
    }

    pub fn challenge(&self) -> &S {
        &self.challenge
    }

    pub fn responses(&self) -> &[S] {
        &self.responses
    }
}

#[cfg(feature = "bls12_381")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::bls12381::{PairingCurve as PCurve, Scalar as Sc, G1, G2};
    use crate::group::Element;

    struct Instance {
        g1_bases: Vec<G1>,
        g2_bases: Vec<G2>,
        witness: Vec<Sc>,
        public: G1,
        signature: G2,
    }

    impl Instance {
        fn new() -> Self {
            let rng = &mut rand::thread_rng();
            let g1_bases = (0..3).map(|_| G1::rand(rng)).collect::<Vec<_>>();
            let g2_bases = (0..2).map(|_| G2::rand(rng)).collect::<Vec<_>>();
            let witness = (0..3).map(|_| Sc::rand(rng)).collect::<Vec<_>>();
            let public = G1::multi_exp(&g1_bases, &witness);
            let signature = G2::multi_exp(&g2_bases, &witness[..2]);
            Self {
                g1_bases,
                g2_bases,
                witness,
                public,
                signature,
            }
        }

        fn statement(&self) -> Statement<PCurve> {
            Statement {
                g1_bases: &self.g1_bases,
                public: &self.public,
                g2_bases: &self.g2_bases,
                signature: &self.signature,
            }
        }
    }

    #[test]
    fn completeness() {
        let inst = Instance::new();
        let rng = &mut rand::thread_rng();
        let p1 = Proof::prove(&inst.statement(), &inst.witness, rng).unwrap();
        let p2 = Proof::prove(&inst.statement(), &inst.witness, rng).unwrap();

        // fresh masks give distinct proofs, both valid
        assert_ne!(p1, p2);
        assert!(p1.verify(&inst.statement()));
        assert!(p2.verify(&inst.statement()));
    }

    #[test]
    fn wrong_witness_fails() {
        let inst = Instance::new();
        let rng = &mut rand::thread_rng();
        let mut witness = inst.witness.clone();
        witness[1].add(&Sc::one());

        let proof = Proof::prove(&inst.statement(), &witness, rng).unwrap();
        assert!(!proof.verify(&inst.statement()));
    }

    #[test]
    fn tampered_proof_fails() {
        let inst = Instance::new();
        let proof = Proof::prove(&inst.statement(), &inst.witness, &mut rand::thread_rng()).unwrap();

        for i in 0..3 {
            let mut bad = proof.clone();
            bad.responses[i].add(&Sc::one());
            assert!(!bad.verify(&inst.statement()));
        }

        let mut bad = proof.clone();
        bad.challenge.add(&Sc::one());
        assert!(!bad.verify(&inst.statement()));

        let mut short = proof;
        short.responses.pop();
        assert!(!short.verify(&inst.statement()));
    }

    #[test]
    fn other_signature_fails() {
        let inst = Instance::new();
        let proof = Proof::prove(&inst.statement(), &inst.witness, &mut rand::thread_rng()).unwrap();

        let mut other = inst.signature.clone();
        other.add(&G2::one());
        let statement = Statement::<PCurve> {
            signature: &other,
            ..inst.statement()
        };
        assert!(!proof.verify(&statement));
    }

    #[test]
    fn witness_length_is_checked() {
        let inst = Instance::new();
        let err = Proof::prove(&inst.statement(), &inst.witness[..2], &mut rand::thread_rng())
            .unwrap_err();
        match err {
            ThresholdError::InvalidWitness { got: 2, expected: 3 } => (),
            other => panic!("unexpected error {}", other),
        }
    }
}
