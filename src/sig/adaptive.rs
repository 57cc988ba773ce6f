//! Threshold BLS secure against adaptive corruptions.
//!
//! Every party holds shares of three polynomials: the signing key `s`, a
//! randomizer `r` and a hiding term `u`, the latter two with a zero constant
//! term. A partial signature is `H0(m) ^ s_i * H1(m) ^ r_i`, shipped with a
//! proof that it matches the party's commitment `g ^ s_i * h ^ r_i * v ^ u_i`.
//! Since `r(0) = 0` the randomizer vanishes when the partials are combined at
//! zero, leaving a plain BLS signature `H0(m) ^ s(0)`.
use crate::crs::Crs;
use crate::group::{Element, PairingCurve, Point, Scalar};
use crate::params::Parameters;
use crate::poly::{Idx, Poly};
use crate::sig::threshold::{
    commit_shares, hash_to_point, interpolate, pairing_verify, select_verified, DST0, DST1,
};
use crate::sig::{Proof, ProvenPartial, Statement, ThresholdError};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

/// Secret shares of one party.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "S: Scalar")]
pub struct AdaptiveShare<S: Scalar> {
    pub index: Idx,
    pub key: S,
    pub randomizer: S,
    pub hiding: S,
}

impl<S: Scalar> AdaptiveShare<S> {
    fn witness(&self) -> [S; 3] {
        [
            self.key.clone(),
            self.randomizer.clone(),
            self.hiding.clone(),
        ]
    }
}

impl<S: Scalar> Zeroize for AdaptiveShare<S> {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.randomizer.zeroize();
        self.hiding.zeroize();
    }
}

impl<S: Scalar> Drop for AdaptiveShare<S> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct AdaptiveBls<C: PairingCurve> {
    params: Parameters,
    crs: Crs<C>,
    public_key: C::G1,
    commitments: Vec<C::G1>,
}

impl<C: PairingCurve> AdaptiveBls<C> {
    /// Deals the three sharings over the domain and returns the scheme, the
    /// public key `g ^ s(0)` and the `n` share bundles.
    pub fn new<R: RngCore>(
        params: Parameters,
        crs: Crs<C>,
        rng: &mut R,
    ) -> Result<(Self, C::G1, Vec<AdaptiveShare<C::Scalar>>), ThresholdError> {
        crs.check(params.n(), 3)?;

        let mut polys = (0..3)
            .map(|_| Poly::<C::Scalar>::new_from(params.t(), rng))
            .collect::<Vec<_>>();
        polys[1].set(0, C::Scalar::zero());
        polys[2].set(0, C::Scalar::zero());

        let mut public_key = crs.g1().clone();
        public_key.mul(polys[0].constant());

        let evals = polys
            .iter()
            .map(|p| p.evaluate_over(crs.domain()))
            .collect::<Result<Vec<_>, _>>();
        polys.zeroize();
        let mut evals = evals?;

        let dims = evals.iter().map(Vec::as_slice).collect::<Vec<_>>();
        let commitments = commit_shares::<C>(crs.generators(), &dims);

        let shares = (0..params.n())
            .map(|i| AdaptiveShare {
                index: i as Idx,
                key: evals[0][i].clone(),
                randomizer: evals[1][i].clone(),
                hiding: evals[2][i].clone(),
            })
            .collect();
        evals.zeroize();

        debug!(n = params.n(), t = params.t(), "dealt adaptive threshold key");

        let scheme = Self {
            params,
            crs,
            public_key: public_key.clone(),
            commitments,
        };

        Ok((scheme, public_key, shares))
    }

    /// Returns `H0(msg) ^ key * H1(msg) ^ randomizer` with its proof.
    pub fn partial_sign<R: RngCore>(
        &self,
        msg: &[u8],
        share: &AdaptiveShare<C::Scalar>,
        rng: &mut R,
    ) -> Result<ProvenPartial<C::G2, C::Scalar>, ThresholdError> {
        let commitment = self
            .commitment(share.index)
            .ok_or(ThresholdError::UnknownSigner(share.index))?;
        let hashes = Self::hash(msg)?;
        let mut witness = share.witness();

        let signature = C::G2::multi_exp(&hashes, &witness[..2]);
        let statement = Statement::<C> {
            g1_bases: self.crs.generators(),
            public: commitment,
            g2_bases: &hashes,
            signature: &signature,
        };
        let proof = Proof::prove(&statement, &witness, rng);
        witness.zeroize();

        Ok(ProvenPartial {
            index: share.index,
            signature,
            proof: proof?,
        })
    }

    /// Checks the proof of a partial against a commitment. No pairing is
    /// involved.
    pub fn partial_verify(
        &self,
        msg: &[u8],
        commitment: &C::G1,
        partial: &ProvenPartial<C::G2, C::Scalar>,
    ) -> Result<bool, ThresholdError> {
        let hashes = Self::hash(msg)?;
        Ok(self.check_proof(&hashes, commitment, partial))
    }

    /// Verifies the partials in order against their signers' commitments and
    /// combines the first `t + 1` valid ones.
    pub fn combine(
        &self,
        msg: &[u8],
        partials: &[ProvenPartial<C::G2, C::Scalar>],
    ) -> Result<C::G2, ThresholdError> {
        let hashes = Self::hash(msg)?;
        let selected = select_verified(
            self.params.n(),
            self.threshold(),
            partials,
            |p| p.index,
            |p| self.check_proof(&hashes, &self.commitments[p.index as usize], p),
        )?;

        let selected = selected
            .into_iter()
            .map(|p| (p.index, &p.signature))
            .collect::<Vec<_>>();
        interpolate(&self.crs, &selected)
    }

    /// Checks `e(public_key, H0(msg)) == e(g, sig)`.
    pub fn verify(
        &self,
        msg: &[u8],
        public_key: &C::G1,
        sig: &C::G2,
    ) -> Result<bool, ThresholdError> {
        let h0 = hash_to_point(DST0, msg)?;
        Ok(pairing_verify(&self.crs, public_key, &h0, sig))
    }

    fn hash(msg: &[u8]) -> Result<[C::G2; 2], ThresholdError> {
        Ok([hash_to_point(DST0, msg)?, hash_to_point(DST1, msg)?])
    }

    fn check_proof(
        &self,
        hashes: &[C::G2],
        commitment: &C::G1,
        partial: &ProvenPartial<C::G2, C::Scalar>,
    ) -> bool {
        let statement = Statement::<C> {
            g1_bases: self.crs.generators(),
            public: commitment,
            g2_bases: hashes,
            signature: &partial.signature,
        };
        partial.proof.verify(&statement)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn crs(&self) -> &Crs<C> {
        &self.crs
    }

    pub fn public_key(&self) -> &C::G1 {
        &self.public_key
    }

    /// Per party commitments `g ^ key * h ^ randomizer * v ^ hiding`.
    pub fn commitments(&self) -> &[C::G1] {
        &self.commitments
    }

    pub fn commitment(&self, index: Idx) -> Option<&C::G1> {
        self.commitments.get(index as usize)
    }

    /// Number of partial signatures needed to produce a signature.
    pub fn threshold(&self) -> usize {
        self.params.threshold()
    }
}

#[cfg(feature = "bls12_381")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CrsError;
    use crate::curve::bls12381::{PairingCurve as PCurve, Scalar as Sc, G1, G2};

    type Scheme = AdaptiveBls<PCurve>;

    fn setup(n: usize, t: usize) -> (Scheme, G1, Vec<AdaptiveShare<Sc>>) {
        let rng = &mut rand::thread_rng();
        let params = Parameters::new(n, t).unwrap();
        let crs = Crs::adaptive(n, rng).unwrap();
        Scheme::new(params, crs, rng).unwrap()
    }

    #[test]
    fn threshold_signature() {
        let (scheme, pk, shares) = setup(32, 16);
        let rng = &mut rand::thread_rng();
        let msg = b"hello world";

        let partials = shares[..17]
            .iter()
            .map(|s| scheme.partial_sign(msg, s, rng).unwrap())
            .collect::<Vec<_>>();
        for p in &partials {
            let commitment = scheme.commitment(p.index).unwrap();
            assert!(scheme.partial_verify(msg, commitment, p).unwrap());
        }

        let sig = scheme.combine(msg, &partials).unwrap();
        assert!(scheme.verify(msg, &pk, &sig).unwrap());
        assert!(!scheme.verify(b"hello world!", &pk, &sig).unwrap());

        match scheme.combine(msg, &partials[..16]) {
            Err(ThresholdError::NotEnoughPartialSignatures(16, 17)) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn randomizer_cancels() {
        let (scheme, _, shares) = setup(8, 3);
        let rng = &mut rand::thread_rng();
        let msg = b"cancel";

        let partials = shares
            .iter()
            .map(|s| scheme.partial_sign(msg, s, rng).unwrap())
            .collect::<Vec<_>>();
        let sig = scheme.combine(msg, &partials[2..6]).unwrap();

        // the key alone, recovered in the clear, signs the same
        let xs = scheme.crs().points()[..4].to_vec();
        let ys = shares[..4].iter().map(|s| s.key.clone()).collect::<Vec<_>>();
        let key = Poly::<Sc>::recover(4, &xs, &ys).unwrap();
        let mut expected = hash_to_point::<G2>(DST0, msg).unwrap();
        expected.mul(&key);

        assert_eq!(sig, expected);
    }

    #[test]
    fn signer_subsets_agree() {
        let (scheme, pk, shares) = setup(8, 2);
        let rng = &mut rand::thread_rng();
        let msg = b"subsets";
        let partials = shares
            .iter()
            .map(|s| scheme.partial_sign(msg, s, rng).unwrap())
            .collect::<Vec<_>>();

        let first = scheme.combine(msg, &partials[..3]).unwrap();
        let last = scheme.combine(msg, &partials[5..]).unwrap();
        assert_eq!(first, last);
        assert!(scheme.verify(msg, &pk, &first).unwrap());
    }

    #[test]
    fn proofs_are_bound() {
        let (scheme, _, shares) = setup(4, 1);
        let rng = &mut rand::thread_rng();
        let msg = b"bound";
        let partial = scheme.partial_sign(msg, &shares[0], rng).unwrap();
        let again = scheme.partial_sign(msg, &shares[0], rng).unwrap();

        // fresh masks each time, same signature
        assert_ne!(partial.proof, again.proof);
        assert_eq!(partial.signature, again.signature);

        let own = scheme.commitment(0).unwrap();
        assert!(scheme.partial_verify(msg, own, &again).unwrap());
        // wrong key
        let other = scheme.commitment(1).unwrap();
        assert!(!scheme.partial_verify(msg, other, &partial).unwrap());
        // other message
        assert!(!scheme.partial_verify(b"unbound", own, &partial).unwrap());
        // tampered signature
        let mut tampered = partial.clone();
        tampered.signature.add(&G2::one());
        assert!(!scheme.partial_verify(msg, own, &tampered).unwrap());
    }

    #[test]
    fn forged_partials_are_skipped() {
        let (scheme, pk, shares) = setup(8, 2);
        let rng = &mut rand::thread_rng();
        let msg = b"forged";
        let mut partials = shares
            .iter()
            .map(|s| scheme.partial_sign(msg, s, rng).unwrap())
            .collect::<Vec<_>>();

        // a valid partial replayed under another index
        partials[0].index = 5;
        partials[1].signature.add(&G2::one());

        let sig = scheme.combine(msg, &partials).unwrap();
        assert!(scheme.verify(msg, &pk, &sig).unwrap());
    }

    #[test]
    fn signs_against_dealt_commitment() {
        let (scheme, _, shares) = setup(4, 1);
        let rng = &mut rand::thread_rng();
        let msg = b"dealt";

        let mut unknown = shares[0].clone();
        unknown.index = 99;
        match scheme.partial_sign(msg, &unknown, rng) {
            Err(ThresholdError::UnknownSigner(99)) => (),
            other => panic!("unexpected result {:?}", other),
        }

        // a share relabelled as another party cannot prove that party's commitment
        let mut relabelled = shares[0].clone();
        relabelled.index = 1;
        let partial = scheme.partial_sign(msg, &relabelled, rng).unwrap();
        let commitment = scheme.commitment(1).unwrap();
        assert!(!scheme.partial_verify(msg, commitment, &partial).unwrap());
    }

    #[test]
    fn rejects_baseline_crs() {
        let rng = &mut rand::thread_rng();
        let params = Parameters::new(8, 3).unwrap();
        let crs = Crs::boldyreva(8, rng).unwrap();
        match Scheme::new(params, crs, rng) {
            Err(ThresholdError::CrsError(CrsError::Generators { got: 1, expected: 3 })) => (),
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn shares_serialize() {
        let (_, _, shares) = setup(4, 1);
        let ser = bincode::serialize(&shares[2]).unwrap();
        assert_eq!(ser.len(), 4 + 3 * 32);
        let de: AdaptiveShare<Sc> = bincode::deserialize(&ser).unwrap();
        assert_eq!(de, shares[2]);
    }
}
