//! Boldyreva's threshold BLS: public keys in G1, signatures in G2.
use crate::crs::Crs;
use crate::group::{Element, PairingCurve};
use crate::params::Parameters;
use crate::poly::{Eval, Idx, Poly};
use crate::sig::threshold::{
    commit_shares, hash_to_point, interpolate, pairing_verify, select_verified, DST,
};
use crate::sig::{Proof, ProvenPartial, Share, Statement, ThresholdError};
use rand_core::RngCore;
use tracing::debug;
use zeroize::Zeroize;

/// A dealt instance of the baseline scheme: the public side of the key
/// material.
#[derive(Debug, Clone)]
pub struct Boldyreva<C: PairingCurve> {
    params: Parameters,
    crs: Crs<C>,
    public_key: C::G1,
    commitments: Vec<C::G1>,
}

impl<C: PairingCurve> Boldyreva<C> {
    /// Samples a degree `t` secret polynomial, evaluates it over the domain
    /// and returns the scheme, the public key `g1 ^ s(0)` and the `n` shares.
    pub fn new<R: RngCore>(
        params: Parameters,
        crs: Crs<C>,
        rng: &mut R,
    ) -> Result<(Self, C::G1, Vec<Share<C::Scalar>>), ThresholdError> {
        crs.check(params.n(), 1)?;

        let mut secret = Poly::<C::Scalar>::new_from(params.t(), rng);
        let mut public_key = crs.g1().clone();
        public_key.mul(secret.constant());

        let evals = secret.evaluate_over(crs.domain());
        secret.zeroize();
        let mut evals = evals?;

        let commitments = commit_shares::<C>(crs.generators(), &[evals.as_slice()]);
        let shares = evals
            .iter()
            .enumerate()
            .map(|(i, s)| Share {
                index: i as Idx,
                private: s.clone(),
            })
            .collect();
        evals.zeroize();

        debug!(n = params.n(), t = params.t(), "dealt threshold key");

        let scheme = Self {
            params,
            crs,
            public_key: public_key.clone(),
            commitments,
        };

        Ok((scheme, public_key, shares))
    }

    /// Returns `H(msg) ^ share`.
    pub fn partial_sign(
        &self,
        msg: &[u8],
        share: &Share<C::Scalar>,
    ) -> Result<Eval<C::G2>, ThresholdError> {
        let mut sig: C::G2 = hash_to_point(DST, msg)?;
        sig.mul(&share.private);

        Ok(Eval {
            value: sig,
            index: share.index,
        })
    }

    /// Checks `e(commitment, H(msg)) == e(g1, partial)`.
    pub fn partial_verify(
        &self,
        msg: &[u8],
        commitment: &C::G1,
        partial: &C::G2,
    ) -> Result<bool, ThresholdError> {
        let hm = hash_to_point(DST, msg)?;
        Ok(pairing_verify(&self.crs, commitment, &hm, partial))
    }

    /// Verifies the partials in order against their signers' commitments and
    /// combines the first `t + 1` valid ones.
    pub fn combine(
        &self,
        msg: &[u8],
        partials: &[Eval<C::G2>],
    ) -> Result<C::G2, ThresholdError> {
        let hm = hash_to_point(DST, msg)?;
        let selected = select_verified(
            self.params.n(),
            self.threshold(),
            partials,
            |p| p.index,
            |p| pairing_verify(&self.crs, &self.commitments[p.index as usize], &hm, &p.value),
        )?;

        let selected = selected
            .into_iter()
            .map(|p| (p.index, &p.value))
            .collect::<Vec<_>>();
        interpolate(&self.crs, &selected)
    }

    /// Like [`Self::partial_sign`], with a proof that the partial uses the
    /// share behind the signer's commitment.
    pub fn partial_sign_with_proof<R: RngCore>(
        &self,
        msg: &[u8],
        share: &Share<C::Scalar>,
        rng: &mut R,
    ) -> Result<ProvenPartial<C::G2, C::Scalar>, ThresholdError> {
        let commitment = self
            .commitment(share.index)
            .ok_or(ThresholdError::UnknownSigner(share.index))?;
        let hm: C::G2 = hash_to_point(DST, msg)?;
        let mut sig = hm.clone();
        sig.mul(&share.private);

        let witness = std::slice::from_ref(&share.private);
        let g2_bases = [hm];
        let statement = Statement::<C> {
            g1_bases: self.crs.generators(),
            public: commitment,
            g2_bases: &g2_bases,
            signature: &sig,
        };
        let proof = Proof::prove(&statement, witness, rng)?;

        Ok(ProvenPartial {
            index: share.index,
            signature: sig,
            proof,
        })
    }

    /// Checks the proof of a partial against a commitment, without pairings.
    pub fn partial_verify_with_proof(
        &self,
        msg: &[u8],
        commitment: &C::G1,
        partial: &ProvenPartial<C::G2, C::Scalar>,
    ) -> Result<bool, ThresholdError> {
        let hm: C::G2 = hash_to_point(DST, msg)?;
        Ok(self.check_proof(std::slice::from_ref(&hm), commitment, partial))
    }

    /// Verify-then-combine over proven partials.
    pub fn combine_proven(
        &self,
        msg: &[u8],
        partials: &[ProvenPartial<C::G2, C::Scalar>],
    ) -> Result<C::G2, ThresholdError> {
        let g2_bases: [C::G2; 1] = [hash_to_point(DST, msg)?];
        let selected = select_verified(
            self.params.n(),
            self.threshold(),
            partials,
            |p| p.index,
            |p| self.check_proof(&g2_bases, &self.commitments[p.index as usize], p),
        )?;

        let selected = selected
            .into_iter()
            .map(|p| (p.index, &p.signature))
            .collect::<Vec<_>>();
        interpolate(&self.crs, &selected)
    }

    fn check_proof(
        &self,
        g2_bases: &[C::G2],
        commitment: &C::G1,
        partial: &ProvenPartial<C::G2, C::Scalar>,
    ) -> bool {
        let statement = Statement::<C> {
            g1_bases: self.crs.generators(),
            public: commitment,
            g2_bases,
            signature: &partial.signature,
        };
        partial.proof.verify(&statement)
    }

    /// Checks `e(public_key, H(msg)) == e(g1, sig)`.
    pub fn verify(
        &self,
        msg: &[u8],
        public_key: &C::G1,
        sig: &C::G2,
    ) -> Result<bool, ThresholdError> {
        let hm = hash_to_point(DST, msg)?;
        Ok(pairing_verify(&self.crs, public_key, &hm, sig))
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

    /// Per party public commitments, `g1 ^ share`.
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
