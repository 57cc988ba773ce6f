use crate::group::{Element, EvaluationDomain, PairingCurve as PC, Point, Scalar as Sc};
use ark_bls12_381 as bls;
use ark_bls12_381::{Bls12_381, Fq12, Fr};
use ark_ec::{
    hashing::{
        curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve,
        HashToCurveError,
    },
    pairing::Pairing,
    AffineRepr, CurveGroup, Group, VariableBaseMSM,
};
use ark_ff::{field_hashers::DefaultFieldHasher, Field, One, PrimeField, Zero};
use ark_poly::{EvaluationDomain as ArkDomain, Radix2EvaluationDomain};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::UniformRand;
use rand_core::RngCore;
use serde::{
    de::{Error as DeserializeError, SeqAccess, Visitor},
    ser::{Error as SerializationError, SerializeTuple},
    Deserialize, Deserializer, Serialize, Serializer,
};
use sha2::Sha256;
use std::{fmt, marker::PhantomData};
use thiserror::Error;
use zeroize::Zeroize;

#[derive(Debug, Error)]
pub enum ArkError {
    #[error("could not hash to curve: {0:?}")]
    HashToCurve(HashToCurveError),
}

type ZG1 = bls::G1Projective;
type ZG2 = bls::G2Projective;

/// Hash-to-field used by both map-to-curve hashers: expand_message_xmd over
/// SHA-256 with a 128-bit security parameter.
type FieldHasher = DefaultFieldHasher<Sha256, 128>;

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct Scalar(
    #[serde(deserialize_with = "deserialize_field")]
    #[serde(serialize_with = "serialize_field")]
    Fr,
);

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct G1(
    #[serde(deserialize_with = "deserialize_group")]
    #[serde(serialize_with = "serialize_group")]
    ZG1,
);

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct G2(
    #[serde(deserialize_with = "deserialize_group")]
    #[serde(serialize_with = "serialize_group")]
    ZG2,
);

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GT(
    #[serde(deserialize_with = "deserialize_field")]
    #[serde(serialize_with = "serialize_field")]
    Fq12,
);

impl Element for Scalar {
    type RHS = Scalar;

    fn new() -> Self {
        Self(Fr::zero())
    }

    fn one() -> Self {
        Self(Fr::one())
    }

    fn add(&mut self, s2: &Self) {
        self.0 += s2.0;
    }

    fn mul(&mut self, mul: &Scalar) {
        self.0 *= mul.0;
    }

    fn rand<R: RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }
}

/// Implementation of Scalar using field elements used in BLS12-381
impl Sc for Scalar {
    fn set_int(&mut self, i: u64) {
        *self = Self(Fr::from(i))
    }

    fn inverse(&self) -> Option<Self> {
        Some(Self(Field::inverse(&self.0)?))
    }

    fn negate(&mut self) {
        self.0 = -self.0;
    }

    fn sub(&mut self, other: &Self) {
        self.0 -= other.0;
    }

    fn from_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// G1 points can be multiplied by Fr elements
impl Element for G1 {
    type RHS = Scalar;

    fn new() -> Self {
        Self(ZG1::zero())
    }

    fn one() -> Self {
        Self(ZG1::generator())
    }

    fn add(&mut self, s2: &Self) {
        self.0 += s2.0;
    }

    fn mul(&mut self, mul: &Scalar) {
        self.0 *= mul.0;
    }

    fn rand<R: RngCore>(rng: &mut R) -> Self {
        Self(ZG1::rand(rng))
    }
}

/// Implementation of Point using G1 from BLS12-381
impl Point for G1 {
    type Error = ArkError;

    fn map(&mut self, dst: &[u8], data: &[u8]) -> Result<(), ArkError> {
        let hasher = MapToCurveBasedHasher::<ZG1, FieldHasher, WBMap<bls::g1::Config>>::new(dst)
            .map_err(ArkError::HashToCurve)?;
        let hash = hasher.hash(data).map_err(ArkError::HashToCurve)?;

        *self = Self(hash.into_group());

        Ok(())
    }

    fn multi_exp(bases: &[Self], scalars: &[Scalar]) -> Self {
        let len = bases.len().min(scalars.len());
        let bases = bases[..len].iter().map(|b| b.0).collect::<Vec<_>>();
        let scalars = scalars[..len].iter().map(|s| s.0).collect::<Vec<_>>();

        Self(ZG1::msm_unchecked(&ZG1::normalize_batch(&bases), &scalars))
    }
}

impl fmt::Display for G1 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0.into_affine())
    }
}

/// G2 points can be multiplied by Fr elements
impl Element for G2 {
    type RHS = Scalar;

    fn new() -> Self {
        Self(ZG2::zero())
    }

    fn one() -> Self {
        Self(ZG2::generator())
    }

    fn add(&mut self, s2: &Self) {
        self.0 += s2.0;
    }

    fn mul(&mut self, mul: &Scalar) {
        self.0 *= mul.0;
    }

    fn rand<R: RngCore>(rng: &mut R) -> Self {
        Self(ZG2::rand(rng))
    }
}

/// Implementation of Point using G2 from BLS12-381
impl Point for G2 {
    type Error = ArkError;

    fn map(&mut self, dst: &[u8], data: &[u8]) -> Result<(), ArkError> {
        let hasher = MapToCurveBasedHasher::<ZG2, FieldHasher, WBMap<bls::g2::Config>>::new(dst)
            .map_err(ArkError::HashToCurve)?;
        let hash = hasher.hash(data).map_err(ArkError::HashToCurve)?;

        *self = Self(hash.into_group());

        Ok(())
    }

    fn multi_exp(bases: &[Self], scalars: &[Scalar]) -> Self {
        let len = bases.len().min(scalars.len());
        let bases = bases[..len].iter().map(|b| b.0).collect::<Vec<_>>();
        let scalars = scalars[..len].iter().map(|s| s.0).collect::<Vec<_>>();

        Self(ZG2::msm_unchecked(&ZG2::normalize_batch(&bases), &scalars))
    }
}

impl fmt::Display for G2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0.into_affine())
    }
}

impl Element for GT {
    type RHS = GT;

    fn new() -> Self {
        Self(Fq12::zero())
    }

    fn one() -> Self {
        Self(Fq12::one())
    }

    fn add(&mut self, s2: &Self) {
        self.0 += s2.0;
    }

    fn mul(&mut self, mul: &GT) {
        self.0 *= mul.0;
    }

    fn rand<R: RngCore>(rng: &mut R) -> Self {
        Self(Fq12::rand(rng))
    }
}

impl fmt::Display for GT {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

/// The multiplicative subgroup of `Fr` of power-of-two order.
#[derive(Debug, Clone)]
pub struct Domain(Radix2EvaluationDomain<Fr>);

impl EvaluationDomain<Scalar> for Domain {
    fn new(size: usize) -> Option<Self> {
        // arkworks silently rounds up to the next power of two
        if !size.is_power_of_two() {
            return None;
        }

        <Radix2EvaluationDomain<Fr> as ArkDomain<Fr>>::new(size).map(Self)
    }

    fn size(&self) -> usize {
        <Radix2EvaluationDomain<Fr> as ArkDomain<Fr>>::size(&self.0)
    }

    fn element(&self, i: usize) -> Scalar {
        Scalar(<Radix2EvaluationDomain<Fr> as ArkDomain<Fr>>::element(&self.0, i))
    }

    fn fft(&self, coeffs: &[Scalar]) -> Option<Vec<Scalar>> {
        // arkworks would grow the domain to fit
        if coeffs.len() > self.size() {
            return None;
        }
        let mut coeffs = coeffs.iter().map(|c| c.0).collect::<Vec<_>>();
        let evals = <Radix2EvaluationDomain<Fr> as ArkDomain<Fr>>::fft(&self.0, &coeffs);
        coeffs.zeroize();

        Some(evals.into_iter().map(Scalar).collect())
    }
}

#[derive(Clone, Debug)]
pub struct PairingCurve;

impl PC for PairingCurve {
    type Scalar = Scalar;
    type G1 = G1;
    type G2 = G2;
    type GT = GT;
    type Domain = Domain;

    fn pair(a: &Self::G1, b: &Self::G2) -> Self::GT {
        GT(Bls12_381::pairing(a.0, b.0).0)
    }

    fn pairing_check(a: &[Self::G1], b: &[Self::G2]) -> bool {
        let product = Bls12_381::multi_pairing(a.iter().map(|p| p.0), b.iter().map(|q| q.0));
        product.0.is_one()
    }
}

// Serde implementations: canonical compressed encodings written as fixed-size
// tuples so bincode emits the raw bytes without a length prefix.

fn deserialize_field<'de, D, C>(deserializer: D) -> Result<C, D::Error>
where
    D: Deserializer<'de>,
    C: Field,
{
    struct FieldVisitor<C>(PhantomData<C>);

    impl<'de, C> Visitor<'de> for FieldVisitor<C>
    where
        C: Field,
    {
        type Value = C;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a valid field element")
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<C, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let len = C::zero().compressed_size();
            let bytes: Vec<u8> = (0..len)
                .map(|_| {
                    seq.next_element()?
                        .ok_or_else(|| DeserializeError::custom("could not read bytes"))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let res = C::deserialize_compressed(&mut &bytes[..])
                .map_err(DeserializeError::custom)?;
            Ok(res)
        }
    }

    let visitor = FieldVisitor(PhantomData);
    deserializer.deserialize_tuple(C::zero().compressed_size(), visitor)
}

fn serialize_field<S, C>(c: &C, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    C: CanonicalSerialize,
{
    let len = c.compressed_size();
    let mut bytes = Vec::with_capacity(len);
    c.serialize_compressed(&mut bytes)
        .map_err(SerializationError::custom)?;

    let mut tup = s.serialize_tuple(len)?;
    for byte in &bytes {
        tup.serialize_element(byte)?;
    }
    tup.end()
}

fn deserialize_group<'de, D, C>(deserializer: D) -> Result<C, D::Error>
where
    D: Deserializer<'de>,
    C: CurveGroup,
{
    struct GroupVisitor<C>(PhantomData<C>);

    impl<'de, C> Visitor<'de> for GroupVisitor<C>
    where
        C: CurveGroup,
    {
        type Value = C;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a valid group element")
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<C, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let len = C::Affine::zero().compressed_size();
            let bytes: Vec<u8> = (0..len)
                .map(|_| {
                    seq.next_element()?
                        .ok_or_else(|| DeserializeError::custom("could not read bytes"))
                })
                .collect::<Result<Vec<_>, _>>()?;

            // validates both the curve equation and the subgroup
            let affine = C::Affine::deserialize_compressed(&mut &bytes[..])
                .map_err(DeserializeError::custom)?;
            Ok(affine.into_group())
        }
    }

    let visitor = GroupVisitor(PhantomData);
    deserializer.deserialize_tuple(C::Affine::zero().compressed_size(), visitor)
}

fn serialize_group<S, C>(c: &C, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    C: CurveGroup,
{
    let affine = c.into_affine();
    let len = affine.compressed_size();
    let mut bytes = Vec::with_capacity(len);
    affine
        .serialize_compressed(&mut bytes)
        .map_err(SerializationError::custom)?;

    let mut tup = s.serialize_tuple(len)?;
    for byte in &bytes {
        tup.serialize_element(byte)?;
    }
    tup.end()
}
