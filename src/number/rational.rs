use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::config::Context;
use crate::error::{Result, SolverError};
use crate::number::complexity::should_compute_product;
use crate::number::decompose::cancel_fraction;

/// Exact fraction that keeps the numerator/denominator pair it was built
/// with. Equality is structural: `2/4 != 1/2`. Arithmetic cancels through
/// [`cancel_fraction`], which only divides out primes up to the configured
/// bound.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        Self {
            numer: numer.into(),
            denom: denom.into(),
        }
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self::new(n, 1)
    }

    pub fn zero() -> Self {
        Self::new(0, 1)
    }

    pub fn one() -> Self {
        Self::new(1, 1)
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numer, self.denom)
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero() && !self.denom.is_zero()
    }

    /// Structurally `1/1`.
    pub fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative() != self.denom.is_negative() && !self.numer.is_zero()
    }

    pub fn cancelled(&self, ctx: &Context) -> Self {
        let (numer, denom) = cancel_fraction(&self.numer, &self.denom, ctx);
        Self { numer, denom }
    }

    pub fn neg(&self) -> Self {
        Self::new(-&self.numer, self.denom.clone())
    }

    pub fn recip(&self) -> Result<Self> {
        if self.numer.is_zero() {
            return Err(SolverError::DivisionByZero);
        }
        Ok(Self::new(self.denom.clone(), self.numer.clone()))
    }

    pub fn add(&self, other: &Self, ctx: &Context) -> Self {
        let numer = &self.numer * &other.denom + &other.numer * &self.denom;
        let denom = &self.denom * &other.denom;
        Self { numer, denom }.cancelled(ctx)
    }

    pub fn mul(&self, other: &Self, ctx: &Context) -> Self {
        let numer = &self.numer * &other.numer;
        let denom = &self.denom * &other.denom;
        Self { numer, denom }.cancelled(ctx)
    }

    /// Sum, unless the cross products would outgrow the size guard.
    pub fn checked_add(&self, other: &Self, ctx: &Context) -> Option<Self> {
        let fits = should_compute_product(&self.numer, &other.denom, ctx)
            && should_compute_product(&other.numer, &self.denom, ctx)
            && should_compute_product(&self.denom, &other.denom, ctx);
        fits.then(|| self.add(other, ctx))
    }

    /// Product, unless it would outgrow the size guard.
    pub fn checked_mul(&self, other: &Self, ctx: &Context) -> Option<Self> {
        let fits = should_compute_product(&self.numer, &other.numer, ctx)
            && should_compute_product(&self.denom, &other.denom, ctx);
        fits.then(|| self.mul(other, ctx))
    }

    /// Mathematical value, when the denominator is non-zero.
    pub fn to_big_rational(&self) -> Option<BigRational> {
        if self.denom.is_zero() {
            None
        } else {
            Some(BigRational::new(self.numer.clone(), self.denom.clone()))
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
