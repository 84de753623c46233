use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Result, SolverError};
use crate::expr::Expr;
use crate::number::{Rational, byte_len, partial_root_full, power_and_remainder, should_compute_power};
use crate::simplify::Simplifier;
use crate::simplify::rules::combine_product;

pub(super) fn combine_pow(
    s: &Simplifier<'_>,
    base: Expr,
    exponent: Expr,
    depth: usize,
) -> Result<Expr> {
    let depth = s.descend(depth)?;
    if base.is_one() || exponent.is_zero() {
        return Ok(Expr::one());
    }
    if exponent.is_one() {
        return Ok(base);
    }

    match (base, exponent) {
        (Expr::Rational(b), Expr::Rational(e)) => rational_power(s, b, e),
        (base, Expr::Log(log_base, argument)) if *log_base == base => Ok(*argument),
        (Expr::Pow(inner, e1), e2) if !is_even_root_of_negative(&inner, &e1) => {
            let exponent = combine_product(s, vec![*e1, e2], depth)?;
            combine_pow(s, *inner, exponent, depth)
        }
        (Expr::Product(factors), Expr::Rational(e)) => {
            let factors = factors
                .into_iter()
                .map(|f| combine_pow(s, f, Expr::Rational(e.clone()), depth))
                .collect::<Result<Vec<_>>>()?;
            combine_product(s, factors, depth)
        }
        (Expr::Sum(terms), Expr::Rational(e)) => match expansion_power(s, terms.len(), &e) {
            Some(n) => combine_product(s, vec![Expr::Sum(terms); n], depth),
            None => Ok(Expr::pow(Expr::Sum(terms), Expr::Rational(e))),
        },
        (base, exponent) => Ok(Expr::pow(base, exponent)),
    }
}

/// `(-a)^(p/q)` with even `q` has no real value, so it must not fold into
/// an outer power.
fn is_even_root_of_negative(base: &Expr, exponent: &Expr) -> bool {
    match (base, exponent) {
        (Expr::Rational(b), Expr::Rational(e)) => b.is_negative() && e.denom().is_even(),
        _ => false,
    }
}

/// `n` when `(sum)^n` is a small integer power whose expansion fits.
fn expansion_power(s: &Simplifier<'_>, terms: usize, exponent: &Rational) -> Option<usize> {
    if !exponent.is_integer() {
        return None;
    }
    let n = exponent.numer().to_usize()?;
    if n < 2 {
        return None;
    }
    let projected = terms.checked_pow(u32::try_from(n).ok()?)?;
    (projected <= s.context().config().max_resulting_terms_from_expansion).then_some(n)
}

/// Exact `base^exponent` for rationals. Negative exponents invert the base
/// first. A fractional result is rationalized into `c * m^(1/q)` with an
/// integer radicand; results that would break the size guard, or even
/// roots of negative numbers, stay as an unevaluated power.
fn rational_power(s: &Simplifier<'_>, base: Rational, exponent: Rational) -> Result<Expr> {
    let ctx = s.context();
    if base.denom().is_zero() || exponent.denom().is_zero() {
        return Ok(Expr::pow(Expr::Rational(base), Expr::Rational(exponent)));
    }
    let (base, exponent) = if exponent.is_negative() {
        (base.recip()?.cancelled(ctx), exponent.neg().cancelled(ctx))
    } else {
        (base, exponent)
    };
    if base.is_zero() {
        return Ok(Expr::zero());
    }
    let unevaluated = || Ok(Expr::pow(Expr::Rational(base.clone()), Expr::Rational(exponent.clone())));

    let (p, q) = (exponent.numer().abs(), exponent.denom().abs());
    let (whole, rem) = p.div_rem(&q);
    let negative = base.is_negative();
    if negative && !rem.is_zero() && q.is_even() {
        return unevaluated();
    }
    let n = base.numer().abs();
    let d = base.denom().abs();

    let Some(whole_exp) = whole.to_usize() else {
        return unevaluated();
    };
    if !should_compute_power(&n, &whole, ctx) || !should_compute_power(&d, &whole, ctx) {
        return unevaluated();
    }
    let mut coeff = Rational::new(num_traits::pow(n.clone(), whole_exp), num_traits::pow(d.clone(), whole_exp));
    if negative && p.is_odd() {
        coeff = coeff.neg();
    }
    if rem.is_zero() {
        return Ok(Expr::Rational(coeff.cancelled(ctx)));
    }

    // (n/d)^(r/q) = (n^r * d^(q-r))^(1/q) / d
    let d_exp = &q - &rem;
    let projected = BigInt::from(byte_len(&n)) * &rem + BigInt::from(byte_len(&d)) * &d_exp;
    let (Some(rem_exp), Some(d_exp)) = (rem.to_usize(), d_exp.to_usize()) else {
        return unevaluated();
    };
    if projected > BigInt::from(ctx.config().max_size_of_numbers_in_bytes) {
        tracing::trace!(target: "simplify", %base, %exponent, "power_guard");
        return unevaluated();
    }
    let radicand = num_traits::pow(n, rem_exp) * num_traits::pow(d.clone(), d_exp);
    coeff = Rational::new(coeff.numer().clone(), coeff.denom() * &d);

    let radical = partial_root_full(&q, &BigInt::one(), &radicand, ctx)?;
    let mut pieces = Vec::new();
    let parts = match radical {
        Expr::Product(parts) => parts,
        other => vec![other],
    };
    for part in parts {
        match part {
            Expr::Rational(r) => coeff = coeff.mul(&r, ctx),
            other => pieces.push(other),
        }
    }
    let coeff = coeff.cancelled(ctx);
    if pieces.is_empty() {
        return Ok(Expr::Rational(coeff));
    }
    if coeff.is_one() && pieces.len() == 1 {
        return Ok(pieces.remove(0));
    }
    let mut factors = Vec::with_capacity(pieces.len() + 1);
    if !coeff.is_one() {
        factors.push(Expr::Rational(coeff));
    }
    factors.extend(pieces);
    Ok(Expr::Product(factors))
}

pub(super) fn combine_root(
    s: &Simplifier<'_>,
    degree: Expr,
    radicand: Expr,
    depth: usize,
) -> Result<Expr> {
    let depth = s.descend(depth)?;
    let reciprocal = match degree {
        Expr::Rational(r) if r.is_zero() => return Err(SolverError::ZeroDegreeRoot),
        Expr::Rational(r) => Expr::Rational(r.recip()?.cancelled(s.context())),
        other => combine_pow(s, other, Expr::integer(-1), depth)?,
    };
    combine_pow(s, radicand, reciprocal, depth)
}

pub(super) fn combine_log(
    s: &Simplifier<'_>,
    base: Expr,
    argument: Expr,
    depth: usize,
) -> Result<Expr> {
    s.descend(depth)?;
    if argument.is_one() {
        return Ok(Expr::zero());
    }
    if argument == base {
        return Ok(Expr::one());
    }
    match (base, argument) {
        (Expr::Rational(b), Expr::Rational(a)) => {
            let (power, remainder) = power_and_remainder(&b, &a, s.context());
            if power != 0 && remainder.cancelled(s.context()).is_one() {
                Ok(Expr::integer(power))
            } else {
                Ok(Expr::log(Expr::Rational(b), Expr::Rational(a)))
            }
        }
        (base, Expr::Pow(inner, exponent)) if *inner == base => Ok(*exponent),
        (base, argument) => Ok(Expr::log(base, argument)),
    }
}
