//! Prime-bounded factorization and the exact operations built on it.
//!
//! Only primes up to the configured bound are ever tried, so cancellation
//! and root extraction are deliberately incomplete for large prime factors.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::config::Context;
use crate::error::{Result, SolverError};
use crate::expr::Expr;
use crate::number::complexity::should_compute_power;
use crate::number::rational::Rational;

/// Prime factors of `n` in ascending order, using primes up to
/// `min(max_factor, configured bound)`. A negative input starts with a `-1`
/// marker and whatever cannot be factored is appended as a trailing
/// composite. `0`, `1` and `-1` decompose to themselves.
pub fn decompose(n: &BigInt, max_factor: u32, ctx: &Context) -> Vec<BigInt> {
    if n.is_zero() || n.is_one() || *n == -BigInt::one() {
        return vec![n.clone()];
    }
    let mut factors = Vec::new();
    let mut rest = n.clone();
    if rest.is_negative() {
        factors.push(-BigInt::one());
        rest = -rest;
    }
    let bound = max_factor.min(ctx.config().max_decomposition_factor.max(3));
    for p in ctx.primes_below(bound) {
        if rest.is_one() {
            break;
        }
        let p = BigInt::from(p);
        loop {
            let (quotient, remainder) = rest.div_rem(&p);
            if !remainder.is_zero() {
                break;
            }
            factors.push(p.clone());
            rest = quotient;
        }
    }
    if !rest.is_one() {
        factors.push(rest);
    }
    factors
}

/// Decomposition with the full configured prime bound.
pub fn decompose_fully(n: &BigInt, ctx: &Context) -> Vec<BigInt> {
    decompose(n, u32::MAX, ctx)
}

/// Reduces `numer/denom` by the tracked primes and moves the sign onto the
/// numerator.
pub fn cancel_fraction(numer: &BigInt, denom: &BigInt, ctx: &Context) -> (BigInt, BigInt) {
    match (numer.is_zero(), denom.is_zero()) {
        (true, true) => return (BigInt::zero(), BigInt::zero()),
        (false, true) => return (BigInt::one(), BigInt::zero()),
        (true, false) => return (BigInt::zero(), BigInt::one()),
        (false, false) => {}
    }
    if numer == denom {
        return (BigInt::one(), BigInt::one());
    }
    if *numer == -denom {
        return (-BigInt::one(), BigInt::one());
    }
    let negative = numer.is_negative() != denom.is_negative();
    let mut n = numer.abs();
    let mut d = denom.abs();
    for p in ctx.primes() {
        let p = BigInt::from(*p);
        if n < p || d < p {
            break;
        }
        while n.is_multiple_of(&p) && d.is_multiple_of(&p) {
            n /= &p;
            d /= &p;
        }
    }
    if negative {
        n = -n;
    }
    (n, d)
}

/// Splits `radicand` into `(whole, remaining)` so that
/// `radicand^(1/root) = whole * remaining^(1/root)`, extracting only the
/// prime powers the configured bound can see. A negative root is treated as
/// its absolute value.
pub fn partial_root(root: &BigInt, radicand: &BigInt, ctx: &Context) -> Result<(BigInt, BigInt)> {
    let root = root.abs();
    if root.is_zero() {
        return Err(SolverError::ZeroDegreeRoot);
    }
    if radicand.is_zero() {
        return Ok((BigInt::zero(), BigInt::zero()));
    }
    if root.is_one() {
        return Ok((radicand.clone(), BigInt::one()));
    }
    let mut whole = BigInt::one();
    let mut radical = BigInt::one();
    let mut rest = radicand.clone();
    for p in ctx.primes() {
        let p = BigInt::from(*p);
        let mut count = BigInt::zero();
        while rest.is_multiple_of(&p) {
            rest /= &p;
            count += 1;
            if count == root {
                whole *= &p;
                count = BigInt::zero();
            }
        }
        let leftover = count.to_u32().unwrap_or(0);
        radical *= num_traits::pow(p, leftover as usize);
    }
    radical *= rest;
    Ok((whole, radical))
}

/// `radicand^(power/root)` as the product of an exact part and the smallest
/// radicals the configured bounds allow. Composite roots are split into
/// prime sub-roots up to `max_exponent_factor_of_root`; if exponentiation
/// would outgrow the size guard the power is returned unevaluated. A
/// negative `power` gives the reciprocal: an inverted rational part and
/// radicals with negative exponents.
pub fn partial_root_full(
    root: &BigInt,
    power: &BigInt,
    radicand: &BigInt,
    ctx: &Context,
) -> Result<Expr> {
    if root.is_zero() {
        return Err(SolverError::ZeroDegreeRoot);
    }
    if power.is_zero() {
        return Ok(Expr::one());
    }
    let negative = power.is_negative();
    if radicand.is_zero() {
        return if negative { Err(SolverError::DivisionByZero) } else { Ok(Expr::zero()) };
    }
    let root = root.abs();
    let (whole_exp, rem) = power.abs().div_rem(&root);
    if !should_compute_power(radicand, &rem, ctx) {
        return Ok(Expr::pow(
            Expr::integer(radicand.clone()),
            Expr::Rational(Rational::new(power.clone(), root)),
        ));
    }

    let mut coeff = BigInt::one();
    let mut pieces = Vec::new();
    if whole_exp.is_positive() {
        match whole_exp.to_usize() {
            Some(e) if should_compute_power(radicand, &whole_exp, ctx) => {
                coeff *= num_traits::pow(radicand.clone(), e);
            }
            _ => pieces.push(Expr::pow(
                Expr::integer(radicand.clone()),
                Expr::integer(if negative { -whole_exp } else { whole_exp }),
            )),
        }
    }

    let rem = rem.to_usize().unwrap_or(0);
    let mut buffer = num_traits::pow(radicand.clone(), rem);
    let mut root_left = root.clone();
    let max_factor = BigInt::from(ctx.config().max_exponent_factor_of_root);
    if rem != 0 {
        for factor in decompose_fully(&root, ctx) {
            if factor > max_factor {
                pieces.push(radical(buffer, root_left.clone(), negative));
                buffer = BigInt::one();
                break;
            }
            let (whole, rest) = partial_root(&factor, &buffer, ctx)?;
            if !rest.is_one() {
                pieces.push(radical(rest, root_left.clone(), negative));
            }
            root_left /= &factor;
            buffer = whole;
        }
    }
    coeff *= buffer;

    let coeff = if negative {
        Rational::new(BigInt::one(), coeff).cancelled(ctx)
    } else {
        Rational::new(coeff, BigInt::one())
    };
    if pieces.is_empty() {
        return Ok(Expr::Rational(coeff));
    }
    let mut factors = Vec::with_capacity(pieces.len() + 1);
    if !coeff.is_one() {
        factors.push(Expr::Rational(coeff));
    }
    factors.extend(pieces);
    Ok(match factors.len() {
        1 => factors.remove(0),
        _ => Expr::Product(factors),
    })
}

fn radical(radicand: BigInt, degree: BigInt, inverted: bool) -> Expr {
    let numer = if inverted { -BigInt::one() } else { BigInt::one() };
    Expr::pow(
        Expr::integer(radicand),
        Expr::Rational(Rational::new(numer, degree)),
    )
}

/// Largest `p` with `value = base^p * remainder`, found by matching prime
/// multisets. Negative `p` means `value` holds powers of `1/base`. Returns
/// `(0, value)` when the base does not divide the value at all, and for the
/// trivial bases `0` and `±1`.
pub fn power_and_remainder(base: &Rational, value: &Rational, ctx: &Context) -> (i64, Rational) {
    let trivial_base = base.numer().is_zero()
        || base.denom().is_zero()
        || base.numer().abs() == base.denom().abs();
    if trivial_base || value.numer().is_zero() || value.denom().is_zero() {
        return (0, value.clone());
    }

    let mut numer = decompose_fully(value.numer(), ctx);
    let mut denom = decompose_fully(value.denom(), ctx);
    let mut base_n = decompose_fully(base.numer(), ctx);
    let mut base_d = decompose_fully(base.denom(), ctx);
    remove_one(&mut base_n, &BigInt::one());
    remove_one(&mut base_d, &BigInt::one());

    let positive = base_n.iter().any(|f| !denom.contains(f))
        || base_d.iter().any(|f| !numer.contains(f));
    if !positive {
        std::mem::swap(&mut numer, &mut denom);
    }

    let mut power = 0i64;
    loop {
        let mut taken_n = Vec::new();
        let mut taken_d = Vec::new();
        let fits = take_all(&base_n, &mut numer, &mut taken_n)
            && take_all(&base_d, &mut denom, &mut taken_d);
        if !fits {
            numer.extend(taken_n);
            denom.extend(taken_d);
            break;
        }
        power += 1;
    }

    let numer: BigInt = numer.iter().product();
    let denom: BigInt = denom.iter().product();
    if positive {
        (power, Rational::new(numer, denom))
    } else {
        (-power, Rational::new(denom, numer))
    }
}

fn remove_one(factors: &mut Vec<BigInt>, item: &BigInt) -> bool {
    match factors.iter().position(|f| f == item) {
        Some(i) => {
            factors.remove(i);
            true
        }
        None => false,
    }
}

fn take_all(wanted: &[BigInt], pool: &mut Vec<BigInt>, taken: &mut Vec<BigInt>) -> bool {
    for factor in wanted {
        if !remove_one(pool, factor) {
            return false;
        }
        taken.push(factor.clone());
    }
    true
}
