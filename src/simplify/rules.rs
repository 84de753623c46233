use std::collections::BTreeMap;

use crate::error::Result;
use crate::expr::Expr;
use crate::number::{Rational, power_and_remainder};
use crate::simplify::Simplifier;
use crate::simplify::power::combine_pow;

/// Combines already simplified terms into a canonical sum.
///
/// Rationals fold into one constant, equal bases add their coefficients,
/// logarithms sharing a base merge by multiplying their arguments. Terms are
/// ordered by base with the constant last.
pub(super) fn combine_sum(s: &Simplifier<'_>, terms: Vec<Expr>, depth: usize) -> Result<Expr> {
    let depth = s.descend(depth)?;

    let mut acc = SumParts::new();
    let mut logs: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
    for term in flatten_sum(terms) {
        match term {
            Expr::Log(base, argument) => logs.entry(*base).or_default().push(*argument),
            other => acc.add(other, s),
        }
    }

    for (base, mut arguments) in logs {
        if arguments.len() == 1 {
            acc.add(Expr::Log(base.boxed(), arguments.remove(0).boxed()), s);
            continue;
        }
        let merged = combine_product(s, arguments, depth)?;
        let merged = super::power::combine_log(s, base, merged, depth)?;
        acc.add(merged, s);
    }

    let mut out: Vec<Expr> = acc
        .terms
        .into_iter()
        .filter(|(_, coeff)| !coeff.is_zero())
        .map(|(base, coeff)| term_from(coeff, base))
        .collect();
    out.extend(acc.overflow);
    if !acc.constant.is_zero() {
        out.push(Expr::Rational(acc.constant));
    }

    Ok(match out.len() {
        0 => Expr::zero(),
        1 => out.remove(0),
        _ => Expr::Sum(out),
    })
}

struct SumParts {
    constant: Rational,
    terms: BTreeMap<Expr, Rational>,
    overflow: Vec<Expr>,
}

impl SumParts {
    fn new() -> Self {
        Self {
            constant: Rational::zero(),
            terms: BTreeMap::new(),
            overflow: Vec::new(),
        }
    }

    fn add(&mut self, term: Expr, s: &Simplifier<'_>) {
        let ctx = s.context();
        match term {
            Expr::Rational(r) => match self.constant.checked_add(&r, ctx) {
                Some(sum) => self.constant = sum,
                None => self.overflow.push(Expr::Rational(r)),
            },
            other => {
                let (coeff, base) = split_coeff(other);
                match self.terms.get_mut(&base) {
                    Some(existing) => match existing.checked_add(&coeff, ctx) {
                        Some(sum) => *existing = sum,
                        None => self.overflow.push(term_from(coeff, base)),
                    },
                    None => {
                        self.terms.insert(base, coeff);
                    }
                }
            }
        }
    }
}

fn flatten_sum(terms: Vec<Expr>) -> Vec<Expr> {
    let mut out = Vec::with_capacity(terms.len());
    for term in terms {
        match term {
            Expr::Sum(inner) => out.extend(flatten_sum(inner)),
            other => out.push(other),
        }
    }
    out
}

/// Splits a term into its rational coefficient and the remaining base.
fn split_coeff(term: Expr) -> (Rational, Expr) {
    match term {
        Expr::Product(factors) => {
            let mut coeff = None;
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor {
                    Expr::Rational(r) if coeff.is_none() => coeff = Some(r),
                    other => rest.push(other),
                }
            }
            match coeff {
                None => (Rational::one(), Expr::Product(rest)),
                Some(c) if rest.len() == 1 => (c, rest.remove(0)),
                Some(c) => (c, Expr::Product(rest)),
            }
        }
        Expr::Neg(inner) => (Rational::from_integer(-1), *inner),
        other => (Rational::one(), other),
    }
}

fn term_from(coeff: Rational, base: Expr) -> Expr {
    if coeff.is_one() {
        return base;
    }
    match base {
        Expr::Product(factors) => {
            let mut out = Vec::with_capacity(factors.len() + 1);
            out.push(Expr::Rational(coeff));
            out.extend(factors);
            Expr::Product(out)
        }
        other => Expr::Product(vec![Expr::Rational(coeff), other]),
    }
}

/// Combines already simplified factors into a canonical product.
///
/// Sum factors are distributed when the projected term count fits the
/// expansion budget. Otherwise rationals fold into one leading coefficient
/// and factors sharing a base add their exponents. Powers of a rational
/// base with a variable exponent absorb matching rational factors.
pub(super) fn combine_product(
    s: &Simplifier<'_>,
    factors: Vec<Expr>,
    depth: usize,
) -> Result<Expr> {
    let depth = s.descend(depth)?;
    let ctx = s.context();

    let flat = flatten_product(factors);
    if flat.iter().any(Expr::is_zero) {
        return Ok(Expr::zero());
    }
    if let [single] = flat.as_slice() {
        return Ok(single.clone());
    }

    let (sums, rest): (Vec<Expr>, Vec<Expr>) =
        flat.into_iter().partition(|f| matches!(f, Expr::Sum(_)));
    if !sums.is_empty() {
        let limit = ctx.config().max_resulting_terms_from_expansion;
        let projected = sums.iter().try_fold(1usize, |acc, sum| match sum {
            Expr::Sum(terms) => acc.checked_mul(terms.len()),
            _ => Some(acc),
        });
        if matches!(projected, Some(n) if n <= limit) {
            return distribute(s, sums, rest, depth);
        }
        tracing::trace!(target: "simplify", limit, "expansion_skipped");
    }

    let mut coeff = Rational::one();
    let mut overflow: Vec<Expr> = Vec::new();
    let mut powers: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
    for factor in sums.into_iter().chain(rest) {
        match factor {
            Expr::Rational(r) => match coeff.checked_mul(&r, ctx) {
                Some(product) => coeff = product,
                None => overflow.push(Expr::Rational(r)),
            },
            radical @ Expr::Pow(_, _) if is_radical(&radical) => {
                powers.entry(radical).or_default().push(Expr::one());
            }
            Expr::Pow(base, exponent) => powers.entry(*base).or_default().push(*exponent),
            other => powers.entry(other).or_default().push(Expr::one()),
        }
    }

    let mut out: Vec<Expr> = Vec::new();
    for (base, mut exponents) in powers {
        if let Expr::Rational(b) = &base {
            if exponents.iter().any(|e| !e.variables().is_empty()) {
                let (power, remainder) = power_and_remainder(b, &coeff, ctx);
                if power != 0 {
                    coeff = remainder.cancelled(ctx);
                    exponents.push(Expr::integer(power));
                }
            }
        }
        let exponent = match exponents.len() {
            1 => exponents.remove(0),
            _ => combine_sum(s, exponents, depth)?,
        };
        if exponent.is_zero() {
            continue;
        }
        let factor = if exponent.is_one() {
            base
        } else {
            combine_pow(s, base, exponent, depth)?
        };
        let pieces = match factor {
            Expr::Product(inner) => inner,
            other => vec![other],
        };
        for piece in pieces {
            match piece {
                Expr::Rational(r) => match coeff.checked_mul(&r, ctx) {
                    Some(product) => coeff = product,
                    None => overflow.push(Expr::Rational(r)),
                },
                other => out.push(other),
            }
        }
    }

    if coeff.is_zero() {
        return Ok(Expr::zero());
    }
    out.sort();
    let mut factors = Vec::with_capacity(out.len() + overflow.len() + 1);
    if !coeff.is_one() {
        factors.push(Expr::Rational(coeff));
    }
    factors.extend(overflow);
    factors.extend(out);

    Ok(match factors.len() {
        0 => Expr::one(),
        1 => factors.remove(0),
        _ => Expr::Product(factors),
    })
}

fn flatten_product(factors: Vec<Expr>) -> Vec<Expr> {
    let mut out = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor {
            Expr::Product(inner) => out.extend(flatten_product(inner)),
            other => out.push(other),
        }
    }
    out
}

/// A rational raised to a rational exponent. Kept whole when collecting
/// powers so separately extracted radicals do not recombine.
fn is_radical(expr: &Expr) -> bool {
    matches!(expr, Expr::Pow(base, exponent)
        if matches!(**base, Expr::Rational(_)) && matches!(**exponent, Expr::Rational(_)))
}

fn distribute(
    s: &Simplifier<'_>,
    sums: Vec<Expr>,
    rest: Vec<Expr>,
    depth: usize,
) -> Result<Expr> {
    let mut partial: Vec<Vec<Expr>> = vec![rest];
    for sum in sums {
        let Expr::Sum(terms) = sum else {
            continue;
        };
        partial = partial
            .iter()
            .flat_map(|prefix| {
                terms.iter().map(move |term| {
                    let mut next = prefix.clone();
                    next.push(term.clone());
                    next
                })
            })
            .collect();
    }
    let terms = partial
        .into_iter()
        .map(|factors| combine_product(s, factors, depth))
        .collect::<Result<Vec<_>>>()?;
    combine_sum(s, terms, depth)
}
