use num_integer::Integer;

use crate::error::Result;
use crate::expr::{Expr, TrigFn};
use crate::number::Rational;
use crate::simplify::Simplifier;
use crate::simplify::rules::{combine_product, combine_sum};
use crate::trig_table;

pub(super) fn combine_trig(
    s: &Simplifier<'_>,
    func: TrigFn,
    argument: Expr,
    depth: usize,
) -> Result<Expr> {
    let depth = s.descend(depth)?;
    match func {
        TrigFn::Sin | TrigFn::Cos => sin_cos(s, func, argument, depth),
        // Rewrites are simplified right away; each one only produces sin, cos,
        // asin or acos nodes, so this never loops.
        TrigFn::Tan => s.visit(Expr::div(Expr::sin(argument.clone()), Expr::cos(argument)), depth),
        TrigFn::Cot => s.visit(Expr::div(Expr::cos(argument.clone()), Expr::sin(argument)), depth),
        TrigFn::Sec => s.visit(Expr::inv(Expr::cos(argument)), depth),
        TrigFn::Csc => s.visit(Expr::inv(Expr::sin(argument)), depth),
        TrigFn::Asin | TrigFn::Acos => Ok(trig_table::principal_value(func, &argument)
            .unwrap_or_else(|| Expr::trig(func, argument))),
        TrigFn::Atan => s.visit(Expr::trig(TrigFn::Asin, over_hypotenuse(argument)), depth),
        TrigFn::Acot => s.visit(Expr::trig(TrigFn::Acos, over_hypotenuse(argument)), depth),
        TrigFn::Asec => s.visit(Expr::trig(TrigFn::Acos, Expr::inv(argument)), depth),
        TrigFn::Acsc => s.visit(Expr::trig(TrigFn::Asin, Expr::inv(argument)), depth),
    }
}

/// `x / sqrt(1 + x^2)`
fn over_hypotenuse(x: Expr) -> Expr {
    let squared = Expr::pow(x.clone(), Expr::integer(2));
    Expr::div(x, Expr::pow(Expr::Sum(vec![Expr::one(), squared]), Expr::rational(1, 2)))
}

fn sin_cos(s: &Simplifier<'_>, func: TrigFn, argument: Expr, depth: usize) -> Result<Expr> {
    if let Some((sign, reduced)) = drop_periods(s, &argument, depth)? {
        let inner = combine_trig(s, func, reduced, depth)?;
        return combine_product(s, vec![sign, inner], depth);
    }

    match (func, &argument) {
        (TrigFn::Sin, Expr::Trig(TrigFn::Asin, inner))
        | (TrigFn::Cos, Expr::Trig(TrigFn::Acos, inner)) => return Ok((**inner).clone()),
        _ => {}
    }

    if let Some(multiple) = multiple_of_pi(&argument) {
        if let Some(value) = trig_table::sin_cos_value(func, &multiple) {
            return Ok(value);
        }
    }

    if let Expr::Sum(terms) = &argument {
        let limit = s.context().config().max_terms_for_trigonometric_sum_expansion;
        if terms.len() >= 2 && terms.len() <= limit {
            return Ok(expand_sum_angle(func, terms));
        }
    }

    Ok(Expr::trig(func, argument))
}

/// `sin(a + b) = sin a cos b + cos a sin b`,
/// `cos(a + b) = cos a cos b - sin a sin b`, splitting off the first term.
/// The result is simplified by the next pass.
fn expand_sum_angle(func: TrigFn, terms: &[Expr]) -> Expr {
    let a = terms[0].clone();
    let b = match &terms[1..] {
        [single] => single.clone(),
        rest => Expr::Sum(rest.to_vec()),
    };
    match func {
        TrigFn::Cos => Expr::Sum(vec![
            Expr::Product(vec![Expr::cos(a.clone()), Expr::cos(b.clone())]),
            Expr::neg(Expr::Product(vec![Expr::sin(a), Expr::sin(b)])),
        ]),
        _ => Expr::Sum(vec![
            Expr::Product(vec![Expr::sin(a.clone()), Expr::cos(b.clone())]),
            Expr::Product(vec![Expr::cos(a), Expr::sin(b)]),
        ]),
    }
}

/// `π`, `0`, `r·π` and `π·r` as the rational `r`.
fn multiple_of_pi(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Pi => Some(Rational::one()),
        Expr::Rational(r) if r.is_zero() => Some(Rational::zero()),
        Expr::Product(factors) => match factors.as_slice() {
            [Expr::Rational(r), Expr::Pi] | [Expr::Pi, Expr::Rational(r)] => Some(r.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Removes whole periods `c·π·k…` (integer `c`, parameters `k`) from a
/// sine/cosine argument. Odd multiples of π flip the sign, returned as
/// `(-1)^(k…)` alongside the reduced argument. `None` when nothing matched.
fn drop_periods(s: &Simplifier<'_>, argument: &Expr, depth: usize) -> Result<Option<(Expr, Expr)>> {
    let terms: &[Expr] = match argument {
        Expr::Sum(terms) => terms,
        other => std::slice::from_ref(other),
    };
    let mut kept = Vec::with_capacity(terms.len());
    let mut flips = Vec::new();
    let mut matched = false;
    for term in terms {
        match period_term(term) {
            Some((odd, params)) => {
                matched = true;
                if odd {
                    flips.push(params);
                }
            }
            None => kept.push(term.clone()),
        }
    }
    if !matched {
        return Ok(None);
    }
    let sign = match flips.len() {
        0 => Expr::one(),
        _ => Expr::pow(Expr::integer(-1), Expr::Sum(flips)),
    };
    let sign = s.visit(sign, depth)?;
    let reduced = combine_sum(s, kept, depth)?;
    Ok(Some((sign, reduced)))
}

/// `(c is odd, k₁…kₙ)` for a term `c·π·k₁…kₙ` with integer `c` and at least
/// one parameter.
fn period_term(term: &Expr) -> Option<(bool, Expr)> {
    let Expr::Product(factors) = term else {
        return None;
    };
    let mut coeff = Rational::one();
    let mut pi_seen = false;
    let mut params = Vec::new();
    for factor in factors {
        match factor {
            Expr::Rational(r) if r.is_integer() => coeff = r.clone(),
            Expr::Pi if !pi_seen => pi_seen = true,
            Expr::Param(_) => params.push(factor.clone()),
            _ => return None,
        }
    }
    if !pi_seen || params.is_empty() {
        return None;
    }
    let params = match params.len() {
        1 => params.remove(0),
        _ => Expr::Product(params),
    };
    Some((coeff.numer().is_odd(), params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;

    fn full(expr: Expr) -> Expr {
        let ctx = Context::default();
        Simplifier::new(&ctx).simplify_fully(expr).expect("simplifies")
    }

    fn pi_times(num: i64, den: i64) -> Expr {
        Expr::Product(vec![Expr::rational(num, den), Expr::Pi])
    }

    #[test]
    fn table_values() {
        assert_eq!(full(Expr::sin(pi_times(1, 6))), Expr::rational(1, 2));
        assert_eq!(full(Expr::cos(Expr::Pi)), Expr::integer(-1));
        assert_eq!(full(Expr::sin(Expr::zero())), Expr::zero());
    }

    #[test]
    fn whole_periods_are_dropped() {
        let two_pi_k = Expr::Product(vec![Expr::integer(2), Expr::Pi, Expr::param("k")]);
        let arg = Expr::Sum(vec![two_pi_k, pi_times(1, 6)]);
        assert_eq!(full(Expr::sin(arg)), Expr::rational(1, 2));
    }

    #[test]
    fn odd_period_flips_sign() {
        let pi_k = Expr::Product(vec![Expr::Pi, Expr::param("k")]);
        let result = full(Expr::sin(Expr::Sum(vec![pi_k, Expr::var("x")])));
        assert_eq!(
            result,
            Expr::Product(vec![
                Expr::pow(Expr::integer(-1), Expr::param("k")),
                Expr::sin(Expr::var("x")),
            ])
        );
    }

    #[test]
    fn inverse_composition() {
        let x = Expr::var("x");
        assert_eq!(full(Expr::sin(Expr::trig(TrigFn::Asin, x.clone()))), x);
        assert_eq!(full(Expr::trig(TrigFn::Acos, Expr::rational(1, 2))), pi_times(1, 3));
    }

    #[test]
    fn cosine_sum_angle_subtracts() {
        let x = Expr::var("x");
        let expanded = full(Expr::cos(Expr::Sum(vec![x.clone(), Expr::Pi])));
        assert_eq!(expanded, Expr::Product(vec![Expr::integer(-1), Expr::cos(x)]));
    }
}
