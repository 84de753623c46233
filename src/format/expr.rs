use num_bigint::BigInt;

use crate::expr::Expr;
use crate::number::Rational;

// Binding strength of the surrounding context: 0 top level, 1 sum,
// 2 product, 3 power base or exponent, 4 operand of a prefix operator.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Rational(r) => {
                let body = r.to_string();
                if (r.is_negative() && ctx >= 2) || (!r.is_integer() && ctx >= 3) {
                    format!("({body})")
                } else {
                    body
                }
            }
            Expr::Variable(name) | Expr::Param(name) => name.clone(),
            Expr::Pi => "pi".to_string(),
            Expr::E => "e".to_string(),

            Expr::Neg(inner) => bracket(ctx, 2, format!("-{}", pp(3, inner))),
            Expr::Inv(inner) => bracket(ctx, 2, format!("1/{}", pp(3, inner))),

            Expr::Sum(terms) => {
                let mut body = String::new();
                for (i, term) in terms.iter().enumerate() {
                    let (negative, magnitude) = split_neg(term);
                    match (i, negative) {
                        (0, false) => body.push_str(&pp(1, term)),
                        (0, true) => body.push_str(&format!("-{}", pp(2, &magnitude))),
                        (_, false) => body.push_str(&format!(" + {}", pp(1, term))),
                        (_, true) => body.push_str(&format!(" - {}", pp(2, &magnitude))),
                    }
                }
                if terms.is_empty() {
                    body.push('0');
                }
                bracket(ctx, 1, body)
            }

            Expr::Product(factors) => {
                let (negative, magnitude) = split_neg(expr);
                let factors: &[Expr] = match (&magnitude, negative) {
                    (Expr::Product(rest), true) => rest,
                    (_, true) => std::slice::from_ref(&magnitude),
                    (_, false) => factors,
                };
                let mut numerator = Vec::new();
                let mut denominator = Vec::new();
                for factor in factors {
                    match factor {
                        Expr::Inv(inner) => denominator.push(pp(3, inner)),
                        other => numerator.push(pp(2, other)),
                    }
                }
                let mut body = if numerator.is_empty() {
                    "1".to_string()
                } else {
                    numerator.join("*")
                };
                match denominator.len() {
                    0 => {}
                    1 => body = format!("{body}/{}", denominator[0]),
                    _ => body = format!("{body}/({})", denominator.join("*")),
                }
                if negative {
                    body = format!("-{body}");
                }
                bracket(ctx, 2, body)
            }

            Expr::Pow(base, exponent) => {
                bracket(ctx, 3, format!("{}^{}", pp(4, base), pp(3, exponent)))
            }
            Expr::Root(degree, radicand) if degree.as_rational().is_some_and(is_two) => {
                format!("sqrt({})", pp(0, radicand))
            }
            Expr::Root(degree, radicand) => format!("root({}, {})", pp(0, degree), pp(0, radicand)),
            Expr::Log(base, argument) if **base == Expr::E => format!("ln({})", pp(0, argument)),
            Expr::Log(base, argument) => format!("log({}, {})", pp(0, base), pp(0, argument)),
            Expr::Trig(func, argument) => format!("{}({})", func.name(), pp(0, argument)),
        }
    }

    pp(0, expr)
}

fn is_two(r: &Rational) -> bool {
    r.is_integer() && *r.numer() == BigInt::from(2)
}

/// Pulls a leading minus sign out of negations, negative numbers and
/// products with a negative coefficient.
fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Rational(r) if r.is_negative() => (true, Expr::Rational(r.neg())),
        Expr::Product(factors) => match factors.split_first() {
            Some((Expr::Rational(c), rest)) if c.is_negative() => {
                let magnitude = c.neg();
                let mut kept = Vec::with_capacity(factors.len());
                if !magnitude.is_one() {
                    kept.push(Expr::Rational(magnitude));
                }
                kept.extend(rest.iter().cloned());
                match kept.len() {
                    0 => (true, Expr::one()),
                    1 => (true, kept.remove(0)),
                    _ => (true, Expr::Product(kept)),
                }
            }
            _ => (false, expr.clone()),
        },
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_move_into_sums() {
        let x = Expr::var("x");
        let expr = Expr::Sum(vec![
            Expr::Product(vec![Expr::integer(-2), x.clone()]),
            Expr::integer(-3),
        ]);
        assert_eq!(pretty(&expr), "-2*x - 3");
    }

    #[test]
    fn periodic_family() {
        let expr = Expr::Sum(vec![
            Expr::Product(vec![Expr::rational(1, 6), Expr::Pi]),
            Expr::Product(vec![Expr::integer(2), Expr::param("k"), Expr::Pi]),
        ]);
        assert_eq!(pretty(&expr), "1/6*pi + 2*k*pi");
    }

    #[test]
    fn radicals_and_powers() {
        let expr = Expr::Product(vec![
            Expr::rational(1, 2),
            Expr::pow(Expr::integer(2), Expr::rational(1, 2)),
        ]);
        assert_eq!(pretty(&expr), "1/2*2^(1/2)");
        assert_eq!(pretty(&Expr::sqrt(Expr::var("y"))), "sqrt(y)");
    }
}
