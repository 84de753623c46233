//! Floating-point approximation of closed expressions.

use num_traits::ToPrimitive;

use crate::expr::{Expr, TrigFn};

/// Approximate value of a closed expression. `None` for variables,
/// parameters and anything that leaves the reals.
pub fn approximate(expr: &Expr) -> Option<f64> {
    let value = match expr {
        Expr::Rational(r) => r.to_big_rational()?.to_f64()?,
        Expr::Variable(_) | Expr::Param(_) => return None,
        Expr::Pi => std::f64::consts::PI,
        Expr::E => std::f64::consts::E,
        Expr::Neg(inner) => -approximate(inner)?,
        Expr::Inv(inner) => 1.0 / approximate(inner)?,
        Expr::Sum(terms) => terms.iter().map(approximate).sum::<Option<f64>>()?,
        Expr::Product(factors) => factors.iter().map(approximate).product::<Option<f64>>()?,
        Expr::Log(base, argument) => approximate(argument)?.ln() / approximate(base)?.ln(),
        Expr::Pow(base, exponent) => power(approximate(base)?, exponent)?,
        Expr::Root(degree, radicand) => root(approximate(radicand)?, approximate(degree)?)?,
        Expr::Trig(func, argument) => trig(*func, approximate(argument)?),
    };
    value.is_finite().then_some(value)
}

/// Real power; a negative base only works with a rational exponent whose
/// denominator is odd.
fn power(base: f64, exponent: &Expr) -> Option<f64> {
    if base >= 0.0 {
        return Some(base.powf(approximate(exponent)?));
    }
    let r = exponent.as_rational()?;
    let numer = r.numer().to_i64()?;
    let denom = r.denom().to_i64()?;
    if denom % 2 == 0 {
        return None;
    }
    let magnitude = (-base).powf(numer as f64 / denom as f64);
    Some(if numer % 2 == 0 { magnitude } else { -magnitude })
}

fn root(radicand: f64, degree: f64) -> Option<f64> {
    if radicand >= 0.0 {
        return Some(radicand.powf(1.0 / degree));
    }
    let odd_integer = degree.fract() == 0.0 && (degree as i64) % 2 != 0;
    odd_integer.then(|| -(-radicand).powf(1.0 / degree))
}

fn trig(func: TrigFn, x: f64) -> f64 {
    match func {
        TrigFn::Sin => x.sin(),
        TrigFn::Cos => x.cos(),
        TrigFn::Tan => x.tan(),
        TrigFn::Cot => 1.0 / x.tan(),
        TrigFn::Sec => 1.0 / x.cos(),
        TrigFn::Csc => 1.0 / x.sin(),
        TrigFn::Asin => x.asin(),
        TrigFn::Acos => x.acos(),
        TrigFn::Atan => x.atan(),
        TrigFn::Acot => (1.0 / x).atan(),
        TrigFn::Asec => (1.0 / x).acos(),
        TrigFn::Acsc => (1.0 / x).asin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn constants_and_radicals() {
        let value = approximate(&Expr::Product(vec![
            Expr::rational(1, 2),
            Expr::pow(Expr::integer(2), Expr::rational(1, 2)),
        ]))
        .expect("real");
        assert!(close(value, std::f64::consts::FRAC_1_SQRT_2));
        let cube_root = approximate(&Expr::root(Expr::integer(3), Expr::integer(-8))).expect("real");
        assert!(close(cube_root, -2.0));
    }

    #[test]
    fn free_symbols_have_no_value() {
        assert_eq!(approximate(&Expr::var("x")), None);
        assert_eq!(approximate(&Expr::Product(vec![Expr::Pi, Expr::param("k")])), None);
        assert_eq!(approximate(&Expr::pow(Expr::integer(-4), Expr::rational(1, 2))), None);
    }
}
