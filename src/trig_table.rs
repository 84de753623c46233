//! Exact sine/cosine values at multiples of π/12 and their inverses.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::expr::{Expr, TrigFn};
use crate::number::Rational;

/// Name of the integer parameter in periodic solution families.
pub const PERIOD_PARAM: &str = "k";

/// `num/den * sqrt(radicand)`, or a plain rational when there is no radicand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Exact {
    num: i64,
    den: i64,
    radicand: Option<i64>,
}

impl Exact {
    const fn rational(num: i64, den: i64) -> Self {
        Self { num, den, radicand: None }
    }

    const fn half_sqrt(sign: i64, radicand: i64) -> Self {
        Self { num: sign, den: 2, radicand: Some(radicand) }
    }

    /// Canonical simplified form.
    fn to_expr(self) -> Expr {
        let coeff = Expr::rational(self.num, self.den);
        match self.radicand {
            None => coeff,
            Some(r) => Expr::Product(vec![
                coeff,
                Expr::pow(Expr::integer(r), Expr::rational(1, 2)),
            ]),
        }
    }
}

const ZERO: Exact = Exact::rational(0, 1);
const ONE: Exact = Exact::rational(1, 1);
const MINUS_ONE: Exact = Exact::rational(-1, 1);
const HALF: Exact = Exact::rational(1, 2);
const MINUS_HALF: Exact = Exact::rational(-1, 2);
const SQRT2_HALF: Exact = Exact::half_sqrt(1, 2);
const SQRT3_HALF: Exact = Exact::half_sqrt(1, 3);
const MINUS_SQRT2_HALF: Exact = Exact::half_sqrt(-1, 2);
const MINUS_SQRT3_HALF: Exact = Exact::half_sqrt(-1, 3);

/// Sine at `index * π/12`, for the indices with a tabulated value.
fn sin_at(index: u32) -> Option<Exact> {
    Some(match index {
        0 | 12 => ZERO,
        2 | 10 => HALF,
        3 | 9 => SQRT2_HALF,
        4 | 8 => SQRT3_HALF,
        6 => ONE,
        14 | 22 => MINUS_HALF,
        15 | 21 => MINUS_SQRT2_HALF,
        16 | 20 => MINUS_SQRT3_HALF,
        18 => MINUS_ONE,
        _ => return None,
    })
}

/// Exact `sin` or `cos` of `multiple * π` when `multiple` is a multiple of 1/12
/// with a tabulated value.
pub fn sin_cos_value(func: TrigFn, multiple: &Rational) -> Option<Expr> {
    let den = multiple.denom();
    if den.sign() != num_bigint::Sign::Plus || !BigInt::from(12).is_multiple_of(den) {
        return None;
    }
    let twelfths = multiple.numer() * (BigInt::from(12) / den);
    let index = twelfths.mod_floor(&BigInt::from(24)).to_u32()?;
    let exact = match func {
        TrigFn::Sin => sin_at(index)?,
        TrigFn::Cos => sin_at((index + 6) % 24)?,
        _ => return None,
    };
    Some(exact.to_expr())
}

/// Offsets (in multiples of π) of the solutions of `sin(x) = v` and
/// `cos(x) = v` within one period, and the period in multiples of π.
struct Preimages {
    value: Exact,
    asin: (&'static [(i64, i64)], i64),
    acos: (&'static [(i64, i64)], i64),
}

const PREIMAGES: [Preimages; 9] = [
    Preimages { value: ZERO, asin: (&[(0, 1)], 1), acos: (&[(1, 2)], 1) },
    Preimages { value: HALF, asin: (&[(1, 6), (5, 6)], 2), acos: (&[(1, 3), (5, 3)], 2) },
    Preimages { value: ONE, asin: (&[(1, 2)], 2), acos: (&[(0, 1)], 2) },
    Preimages { value: MINUS_ONE, asin: (&[(3, 2)], 2), acos: (&[(1, 1)], 2) },
    Preimages { value: MINUS_HALF, asin: (&[(7, 6), (11, 6)], 2), acos: (&[(2, 3), (4, 3)], 2) },
    Preimages { value: SQRT2_HALF, asin: (&[(1, 4), (3, 4)], 2), acos: (&[(1, 4), (7, 4)], 2) },
    Preimages { value: SQRT3_HALF, asin: (&[(1, 3), (2, 3)], 2), acos: (&[(1, 6), (11, 6)], 2) },
    Preimages {
        value: MINUS_SQRT2_HALF,
        asin: (&[(5, 4), (7, 4)], 2),
        acos: (&[(3, 4), (5, 4)], 2),
    },
    Preimages {
        value: MINUS_SQRT3_HALF,
        asin: (&[(4, 3), (5, 3)], 2),
        acos: (&[(5, 6), (7, 6)], 2),
    },
];

/// Principal values of `asin`/`acos` at tabulated points.
const PRINCIPAL: [(Exact, (i64, i64), (i64, i64)); 9] = [
    (ZERO, (0, 1), (1, 2)),
    (HALF, (1, 6), (1, 3)),
    (ONE, (1, 2), (0, 1)),
    (MINUS_ONE, (-1, 2), (1, 1)),
    (MINUS_HALF, (-1, 6), (2, 3)),
    (SQRT2_HALF, (1, 4), (1, 4)),
    (SQRT3_HALF, (1, 3), (1, 6)),
    (MINUS_SQRT2_HALF, (-1, 4), (3, 4)),
    (MINUS_SQRT3_HALF, (-1, 3), (5, 6)),
];

fn pi_multiple(num: i64, den: i64) -> Expr {
    match (num, den) {
        (0, _) => Expr::zero(),
        (1, 1) => Expr::Pi,
        _ => Expr::Product(vec![Expr::rational(num, den), Expr::Pi]),
    }
}

/// Exact principal value of `asin(value)` or `acos(value)`.
pub fn principal_value(func: TrigFn, value: &Expr) -> Option<Expr> {
    let (_, asin, acos) = PRINCIPAL.iter().find(|(v, _, _)| v.to_expr() == *value)?;
    let (num, den) = match func {
        TrigFn::Asin => *asin,
        TrigFn::Acos => *acos,
        _ => return None,
    };
    Some(pi_multiple(num, den))
}

/// Every solution of `sin(x) = value` or `cos(x) = value` as families in the
/// integer parameter [`PERIOD_PARAM`]. Empty when `value` is not tabulated.
pub fn solution_families(func: TrigFn, value: &Expr) -> Vec<Expr> {
    let Some(entry) = PREIMAGES.iter().find(|p| p.value.to_expr() == *value) else {
        return Vec::new();
    };
    let (offsets, period) = match func {
        TrigFn::Sin => entry.asin,
        TrigFn::Cos => entry.acos,
        _ => return Vec::new(),
    };
    let k = Expr::param(PERIOD_PARAM);
    let periodic = match period {
        1 => Expr::Product(vec![Expr::Pi, k]),
        n => Expr::Product(vec![Expr::Pi, k, Expr::integer(n)]),
    };
    offsets
        .iter()
        .map(|&(num, den)| match num {
            0 => periodic.clone(),
            _ => Expr::Sum(vec![periodic.clone(), pi_multiple(num, den)]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_half(sign: i64, r: i64) -> Expr {
        Exact::half_sqrt(sign, r).to_expr()
    }

    #[test]
    fn forward_values() {
        assert_eq!(sin_cos_value(TrigFn::Sin, &Rational::new(1, 6)), Some(Expr::rational(1, 2)));
        assert_eq!(sin_cos_value(TrigFn::Cos, &Rational::new(1, 6)), Some(sqrt_half(1, 3)));
        assert_eq!(sin_cos_value(TrigFn::Sin, &Rational::new(-1, 4)), Some(sqrt_half(-1, 2)));
        assert_eq!(sin_cos_value(TrigFn::Cos, &Rational::new(1, 1)), Some(Expr::rational(-1, 1)));
        assert_eq!(sin_cos_value(TrigFn::Sin, &Rational::new(7, 2)), Some(Expr::rational(-1, 1)));
        assert_eq!(sin_cos_value(TrigFn::Sin, &Rational::new(1, 12)), None);
        assert_eq!(sin_cos_value(TrigFn::Sin, &Rational::new(1, 5)), None);
    }

    #[test]
    fn principal_values() {
        assert_eq!(
            principal_value(TrigFn::Asin, &Expr::rational(-1, 2)),
            Some(Expr::Product(vec![Expr::rational(-1, 6), Expr::Pi]))
        );
        assert_eq!(principal_value(TrigFn::Acos, &Expr::rational(-1, 1)), Some(Expr::Pi));
        assert_eq!(principal_value(TrigFn::Acos, &Expr::integer(2)), None);
    }

    #[test]
    fn families_for_half() {
        let families = solution_families(TrigFn::Sin, &Expr::rational(1, 2));
        assert_eq!(families.len(), 2);
        assert!(families.iter().all(Expr::contains_param));
        assert!(solution_families(TrigFn::Cos, &Expr::integer(3)).is_empty());
    }
}
