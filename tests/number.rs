use eqsolve::number::{
    cancel_fraction, decompose, decompose_fully, partial_root, partial_root_full,
    power_and_remainder,
};
use eqsolve::{Context, Expr, Rational, SolverError};
use num_bigint::BigInt;
use num_integer::Integer;
use proptest::prelude::*;

fn power(base: Rational, value: Rational) -> (i64, Rational) {
    power_and_remainder(&base, &value, &Context::default())
}

#[test]
fn power_and_remainder_examples() {
    let cases = vec![
        ((3, 1), (9, 1), 2, (1, 1)),
        ((3, 1), (18, 1), 2, (2, 1)),
        ((2, 1), (1, 8), -3, (1, 1)),
        ((5, 1), (7, 1), 0, (7, 1)),
    ];
    for (base, value, expected_power, expected_rest) in cases {
        let (p, rest) = power(Rational::new(base.0, base.1), Rational::new(value.0, value.1));
        assert_eq!(p, expected_power, "power of {base:?} in {value:?}");
        assert_eq!(
            rest,
            Rational::new(expected_rest.0, expected_rest.1),
            "remainder of {base:?} in {value:?}"
        );
    }
}

#[test]
fn trivial_bases_do_not_loop() {
    let value = Rational::new(12, 1);
    assert_eq!(power(Rational::one(), value.clone()), (0, value.clone()));
    assert_eq!(power(Rational::new(-1, 1), value.clone()), (0, value.clone()));
    assert_eq!(power(Rational::zero(), value.clone()), (0, value));
}

#[test]
fn large_prime_factors_stay_composite() {
    let ctx = Context::default();
    // 103 is above the default bound of 101
    let factors = decompose_fully(&BigInt::from(2 * 103 * 103), &ctx);
    assert_eq!(factors, vec![BigInt::from(2), BigInt::from(103 * 103)]);
}

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().map(|&v| BigInt::from(v)).collect()
}

#[test]
fn decomposition_special_cases() {
    let ctx = Context::default();
    let cases: Vec<(i64, u32, Vec<i64>)> = vec![
        (0, u32::MAX, vec![0]),
        (1, u32::MAX, vec![1]),
        (-1, u32::MAX, vec![-1]),
        (-12, u32::MAX, vec![-1, 2, 2, 3]),
        (12, 2, vec![2, 2, 3]),
        (90, 3, vec![2, 3, 3, 5]),
    ];
    for (n, max_factor, expected) in cases {
        assert_eq!(
            decompose(&BigInt::from(n), max_factor, &ctx),
            ints(&expected),
            "decomposition of {n} with factors up to {max_factor}"
        );
    }
}

#[test]
fn cancellation_special_cases() {
    let ctx = Context::default();
    let cases = vec![
        ((0, 0), (0, 0)),
        ((5, 0), (1, 0)),
        ((0, 7), (0, 1)),
        ((4, 4), (1, 1)),
        ((-4, 4), (-1, 1)),
        ((6, -4), (-3, 2)),
        ((-10, -15), (2, 3)),
    ];
    for ((n, d), (en, ed)) in cases {
        assert_eq!(
            cancel_fraction(&BigInt::from(n), &BigInt::from(d), &ctx),
            (BigInt::from(en), BigInt::from(ed)),
            "cancelling {n}/{d}"
        );
    }
}

#[test]
fn partial_root_cases() {
    let ctx = Context::default();
    let cases = vec![
        ((2, 12), (2, 3)),
        ((3, 16), (2, 2)),
        ((-2, 12), (2, 3)),
        ((1, 7), (7, 1)),
        ((2, 0), (0, 0)),
        ((2, 103 * 103), (1, 103 * 103)),
    ];
    for ((root, radicand), (whole, rest)) in cases {
        assert_eq!(
            partial_root(&BigInt::from(root), &BigInt::from(radicand), &ctx),
            Ok((BigInt::from(whole), BigInt::from(rest))),
            "root {root} of {radicand}"
        );
    }
    assert_eq!(
        partial_root(&BigInt::from(0), &BigInt::from(4), &ctx),
        Err(SolverError::ZeroDegreeRoot)
    );
}

#[test]
fn partial_root_full_cases() {
    let ctx = Context::default();
    let radical = |radicand: i64, numer: i64, denom: i64| {
        Expr::pow(Expr::integer(radicand), Expr::rational(numer, denom))
    };
    let cases = vec![
        ((2, 1, 4), Expr::integer(2)),
        ((2, -1, 4), Expr::rational(1, 2)),
        ((2, -3, 4), Expr::rational(1, 8)),
        ((2, 0, 5), Expr::one()),
        ((2, 1, 8), Expr::Product(vec![Expr::integer(2), radical(2, 1, 2)])),
        ((2, -1, 8), Expr::Product(vec![Expr::rational(1, 2), radical(2, -1, 2)])),
        ((3, 2, 5), radical(25, 1, 3)),
        // 5 is above the sub-root bound, so the root stays whole
        ((5, 1, 2), radical(2, 1, 5)),
    ];
    for ((root, power, radicand), expected) in cases {
        let actual = partial_root_full(
            &BigInt::from(root),
            &BigInt::from(power),
            &BigInt::from(radicand),
            &ctx,
        );
        assert_eq!(actual, Ok(expected), "{radicand}^({power}/{root})");
    }
    let zero = BigInt::from(0);
    let one = BigInt::from(1);
    assert_eq!(
        partial_root_full(&zero, &one, &BigInt::from(4), &ctx),
        Err(SolverError::ZeroDegreeRoot)
    );
    assert_eq!(
        partial_root_full(&BigInt::from(2), &BigInt::from(-1), &zero, &ctx),
        Err(SolverError::DivisionByZero)
    );
}

proptest! {
    #[test]
    fn decomposition_multiplies_back(n in -1_000_000i64..1_000_000) {
        let ctx = Context::default();
        let n = BigInt::from(n);
        let product: BigInt = decompose_fully(&n, &ctx).iter().product();
        prop_assert_eq!(product, n);
    }

    #[test]
    fn cancellation_leaves_no_small_common_prime(
        numer in -100_000i64..100_000,
        denom in 1i64..100_000,
    ) {
        let ctx = Context::default();
        let (n, d) = cancel_fraction(&BigInt::from(numer), &BigInt::from(denom), &ctx);
        for p in ctx.primes() {
            let p = BigInt::from(*p);
            prop_assert!(
                !(n.is_multiple_of(&p) && d.is_multiple_of(&p)) || n == BigInt::from(0),
                "{} divides both {} and {}", p, n, d
            );
        }
    }
}
