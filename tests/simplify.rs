use eqsolve::{Config, Context, Expr, SolverError, TrigFn, parse_expr, simplify_fully};
use proptest::prelude::*;

fn simplified(input: &str) -> Expr {
    let expr = parse_expr(input).expect("parse input");
    simplify_fully(expr, &Context::default()).expect("simplify input")
}

fn expect_same(input: &str, expected: &str) {
    let actual = simplified(input);
    let expected_expr = simplified(expected);
    assert_eq!(
        actual, expected_expr,
        "simplification mismatch for {input}: got {actual}, expected {expected_expr}"
    );
}

#[test]
fn exact_values() {
    let cases = vec![
        ("log(2, 32)", Expr::integer(5)),
        ("2/4", Expr::rational(1, 2)),
        ("sqrt(9)", Expr::integer(3)),
        ("(-8)^(1/3)", Expr::integer(-2)),
        ("2^-2", Expr::rational(1, 4)),
        ("sin(pi/6)", Expr::rational(1, 2)),
        ("cos(pi)", Expr::integer(-1)),
        ("1/2 + 1/3", Expr::rational(5, 6)),
    ];
    for (input, expected) in cases {
        assert_eq!(simplified(input), expected, "value of {input}");
    }
}

#[test]
fn like_terms_collect() {
    let cases = vec![
        ("2*x*3", "6*x"),
        ("x + 0", "x"),
        ("x*1", "x"),
        ("x + x", "2*x"),
        ("2*x + 3 + x", "3*x + 3"),
        ("x*x", "x^2"),
        ("x^2*x^3", "x^5"),
        ("x - x", "0"),
        ("0*y + 5", "5"),
    ];
    for (input, expected) in cases {
        expect_same(input, expected);
    }
}

#[test]
fn tangent_is_sine_over_cosine() {
    expect_same("tan(x)", "sin(x)/cos(x)");
}

#[test]
fn inverse_sine_of_table_value() {
    let expected = Expr::Product(vec![Expr::rational(1, 6), Expr::Pi]);
    assert_eq!(simplified("asin(1/2)"), expected);
}

#[test]
fn unknown_inverse_stays_symbolic() {
    let expr = simplified("asin(1/3)");
    assert_eq!(expr, Expr::trig(TrigFn::Asin, Expr::rational(1, 3)));
}

#[test]
fn division_by_zero_is_reported() {
    let expr = parse_expr("1/(2 - 2)").expect("parse input");
    assert_eq!(
        simplify_fully(expr, &Context::default()),
        Err(SolverError::DivisionByZero)
    );
}

fn simplified_with(input: &str, config: Config) -> Result<Expr, SolverError> {
    let ctx = Context::new(config).expect("valid config");
    simplify_fully(parse_expr(input).expect("parse input"), &ctx)
}

#[test]
fn shallow_depth_limit_is_reported() {
    let config = Config {
        max_depth_for_simplification: 2,
        ..Config::default()
    };
    assert_eq!(
        simplified_with("sin(x + 1)", config),
        Err(SolverError::SimplificationDepthExceeded { limit: 2 })
    );
}

#[test]
fn expansion_respects_term_limit() {
    let expanded = simplified("(x + 1)*(y + 1)");
    assert!(
        matches!(&expanded, Expr::Sum(terms) if terms.len() == 4),
        "expected four terms, got {expanded}"
    );

    let config = Config {
        max_resulting_terms_from_expansion: 3,
        ..Config::default()
    };
    let kept = simplified_with("(x + 1)*(y + 1)", config).expect("simplifies");
    assert!(
        matches!(&kept, Expr::Product(factors)
            if factors.len() == 2 && factors.iter().all(|f| matches!(f, Expr::Sum(_)))),
        "expected an unexpanded product, got {kept}"
    );
}

#[test]
fn sum_angle_expansion_respects_term_limit() {
    let expanded = simplified("sin(x + y)");
    assert!(matches!(expanded, Expr::Sum(_)), "expected expansion, got {expanded}");

    let config = Config {
        max_terms_for_trigonometric_sum_expansion: 1,
        ..Config::default()
    };
    let kept = simplified_with("sin(x + y)", config).expect("simplifies");
    assert!(
        matches!(&kept, Expr::Trig(TrigFn::Sin, argument) if matches!(**argument, Expr::Sum(_))),
        "expected sin of a sum, got {kept}"
    );
}

fn small_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (-6i64..7).prop_map(Expr::integer),
        Just(Expr::var("x")),
        Just(Expr::var("y")),
        Just(Expr::Pi),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Expr::Sum),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Expr::Product),
            (inner.clone(), 0i64..4).prop_map(|(base, e)| Expr::pow(base, Expr::integer(e))),
            inner.clone().prop_map(Expr::neg),
            inner.prop_map(Expr::sin),
        ]
    })
}

proptest! {
    #[test]
    fn full_simplification_is_idempotent(expr in small_expr()) {
        let ctx = Context::default();
        if let Ok(once) = simplify_fully(expr, &ctx) {
            let twice = simplify_fully(once.clone(), &ctx);
            prop_assert_eq!(twice, Ok(once));
        }
    }
}
