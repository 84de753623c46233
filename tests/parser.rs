use eqsolve::{Equation, Expr, SolverError, TrigFn, parse_equation, parse_expr};

fn x() -> Expr {
    Expr::var("x")
}

#[test]
fn arithmetic_structure() {
    let cases = vec![
        ("x + 3", Expr::Sum(vec![x(), Expr::integer(3)])),
        ("x - 3", Expr::Sum(vec![x(), Expr::neg(Expr::integer(3))])),
        ("2*x/4", Expr::Product(vec![Expr::integer(2), x(), Expr::inv(Expr::integer(4))])),
        ("1/2", Expr::rational(1, 2)),
        ("x^2^3", Expr::pow(x(), Expr::pow(Expr::integer(2), Expr::integer(3)))),
        ("2^-x", Expr::pow(Expr::integer(2), Expr::neg(x()))),
        ("(x + 1)*pi", Expr::Product(vec![Expr::Sum(vec![x(), Expr::one()]), Expr::Pi])),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_expr(input), Ok(expected), "parse of {input}");
    }
}

#[test]
fn functions_and_aliases() {
    let cases = vec![
        ("sin(x)", Expr::sin(x())),
        ("tg(x)", Expr::trig(TrigFn::Tan, x())),
        ("arctg(x)", Expr::trig(TrigFn::Atan, x())),
        ("arccotg(x)", Expr::trig(TrigFn::Acot, x())),
        ("log(2, x)", Expr::log(Expr::integer(2), x())),
        ("ln(x)", Expr::log(Expr::E, x())),
        ("log10(x)", Expr::log(Expr::integer(10), x())),
        ("sqrt(x)", Expr::root(Expr::integer(2), x())),
        ("cbrt(x)", Expr::root(Expr::integer(3), x())),
        ("root(4, x)", Expr::root(Expr::integer(4), x())),
        ("pow(x, 3)", Expr::pow(x(), Expr::integer(3))),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_expr(input), Ok(expected), "parse of {input}");
    }
}

#[test]
fn equations_split_on_equals() {
    assert_eq!(
        parse_equation("x + 3 = 5"),
        Ok(Equation::new(Expr::Sum(vec![x(), Expr::integer(3)]), Expr::integer(5)))
    );
}

#[test]
fn malformed_input_is_a_parse_error() {
    for input in ["x +", "sin(x, 2)", "(x", "x = "] {
        let result = parse_equation(input).map(|_| ()).or_else(|_| parse_expr(input).map(|_| ()));
        assert!(
            matches!(result, Err(SolverError::Parse(_))),
            "{input} should not parse"
        );
    }
}
