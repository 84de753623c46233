use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    let rec = |e: &Expr| substitute(e, var, replacement);
    match expr {
        Expr::Variable(name) if name == var => replacement.clone(),
        Expr::Variable(_) | Expr::Rational(_) | Expr::Param(_) | Expr::Pi | Expr::E => {
            expr.clone()
        }
        Expr::Neg(a) => Expr::Neg(rec(a).boxed()),
        Expr::Inv(a) => Expr::Inv(rec(a).boxed()),
        Expr::Sum(terms) => Expr::Sum(terms.iter().map(rec).collect()),
        Expr::Product(factors) => Expr::Product(factors.iter().map(rec).collect()),
        Expr::Log(a, b) => Expr::Log(rec(a).boxed(), rec(b).boxed()),
        Expr::Pow(a, b) => Expr::Pow(rec(a).boxed(), rec(b).boxed()),
        Expr::Root(a, b) => Expr::Root(rec(a).boxed(), rec(b).boxed()),
        Expr::Trig(func, a) => Expr::Trig(*func, rec(a).boxed()),
    }
}

/// Applies `bindings` in order, so later values may refer to earlier names.
pub fn substitute_all(expr: &Expr, bindings: &[(String, Expr)]) -> Expr {
    bindings
        .iter()
        .fold(expr.clone(), |acc, (var, value)| substitute(&acc, var, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let x = Expr::var("x");
        let expr = Expr::Sum(vec![x.clone(), Expr::sin(x.clone()), Expr::var("y")]);
        let out = substitute(&expr, "x", &Expr::Pi);
        assert_eq!(out, Expr::Sum(vec![Expr::Pi, Expr::sin(Expr::Pi), Expr::var("y")]));
    }

    #[test]
    fn bindings_apply_in_order() {
        let bindings = vec![
            ("x".to_string(), Expr::var("y")),
            ("y".to_string(), Expr::integer(2)),
        ];
        assert_eq!(substitute_all(&Expr::var("x"), &bindings), Expr::integer(2));
    }
}
