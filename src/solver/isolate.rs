//! Choosing and applying the next operation that moves a variable towards
//! isolation.

use crate::equation::Equation;
use crate::error::{Result, SolverError};
use crate::expr::{Expr, TrigFn};
use crate::polynomial::Polynomial;
use crate::simplify::Simplifier;
use crate::solver::operation::{Action, EquationOperation};
use crate::trig_table;

/// Decides what to do next to isolate `var`, based on which sides contain it.
pub fn isolate_step(eq: &Equation, var: &str) -> Result<EquationOperation> {
    let on_left = eq.left.contains_var(var);
    let on_right = eq.right.contains_var(var);
    match (on_left, on_right) {
        (true, false) => Ok(EquationOperation::SwapSides),
        (false, true) => isolate_side(&eq.right, var),
        (false, false) => Err(SolverError::NotIsolatable(format!("{var} does not occur in {eq}"))),
        (true, true) => Ok(cancel_matching(eq)),
    }
}

/// Both sides contain the variable: strip a shared outer structure, or move
/// everything to the variable side.
fn cancel_matching(eq: &Equation) -> EquationOperation {
    let step = |action, remainder: &Expr| EquationOperation::Step {
        action,
        remainder: remainder.clone(),
    };
    match (&eq.left, &eq.right) {
        (Expr::Pow(_, e1), Expr::Pow(base, e2)) if e1 == e2 => step(Action::Root(*e2.clone()), base),
        (Expr::Pow(b1, _), Expr::Pow(b2, exponent)) if b1 == b2 => {
            step(Action::Logarithm(*b2.clone()), exponent)
        }
        (Expr::Log(b1, _), Expr::Log(b2, argument)) if b1 == b2 => {
            step(Action::PowerOf(*b2.clone()), argument)
        }
        (_, right) => step(Action::Subtract(right.clone()), &Expr::zero()),
    }
}

/// The inverse of the outermost node of the side holding `var`.
fn isolate_side(side: &Expr, var: &str) -> Result<EquationOperation> {
    let step = |action, remainder: Expr| Ok(EquationOperation::Step { action, remainder });
    match side {
        Expr::Rational(_) | Expr::Variable(_) | Expr::Param(_) | Expr::Pi | Expr::E => Err(
            SolverError::NotIsolatable(format!("nothing to undo around {side}")),
        ),
        Expr::Neg(inner) => step(Action::FlipSign, *inner.clone()),
        Expr::Inv(inner) => step(Action::Invert, *inner.clone()),
        Expr::Sum(terms) => match split_free(terms, var) {
            Some((free, rest)) => step(Action::Subtract(free), Expr::Sum(rest)),
            None => Ok(EquationOperation::EvaluatePolynomial),
        },
        Expr::Product(factors) => match split_free(factors, var) {
            Some((free, rest)) => step(Action::Divide(free), Expr::Product(rest)),
            None => Err(SolverError::NotIsolatable(format!(
                "{var} occurs in every factor of {side}"
            ))),
        },
        Expr::Log(base, argument) => match (base.contains_var(var), argument.contains_var(var)) {
            (false, _) => step(Action::PowerOf(*base.clone()), *argument.clone()),
            (true, false) => step(Action::RootOf(*argument.clone()), *base.clone()),
            (true, true) => Err(SolverError::NotIsolatable(format!(
                "{var} occurs in both the base and the argument of {side}"
            ))),
        },
        Expr::Pow(base, exponent) => match (base.contains_var(var), exponent.contains_var(var)) {
            (true, false) => step(Action::Root(*exponent.clone()), *base.clone()),
            (false, _) => step(Action::Logarithm(*base.clone()), *exponent.clone()),
            (true, true) => Err(SolverError::NotIsolatable(format!(
                "{var} occurs in both the base and the exponent of {side}"
            ))),
        },
        Expr::Root(degree, radicand) => match (degree.contains_var(var), radicand.contains_var(var)) {
            (false, _) => step(Action::Power(*degree.clone()), *radicand.clone()),
            (true, false) => step(Action::Logarithm(*radicand.clone()), Expr::inv(*degree.clone())),
            (true, true) => Err(SolverError::NotIsolatable(format!(
                "{var} occurs in both the degree and the radicand of {side}"
            ))),
        },
        Expr::Trig(TrigFn::Sin | TrigFn::Cos, _) => Ok(EquationOperation::EvaluateTrigTable),
        Expr::Trig(func, argument) => step(Action::Apply(func.inverse()), *argument.clone()),
    }
}

/// First item free of `var`, and the remaining items.
fn split_free(items: &[Expr], var: &str) -> Option<(Expr, Vec<Expr>)> {
    let index = items.iter().position(|item| !item.contains_var(var))?;
    let mut rest = items.to_vec();
    let free = rest.remove(index);
    Some((free, rest))
}

/// Applies `op` to `eq`. Several equations mean several distinct solutions.
pub fn isolate_apply(
    eq: &Equation,
    var: &str,
    op: &EquationOperation,
    s: &Simplifier<'_>,
) -> Result<Vec<Equation>> {
    match op {
        EquationOperation::SwapSides => Ok(vec![eq.clone().swapped()]),
        EquationOperation::Step { action, remainder } => Ok(action
            .apply(eq.left.clone())
            .into_iter()
            .map(|left| Equation::new(left, remainder.clone()))
            .collect()),
        EquationOperation::EvaluatePolynomial => {
            let poly = Polynomial::from_equation(&eq.left, &eq.right, var, s)?;
            let roots = poly.solve(s)?;
            Ok(roots
                .into_iter()
                .map(|root| Equation::new(root, Expr::var(var)))
                .collect())
        }
        EquationOperation::EvaluateTrigTable => {
            let Expr::Trig(func @ (TrigFn::Sin | TrigFn::Cos), argument) = &eq.right else {
                return Err(SolverError::InvalidState(format!(
                    "trigonometric table lookup on {eq}"
                )));
            };
            let value = s.simplify_fully(eq.left.clone())?;
            let families = trig_table::solution_families(*func, &value);
            if families.is_empty() {
                let inverse = Expr::trig(func.inverse(), eq.left.clone());
                return Ok(vec![Equation::new(inverse, *argument.clone())]);
            }
            Ok(families
                .into_iter()
                .map(|family| Equation::new(family, *argument.clone()))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn sum_subtracts_first_free_term() {
        let eq = Equation::new(Expr::integer(5), Expr::Sum(vec![x(), Expr::integer(3)]));
        assert_eq!(
            isolate_step(&eq, "x"),
            Ok(EquationOperation::Step {
                action: Action::Subtract(Expr::integer(3)),
                remainder: Expr::Sum(vec![x()]),
            })
        );
    }

    #[test]
    fn variable_on_the_left_swaps() {
        let eq = Equation::new(x(), Expr::integer(1));
        assert_eq!(isolate_step(&eq, "x"), Ok(EquationOperation::SwapSides));
    }

    #[test]
    fn variable_base_and_exponent_is_rejected() {
        let eq = Equation::new(Expr::integer(4), Expr::pow(x(), x()));
        assert!(matches!(isolate_step(&eq, "x"), Err(SolverError::NotIsolatable(_))));
    }

    #[test]
    fn root_degree_takes_logarithm() {
        let eq = Equation::new(Expr::integer(2), Expr::root(x(), Expr::integer(8)));
        assert_eq!(
            isolate_step(&eq, "x"),
            Ok(EquationOperation::Step {
                action: Action::Logarithm(Expr::integer(8)),
                remainder: Expr::inv(x()),
            })
        );
    }

    #[test]
    fn unmatched_cosine_uses_arccosine() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let eq = Equation::new(Expr::rational(1, 3), Expr::cos(x()));
        let out = isolate_apply(&eq, "x", &EquationOperation::EvaluateTrigTable, &s).expect("applies");
        assert_eq!(out, vec![Equation::new(Expr::trig(TrigFn::Acos, Expr::rational(1, 3)), x())]);
    }

    #[test]
    fn matching_exponents_take_root() {
        let eq = Equation::new(
            Expr::pow(x(), Expr::integer(2)),
            Expr::pow(Expr::Sum(vec![x(), Expr::one()]), Expr::integer(2)),
        );
        assert_eq!(
            isolate_step(&eq, "x"),
            Ok(EquationOperation::Step {
                action: Action::Root(Expr::integer(2)),
                remainder: Expr::Sum(vec![x(), Expr::one()]),
            })
        );
    }
}
