use std::fmt;

use crate::expr::{Expr, TrigFn};

/// Operation applied to the value side while isolating a variable. The
/// parameter is the expression the variable side is being stripped of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// `value - p`
    Subtract(Expr),
    /// `value / p`
    Divide(Expr),
    /// `value ^ p`
    Power(Expr),
    /// `p ^ value`
    PowerOf(Expr),
    /// `root(p, value)`
    Root(Expr),
    /// `root(value, p)`
    RootOf(Expr),
    /// `log(p, value)`
    Logarithm(Expr),
    /// `-value`
    FlipSign,
    /// `1 / value`
    Invert,
    /// `f(value)`
    Apply(TrigFn),
}

impl Action {
    /// New value sides. Even integer roots yield both signs.
    pub fn apply(&self, value: Expr) -> Vec<Expr> {
        match self {
            Action::Subtract(p) => vec![Expr::sub(value, p.clone())],
            Action::Divide(p) => vec![Expr::div(value, p.clone())],
            Action::Power(p) => vec![Expr::pow(value, p.clone())],
            Action::PowerOf(p) => vec![Expr::pow(p.clone(), value)],
            Action::Root(p) => {
                let root = Expr::root(p.clone(), value);
                if is_even_integer(p) {
                    vec![root.clone(), Expr::neg(root)]
                } else {
                    vec![root]
                }
            }
            Action::RootOf(p) => vec![Expr::root(value, p.clone())],
            Action::Logarithm(p) => vec![Expr::log(p.clone(), value)],
            Action::FlipSign => vec![Expr::neg(value)],
            Action::Invert => vec![Expr::inv(value)],
            Action::Apply(func) => vec![Expr::trig(*func, value)],
        }
    }
}

fn is_even_integer(expr: &Expr) -> bool {
    use num_integer::Integer;
    matches!(expr.as_rational(), Some(r) if r.is_integer() && r.numer().is_even() && !r.is_zero())
}

/// One isolation step, as chosen by [`crate::solver::isolate_step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EquationOperation {
    /// Apply `action` to the value side; the variable side becomes `remainder`.
    Step { action: Action, remainder: Expr },
    EvaluatePolynomial,
    EvaluateTrigTable,
    SwapSides,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Subtract(p) => write!(f, "|-({p})"),
            Action::Divide(p) => write!(f, "|/({p})"),
            Action::Power(p) => write!(f, "|pow([], {p})"),
            Action::PowerOf(p) => write!(f, "|pow({p}, [])"),
            Action::Root(p) => write!(f, "|root({p}, [])"),
            Action::RootOf(p) => write!(f, "|root([], {p})"),
            Action::Logarithm(p) => write!(f, "|log({p}, [])"),
            Action::FlipSign => write!(f, "|-[]"),
            Action::Invert => write!(f, "|1/[]"),
            Action::Apply(func) => write!(f, "|{}([])", func.name()),
        }
    }
}

impl fmt::Display for EquationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationOperation::Step { action, .. } => write!(f, "{action}"),
            EquationOperation::EvaluatePolynomial => write!(f, "evaluate polynomial"),
            EquationOperation::EvaluateTrigTable => {
                write!(f, "evaluate inverse trigonometric function")
            }
            EquationOperation::SwapSides => write!(f, "swap sides"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_roots_fork() {
        let out = Action::Root(Expr::integer(2)).apply(Expr::integer(9));
        let root = Expr::root(Expr::integer(2), Expr::integer(9));
        assert_eq!(out, vec![root.clone(), Expr::neg(root)]);
        assert_eq!(Action::Root(Expr::integer(3)).apply(Expr::integer(8)).len(), 1);
    }

    #[test]
    fn display_marks_value_side() {
        assert_eq!(Action::PowerOf(Expr::integer(2)).to_string(), "|pow(2, [])");
        assert_eq!(EquationOperation::SwapSides.to_string(), "swap sides");
    }
}
