use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Result, SolverError};
use crate::expr::Expr;
use crate::simplify::{Simplifier, substitute_all};

/// `left = right`. While isolating, the variable is kept on the right and
/// every operation rewrites the left.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Equation {
    pub left: Expr,
    pub right: Expr,
}

impl Equation {
    pub fn new(left: Expr, right: Expr) -> Self {
        Self { left, right }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = self.left.variables();
        vars.extend(self.right.variables());
        vars
    }

    pub fn contains_var(&self, var: &str) -> bool {
        self.left.contains_var(var) || self.right.contains_var(var)
    }

    pub fn swapped(self) -> Self {
        Self::new(self.right, self.left)
    }

    pub fn substituted(&self, bindings: &[(String, Expr)]) -> Self {
        Self::new(substitute_all(&self.left, bindings), substitute_all(&self.right, bindings))
    }

    pub fn simplified(self, s: &Simplifier<'_>) -> Result<Self> {
        Ok(Self::new(s.simplify_fully(self.left)?, s.simplify_fully(self.right)?))
    }

    /// Either one side is a bare variable absent from the other, or neither
    /// side has variables left.
    pub fn is_variable_isolated(&self) -> bool {
        bare_variable(&self.right, &self.left).is_some()
            || bare_variable(&self.left, &self.right).is_some()
            || (self.left.is_real_number() && self.right.is_real_number())
    }

    /// The `(variable, value)` pair of an isolated equation, or `None` when
    /// the equation is closed and only true or false.
    pub fn calculated_value(&self) -> Result<Option<(String, Expr)>> {
        if let Some(name) = bare_variable(&self.right, &self.left) {
            return Ok(Some((name.to_string(), self.left.clone())));
        }
        if let Some(name) = bare_variable(&self.left, &self.right) {
            return Ok(Some((name.to_string(), self.right.clone())));
        }
        if self.left.is_real_number() && self.right.is_real_number() {
            return Ok(None);
        }
        Err(SolverError::NotIsolatable(format!("no variable is isolated in {self}")))
    }

    /// Whether the fully simplified sides agree, either structurally or by
    /// a difference that simplifies to zero.
    pub fn holds(&self, s: &Simplifier<'_>) -> Result<bool> {
        let left = s.simplify_fully(self.left.clone())?;
        let right = s.simplify_fully(self.right.clone())?;
        if left == right {
            return Ok(true);
        }
        let difference = s.simplify_fully(Expr::sub(left, right))?;
        Ok(difference.is_zero())
    }
}

fn bare_variable<'e>(side: &'e Expr, other: &Expr) -> Option<&'e str> {
    side.as_variable().filter(|name| !other.contains_var(name))
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;

    #[test]
    fn isolated_forms() {
        let x = Expr::var("x");
        assert!(Equation::new(Expr::integer(2), x.clone()).is_variable_isolated());
        assert!(Equation::new(Expr::integer(1), Expr::Pi).is_variable_isolated());
        assert!(!Equation::new(x.clone(), Expr::Sum(vec![x.clone(), Expr::one()])).is_variable_isolated());
    }

    #[test]
    fn calculated_value_reads_either_side() {
        let eq = Equation::new(Expr::var("y"), Expr::integer(4));
        assert_eq!(eq.calculated_value(), Ok(Some(("y".into(), Expr::integer(4)))));
        let closed = Equation::new(Expr::zero(), Expr::one());
        assert_eq!(closed.calculated_value(), Ok(None));
    }

    #[test]
    fn holds_after_simplification() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let eq = Equation::new(
            Expr::Sum(vec![Expr::integer(2), Expr::integer(3)]),
            Expr::integer(5),
        );
        assert_eq!(eq.holds(&s), Ok(true));
        assert_eq!(Equation::new(Expr::zero(), Expr::one()).holds(&s), Ok(false));
    }
}
