//! Depth-bounded term rewriting towards a canonical form, plus substitution.
//!
//! A pass rewrites bottom-up and returns the reduced tree; the full variant
//! repeats passes until nothing changes. Recursion depth travels as an
//! argument, so one [`Simplifier`] can serve any number of branches.

mod power;
mod rules;
mod substitute;
mod trig;

pub use substitute::{substitute, substitute_all};

use crate::config::Context;
use crate::error::{Result, SolverError};
use crate::expr::Expr;

/// Outcome of a single simplification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    pub changed: bool,
    pub expr: Expr,
}

#[derive(Debug, Clone, Copy)]
pub struct Simplifier<'a> {
    ctx: &'a Context,
}

impl<'a> Simplifier<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    /// One bottom-up pass, reporting whether anything changed.
    pub fn simplify_once(&self, expr: &Expr) -> Result<Simplified> {
        let reduced = self.visit(expr.clone(), 0)?;
        Ok(Simplified {
            changed: reduced != *expr,
            expr: reduced,
        })
    }

    /// One bottom-up pass.
    pub fn simplify(&self, expr: Expr) -> Result<Expr> {
        self.visit(expr, 0)
    }

    /// Passes until a pass returns a structurally identical tree.
    pub fn simplify_fully(&self, expr: Expr) -> Result<Expr> {
        let passes = self.ctx.config().max_simplification_passes;
        let mut current = expr;
        for _ in 0..passes {
            let next = self.visit(current.clone(), 0)?;
            if next == current {
                return Ok(current);
            }
            current = next;
        }
        tracing::trace!(target: "simplify", passes, expr = %current, "no_fixpoint");
        Err(SolverError::SimplificationDidNotConverge { passes })
    }

    pub(crate) fn descend(&self, depth: usize) -> Result<usize> {
        let limit = self.ctx.config().max_depth_for_simplification;
        let next = depth + 1;
        if next >= limit {
            tracing::trace!(target: "simplify", limit, "depth_exceeded");
            return Err(SolverError::SimplificationDepthExceeded { limit });
        }
        Ok(next)
    }

    pub(crate) fn visit(&self, expr: Expr, depth: usize) -> Result<Expr> {
        match expr {
            Expr::Rational(r) => Ok(Expr::Rational(r.cancelled(self.ctx))),
            Expr::Variable(_) | Expr::Param(_) | Expr::Pi | Expr::E => Ok(expr),
            Expr::Neg(inner) => {
                let inner = self.visit(*inner, self.descend(depth)?)?;
                match inner {
                    Expr::Rational(r) => Ok(Expr::Rational(r.neg())),
                    other => rules::combine_product(self, vec![other, Expr::integer(-1)], depth),
                }
            }
            Expr::Inv(inner) => {
                let inner = self.visit(*inner, self.descend(depth)?)?;
                match inner {
                    Expr::Rational(r) => Ok(Expr::Rational(r.recip()?.cancelled(self.ctx))),
                    other => power::combine_pow(self, other, Expr::integer(-1), depth),
                }
            }
            Expr::Sum(terms) => {
                let terms = self.visit_all(terms, self.descend(depth)?)?;
                rules::combine_sum(self, terms, depth)
            }
            Expr::Product(factors) => {
                let factors = self.visit_all(factors, self.descend(depth)?)?;
                rules::combine_product(self, factors, depth)
            }
            Expr::Log(base, argument) => {
                let inner = self.descend(depth)?;
                let base = self.visit(*base, inner)?;
                let argument = self.visit(*argument, inner)?;
                power::combine_log(self, base, argument, depth)
            }
            Expr::Pow(base, exponent) => {
                let inner = self.descend(depth)?;
                let base = self.visit(*base, inner)?;
                let exponent = self.visit(*exponent, inner)?;
                power::combine_pow(self, base, exponent, depth)
            }
            Expr::Root(degree, radicand) => {
                let inner = self.descend(depth)?;
                let degree = self.visit(*degree, inner)?;
                let radicand = self.visit(*radicand, inner)?;
                power::combine_root(self, degree, radicand, depth)
            }
            Expr::Trig(func, argument) => {
                let argument = self.visit(*argument, self.descend(depth)?)?;
                trig::combine_trig(self, func, argument, depth)
            }
        }
    }

    fn visit_all(&self, items: Vec<Expr>, depth: usize) -> Result<Vec<Expr>> {
        items.into_iter().map(|e| self.visit(e, depth)).collect()
    }
}

/// Single pass with a throwaway [`Simplifier`].
pub fn simplify(expr: Expr, ctx: &Context) -> Result<Expr> {
    Simplifier::new(ctx).simplify(expr)
}

/// Fixpoint simplification with a throwaway [`Simplifier`].
pub fn simplify_fully(expr: Expr, ctx: &Context) -> Result<Expr> {
    Simplifier::new(ctx).simplify_fully(expr)
}
