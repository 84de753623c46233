//! Explores solution branches of a system and reports verified results.

use std::collections::BTreeSet;

use crate::config::Context;
use crate::equation::Equation;
use crate::error::Result;
use crate::expr::Expr;
use crate::numeric::approximate;
use crate::simplify::Simplifier;
use crate::solver::branch::{SolutionBranch, SolutionResult, SolutionStep};

/// One complete assignment, in the order the variables were figured out.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub values: Vec<(String, Expr)>,
    pub steps: Vec<SolutionStep>,
    /// Filled only when numeric evaluation is enabled; `None` for values
    /// that still contain parameters or leave the reals.
    pub approximations: Vec<(String, Option<f64>)>,
}

impl Solution {
    pub fn value(&self, name: &str) -> Option<&Expr> {
        self.values.iter().find(|(var, _)| var == name).map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Solutions that hold when substituted into the original system.
    Verified(Vec<Solution>),
    /// Solutions found that could not be confirmed.
    Unverified(Vec<Solution>),
    /// Reasons the explored branches failed.
    Failed(Vec<String>),
    NoProgress,
}

impl SolveOutcome {
    pub fn solutions(&self) -> &[Solution] {
        match self {
            SolveOutcome::Verified(solutions) | SolveOutcome::Unverified(solutions) => solutions,
            SolveOutcome::Failed(_) | SolveOutcome::NoProgress => &[],
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, SolveOutcome::Verified(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOfEquations {
    equations: Vec<Equation>,
}

impl SystemOfEquations {
    pub fn new(equations: Vec<Equation>) -> Self {
        Self { equations }
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn variables(&self) -> BTreeSet<String> {
        self.equations.iter().flat_map(Equation::variables).collect()
    }

    /// Explores branches depth first, alternative solutions before
    /// alternative strategies. Only fatal errors are returned as `Err`.
    pub fn solve(&self, ctx: &Context) -> Result<SolveOutcome> {
        let s = Simplifier::new(ctx);
        let config = ctx.config();
        let mut major = vec![SolutionBranch::new(self.equations.clone())];
        let mut minor: Vec<SolutionBranch> = Vec::new();
        let mut found: Vec<(Vec<(String, Expr)>, Vec<SolutionStep>)> = Vec::new();
        let mut fails = Vec::new();
        let mut explored = 0usize;

        while let Some(mut branch) = minor.pop().or_else(|| major.pop()) {
            if explored >= config.max_branches_explored {
                tracing::warn!(target: "solver", explored, "branch_budget_exhausted");
                break;
            }
            explored += 1;
            tracing::debug!(target: "solver", explored, pending = branch.equations().len(), "branch_popped");

            loop {
                match branch.advance(&s) {
                    Ok(SolutionResult::Success { values, steps }) => {
                        if found.iter().all(|(known, _)| !same_assignment(known, &values)) {
                            found.push((values, steps));
                        }
                        break;
                    }
                    Ok(SolutionResult::MajorBranching(forks)) => {
                        tracing::debug!(target: "solver", major = forks.len(), "forked");
                        major.extend(forks);
                    }
                    Ok(SolutionResult::MinorBranching(forks)) => {
                        tracing::debug!(target: "solver", minor = forks.len(), "forked");
                        minor.extend(forks);
                    }
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(err) => {
                        tracing::debug!(target: "solver", %err, "branch_failed");
                        fails.push(err.to_string());
                        break;
                    }
                }
            }
        }

        let mut verified = Vec::new();
        let mut unverified = Vec::new();
        for (values, steps) in found {
            let solution = self.solution(values, steps, ctx);
            if self.verify(&solution, &s) {
                verified.push(solution);
            } else {
                unverified.push(solution);
            }
        }
        tracing::info!(
            target: "solver",
            explored,
            verified = verified.len(),
            unverified = unverified.len(),
            failed = fails.len(),
            "solve_finished"
        );

        if !verified.is_empty() {
            verified.truncate(config.max_solutions_returned);
            return Ok(SolveOutcome::Verified(verified));
        }
        if !unverified.is_empty() {
            tracing::warn!(target: "solver", count = unverified.len(), "solutions_not_verified");
            unverified.truncate(config.max_solutions_returned);
            return Ok(SolveOutcome::Unverified(unverified));
        }
        if !fails.is_empty() {
            fails.truncate(config.max_returned_fails);
            return Ok(SolveOutcome::Failed(fails));
        }
        Ok(SolveOutcome::NoProgress)
    }

    fn solution(&self, values: Vec<(String, Expr)>, steps: Vec<SolutionStep>, ctx: &Context) -> Solution {
        let approximations = if ctx.config().numeric_evaluation {
            values
                .iter()
                .map(|(name, value)| (name.clone(), approximate(value)))
                .collect()
        } else {
            Vec::new()
        };
        Solution { values, steps, approximations }
    }

    /// Substitutes the solution into every original equation.
    fn verify(&self, solution: &Solution, s: &Simplifier<'_>) -> bool {
        self.equations.iter().all(|equation| {
            match equation.substituted(&solution.values).holds(s) {
                Ok(holds) => holds,
                Err(err) => {
                    tracing::debug!(target: "solver", %equation, %err, "verification_failed");
                    false
                }
            }
        })
    }
}

/// Structural equality of two assignments, independent of figured-out order.
fn same_assignment(a: &[(String, Expr)], b: &[(String, Expr)]) -> bool {
    a.len() == b.len() && a.iter().all(|pair| b.contains(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_compare_without_order() {
        let a = vec![("x".to_string(), Expr::one()), ("y".to_string(), Expr::zero())];
        let b = vec![("y".to_string(), Expr::zero()), ("x".to_string(), Expr::one())];
        assert!(same_assignment(&a, &b));
        assert!(!same_assignment(&a, &b[..1]));
    }

    #[test]
    fn empty_system_has_the_empty_solution() {
        let ctx = Context::default();
        let outcome = SystemOfEquations::new(Vec::new()).solve(&ctx).expect("solves");
        assert_eq!(outcome.solutions().len(), 1);
        assert!(outcome.is_verified());
    }
}
