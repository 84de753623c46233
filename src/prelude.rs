//! String-based convenience API for quick experimentation.

use crate::config::{Config, Context};
use crate::error::Result;
use crate::expr::Expr;
use crate::format::{pretty, pretty_solve_result};
use crate::parser::{parse_equation, parse_expr};
use crate::simplify::simplify_fully;
use crate::solver::{SolveOutcome, SystemOfEquations};

pub use crate::equation::Equation;
pub use crate::parser::parse_expr as parse;

pub fn simplify(input: &str) -> Result<Expr> {
    simplify_fully(parse_expr(input)?, &Context::default())
}

pub fn simp(input: &str) -> Result<String> {
    Ok(pretty(&simplify(input)?))
}

pub fn system(equations: &[&str]) -> Result<SystemOfEquations> {
    let parsed = equations
        .iter()
        .map(|eq| parse_equation(eq))
        .collect::<Result<Vec<_>>>()?;
    Ok(SystemOfEquations::new(parsed))
}

/// Solves with the default limits.
pub fn solve(equations: &[&str]) -> Result<SolveOutcome> {
    solve_with(equations, Config::default())
}

pub fn solve_with(equations: &[&str], config: Config) -> Result<SolveOutcome> {
    let ctx = Context::new(config)?;
    system(equations)?.solve(&ctx)
}

/// Solves and renders the outcome as lines of text.
pub fn solve_eqs(equations: &[&str]) -> Result<Vec<String>> {
    Ok(pretty_solve_result(&solve(equations)?))
}
