//! Exact symbolic equation solving: expression trees over rational numbers,
//! a depth-bounded simplifier and a branching solver for systems of
//! equations.

pub mod config;
pub mod equation;
pub mod error;
pub mod expr;
pub mod format;
pub mod guess;
pub mod number;
pub mod numeric;
pub mod parser;
pub mod polynomial;
pub mod prelude;
pub mod simplify;
pub mod solver;
pub mod trig_table;

pub use config::{Config, Context};
pub use equation::Equation;
pub use error::{Result, SolverError};
pub use expr::{Expr, TrigFn};
pub use format::{pretty, pretty_solve_result};
pub use number::Rational;
pub use parser::{parse_equation, parse_expr};
pub use polynomial::Polynomial;
pub use simplify::{Simplified, Simplifier, simplify, simplify_fully, substitute, substitute_all};
pub use solver::{Solution, SolutionBranch, SolutionResult, SolveOutcome, SystemOfEquations};
