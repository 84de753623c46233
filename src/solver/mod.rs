//! Branching equation solver.
//!
//! A [`SystemOfEquations`] starts from one [`SolutionBranch`] and explores the
//! forks it produces: major forks try another equation or variable first,
//! minor forks carry the other solutions of a single step (both signs of an
//! even root, every angle of a periodic family).

mod branch;
mod isolate;
mod operation;
mod system;

pub use branch::{SolutionBranch, SolutionResult, SolutionStep};
pub use isolate::{isolate_apply, isolate_step};
pub use operation::{Action, EquationOperation};
pub use system::{Solution, SolveOutcome, SystemOfEquations};
