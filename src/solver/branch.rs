//! One solving path through a system: a queue of pending equations, the
//! values found so far and a small state machine working on the first
//! pending equation.

use crate::equation::Equation;
use crate::error::{Result, SolverError};
use crate::expr::Expr;
use crate::simplify::{Simplifier, substitute};
use crate::solver::isolate::{isolate_apply, isolate_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    Simplify,
    Subtract,
    SimplifySubtracted,
    Decide,
    Isolate,
    SimplifyIsolated,
    Record,
}

/// One entry of a branch's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionStep {
    pub description: String,
    pub equation: Equation,
}

/// What [`SolutionBranch::advance`] stopped on.
#[derive(Debug, Clone)]
pub enum SolutionResult {
    /// Every equation is solved; values are in figured-out order.
    Success {
        values: Vec<(String, Expr)>,
        steps: Vec<SolutionStep>,
    },
    /// Alternative strategies: another equation or variable first.
    MajorBranching(Vec<SolutionBranch>),
    /// Alternative solutions of the current step.
    MinorBranching(Vec<SolutionBranch>),
}

#[derive(Debug, Clone)]
pub struct SolutionBranch {
    equations: Vec<Equation>,
    known: Vec<(String, Expr)>,
    target: Option<String>,
    phase: Phase,
    branch_on_init: bool,
    skip_subtraction: bool,
    isolation_steps: usize,
    steps: Vec<SolutionStep>,
}

impl SolutionBranch {
    pub fn new(equations: Vec<Equation>) -> Self {
        Self {
            equations,
            known: Vec::new(),
            target: None,
            phase: Phase::Init,
            branch_on_init: true,
            skip_subtraction: false,
            isolation_steps: 0,
            steps: Vec::new(),
        }
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Values found so far, in the order they were figured out.
    pub fn known_values(&self) -> &[(String, Expr)] {
        &self.known
    }

    pub fn steps(&self) -> &[SolutionStep] {
        &self.steps
    }

    /// Runs the state machine until the branch succeeds or forks. Forks
    /// leave this branch ready to continue on its own path.
    pub fn advance(&mut self, s: &Simplifier<'_>) -> Result<SolutionResult> {
        loop {
            if self.equations.is_empty() {
                return self.finish(s);
            }
            tracing::trace!(target: "solver", phase = ?self.phase, equation = %self.equations[0], "phase");
            let forks = match self.phase {
                Phase::Init => self.init(),
                Phase::Simplify => self.simplify_current(s, Phase::Subtract),
                Phase::Subtract => self.subtract(),
                Phase::SimplifySubtracted => self.simplify_current(s, Phase::Decide),
                Phase::Decide => self.decide(s),
                Phase::Isolate => self.isolate(s),
                Phase::SimplifyIsolated => self.simplify_current(s, Phase::Isolate),
                Phase::Record => self.record(s),
            }?;
            match forks {
                None => {}
                Some(SolutionResult::MajorBranching(branches))
                | Some(SolutionResult::MinorBranching(branches))
                    if branches.is_empty() => {}
                Some(result) => return Ok(result),
            }
        }
    }

    fn current(&mut self) -> Result<&mut Equation> {
        self.equations
            .first_mut()
            .ok_or_else(|| SolverError::InvalidState("no pending equation".into()))
    }

    fn log_step(&mut self, s: &Simplifier<'_>, description: impl Into<String>) {
        if !s.context().config().record_steps {
            return;
        }
        if let Some(equation) = self.equations.first() {
            self.steps.push(SolutionStep {
                description: description.into(),
                equation: equation.clone(),
            });
        }
    }

    /// Forks alternative equation orders plus one copy that keeps both
    /// sides, then substitutes the known values.
    fn init(&mut self) -> Result<Option<SolutionResult>> {
        let mut forks = Vec::new();
        if self.branch_on_init {
            self.branch_on_init = false;
            for index in 1..self.equations.len() {
                let mut fork = self.clone();
                let moved = fork.equations.remove(index);
                fork.equations.insert(0, moved);
                forks.push(fork);
            }
            if !self.skip_subtraction {
                let mut fork = self.clone();
                fork.skip_subtraction = true;
                forks.push(fork);
            }
        }

        let known = self.known.clone();
        let equation = self.current()?;
        *equation = equation.substituted(&known);
        self.phase = Phase::Simplify;
        Ok(Some(SolutionResult::MajorBranching(forks)))
    }

    fn simplify_current(&mut self, s: &Simplifier<'_>, next: Phase) -> Result<Option<SolutionResult>> {
        let equation = self.current()?;
        *equation = equation.clone().simplified(s)?;
        self.phase = next;
        Ok(None)
    }

    /// Moves everything to the right so matching variables cancel.
    fn subtract(&mut self) -> Result<Option<SolutionResult>> {
        let skip = self.skip_subtraction || self.target.is_some();
        let equation = self.current()?;
        if skip || equation.left.is_zero() {
            self.phase = Phase::Decide;
            return Ok(None);
        }
        let left = std::mem::replace(&mut equation.left, Expr::zero());
        equation.right = Expr::sub(equation.right.clone(), left);
        self.phase = Phase::SimplifySubtracted;
        Ok(None)
    }

    /// Settles a closed equation, or picks the variable to isolate and
    /// forks one branch for each other choice.
    fn decide(&mut self, s: &Simplifier<'_>) -> Result<Option<SolutionResult>> {
        let equation = self.current()?.clone();
        let variables = equation.variables();
        if variables.is_empty() {
            if !equation.holds(s)? {
                return Err(SolverError::Contradiction(equation.to_string()));
            }
            tracing::trace!(target: "solver", %equation, "redundant_equation");
            self.equations.remove(0);
            self.reset(true);
            return Ok(None);
        }

        let mut names = variables.into_iter();
        let Some(first) = names.next() else {
            return Err(SolverError::InvalidState("variable set emptied".into()));
        };
        let forks = names
            .map(|name| {
                let mut fork = self.clone();
                fork.target = Some(name);
                fork.phase = Phase::Isolate;
                fork
            })
            .collect();
        self.target = Some(first);
        self.phase = Phase::Isolate;
        Ok(Some(SolutionResult::MajorBranching(forks)))
    }

    /// One isolation operation. Extra solutions become minor forks.
    fn isolate(&mut self, s: &Simplifier<'_>) -> Result<Option<SolutionResult>> {
        let equation = self.current()?.clone();
        if equation.is_variable_isolated() {
            self.phase = Phase::Record;
            return Ok(None);
        }
        let Some(target) = self.target.clone() else {
            return Err(SolverError::InvalidState(format!("isolating {equation} without a target")));
        };
        if !equation.contains_var(&target) {
            self.target = None;
            self.phase = Phase::Decide;
            return Ok(None);
        }

        self.isolation_steps += 1;
        let limit = s.context().config().max_isolation_steps;
        if self.isolation_steps > limit {
            return Err(SolverError::IsolationStepsExceeded { limit });
        }

        let op = isolate_step(&equation, &target)?;
        tracing::trace!(target: "solver", %equation, %op, "isolate");
        let mut results = isolate_apply(&equation, &target, &op, s)?.into_iter();
        let Some(first) = results.next() else {
            return Err(SolverError::NotIsolatable(format!("{op} left nothing of {equation}")));
        };

        self.phase = Phase::SimplifyIsolated;
        let forks = results
            .map(|alternative| {
                let mut fork = self.clone();
                fork.equations[0] = alternative;
                fork.log_step(s, op.to_string());
                fork
            })
            .collect();
        self.equations[0] = first;
        self.log_step(s, op.to_string());
        Ok(Some(SolutionResult::MinorBranching(forks)))
    }

    /// Stores the isolated value, rewrites earlier values with it and moves
    /// on to the next equation.
    fn record(&mut self, s: &Simplifier<'_>) -> Result<Option<SolutionResult>> {
        let equation = self.current()?.clone();
        let Some((name, value)) = equation.calculated_value()? else {
            self.target = None;
            self.phase = Phase::Init;
            return Ok(None);
        };
        tracing::debug!(target: "solver", variable = %name, %value, "value_recorded");

        for (_, earlier) in &mut self.known {
            *earlier = s.simplify_fully(substitute(earlier, &name, &value))?;
        }
        self.known.push((name, value));
        self.equations.remove(0);
        self.reset(true);
        Ok(None)
    }

    fn reset(&mut self, branch_on_init: bool) {
        self.target = None;
        self.phase = Phase::Init;
        self.branch_on_init = branch_on_init;
        self.isolation_steps = 0;
    }

    /// Replays the known values backwards so every value is closed.
    fn finish(&mut self, s: &Simplifier<'_>) -> Result<SolutionResult> {
        for index in (0..self.known.len()).rev() {
            let substituted = crate::simplify::substitute_all(&self.known[index].1, &self.known);
            self.known[index].1 = s.simplify_fully(substituted)?;
        }
        Ok(SolutionResult::Success {
            values: self.known.clone(),
            steps: self.steps.clone(),
        })
    }
}
