use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolverError>;

/// Failures raised while simplifying or solving.
///
/// Everything except [`SolverError::InvalidState`] only abandons the branch
/// that raised it; the orchestrator records the message and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("simplification exceeded the maximum depth of {limit}")]
    SimplificationDepthExceeded { limit: usize },
    #[error("simplification did not settle after {passes} passes")]
    SimplificationDidNotConverge { passes: usize },
    #[error("root of degree zero")]
    ZeroDegreeRoot,
    #[error("not a polynomial: {0}")]
    NotAPolynomial(String),
    #[error("polynomial of degree {degree} is too high to solve")]
    PolynomialTooHighDegree { degree: usize },
    #[error("polynomial has no solutions")]
    NoPolynomialSolution,
    #[error("contradiction: {0}")]
    Contradiction(String),
    #[error("cannot isolate variable: {0}")]
    NotIsolatable(String),
    #[error("isolation did not finish within {limit} steps")]
    IsolationStepsExceeded { limit: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("internal solver state error: {0}")]
    InvalidState(String),
}

impl SolverError {
    /// Fatal errors point at a logic defect and abort the whole solve.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SolverError::InvalidState(_))
    }
}
