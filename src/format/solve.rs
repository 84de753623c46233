use crate::format::expr::pretty;
use crate::solver::{Solution, SolveOutcome};

/// Render a `SolveOutcome` into human-readable lines.
pub fn pretty_solve_result(outcome: &SolveOutcome) -> Vec<String> {
    match outcome {
        SolveOutcome::Verified(solutions) => {
            let mut lines = vec![format!("{} verified solution(s):", solutions.len())];
            lines.extend(solutions.iter().flat_map(describe_solution));
            lines
        }
        SolveOutcome::Unverified(solutions) => {
            let mut lines = vec![format!(
                "{} solution(s) found, none could be verified:",
                solutions.len()
            )];
            lines.extend(solutions.iter().flat_map(describe_solution));
            lines
        }
        SolveOutcome::Failed(reasons) => {
            let mut lines = vec!["No solution found:".to_string()];
            lines.extend(reasons.iter().map(|reason| format!(" - {reason}")));
            lines
        }
        SolveOutcome::NoProgress => vec!["No solution found: no branch could proceed.".to_string()],
    }
}

fn describe_solution(solution: &Solution) -> Vec<String> {
    let assignments = solution
        .values
        .iter()
        .map(|(name, value)| format!("{name} = {}", pretty(value)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![format!(" - {assignments}")];
    for (name, approximation) in &solution.approximations {
        if let Some(value) = approximation {
            lines.push(format!("     {name} ~ {value}"));
        }
    }
    for step in &solution.steps {
        lines.push(format!("     {}: {}", step.description, step.equation));
    }
    lines
}
