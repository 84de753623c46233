//! Solver limits and the immutable per-solve context built from them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// Budgets and guards for one solve. Every field has a default, so partial
/// documents deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest prime tried when factoring or cancelling.
    pub max_decomposition_factor: u32,
    /// Largest prime factor of a root degree that is split into sub-roots.
    pub max_exponent_factor_of_root: u32,
    /// Byte length an exact integer result may reach before arithmetic is skipped.
    pub max_size_of_numbers_in_bytes: usize,
    /// Highest degree solved by closed formula.
    pub max_polynomial_degree: usize,
    pub max_guessed_numbers: usize,
    pub guessed_number_complexity: usize,
    pub max_resulting_terms_from_expansion: usize,
    pub max_terms_for_trigonometric_sum_expansion: usize,
    pub max_branches_explored: usize,
    pub max_solutions_returned: usize,
    pub max_depth_for_simplification: usize,
    pub max_returned_fails: usize,
    /// Cap on passes of the simplification fixpoint loop.
    pub max_simplification_passes: usize,
    /// Cap on isolation operations applied to a single equation.
    pub max_isolation_steps: usize,
    pub record_steps: bool,
    pub numeric_evaluation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_decomposition_factor: 101,
            max_exponent_factor_of_root: 3,
            max_size_of_numbers_in_bytes: 15,
            max_polynomial_degree: 2,
            max_guessed_numbers: 7,
            guessed_number_complexity: 7,
            max_resulting_terms_from_expansion: 24,
            max_terms_for_trigonometric_sum_expansion: 4,
            max_branches_explored: 4096,
            max_solutions_returned: 8,
            max_depth_for_simplification: 30,
            max_returned_fails: 20,
            max_simplification_passes: 64,
            max_isolation_steps: 64,
            record_steps: false,
            numeric_evaluation: false,
        }
    }
}

/// Upper bound on `max_decomposition_factor`; the prime table is sieved
/// eagerly up to it.
pub const MAX_DECOMPOSITION_FACTOR: u32 = 1_000_000;

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.max_decomposition_factor > MAX_DECOMPOSITION_FACTOR {
            return Err(SolverError::InvalidConfig(format!(
                "max_decomposition_factor may be at most {MAX_DECOMPOSITION_FACTOR}, got {}",
                self.max_decomposition_factor
            )));
        }
        if self.max_polynomial_degree > 2 {
            return Err(SolverError::InvalidConfig(format!(
                "closed-form solving is limited to degree 2, got {}",
                self.max_polynomial_degree
            )));
        }
        if self.max_depth_for_simplification == 0 {
            return Err(SolverError::InvalidConfig(
                "max_depth_for_simplification must be positive".into(),
            ));
        }
        if self.max_simplification_passes == 0 {
            return Err(SolverError::InvalidConfig(
                "max_simplification_passes must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Validated configuration plus the prime table derived from it.
///
/// Built once per solve and only ever borrowed, so branches can be stepped
/// independently.
#[derive(Debug, Clone)]
pub struct Context {
    config: Config,
    primes: Vec<u32>,
}

impl Context {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let primes = primes_up_to(config.max_decomposition_factor.max(3));
        Ok(Self { config, primes })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Primes in ascending order, up to the configured decomposition bound.
    pub fn primes(&self) -> &[u32] {
        &self.primes
    }

    /// Primes no larger than `bound`.
    pub fn primes_below(&self, bound: u32) -> impl Iterator<Item = u32> + '_ {
        self.primes.iter().copied().take_while(move |&p| p <= bound)
    }

    pub fn guess_complexity(&self) -> usize {
        self.config.guessed_number_complexity.max(2)
    }
}

impl Default for Context {
    fn default() -> Self {
        let config = Config::default();
        let primes = primes_up_to(config.max_decomposition_factor.max(3));
        Self { config, primes }
    }
}

fn primes_up_to(limit: u32) -> Vec<u32> {
    let limit = limit as usize;
    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();
    for n in 2..=limit {
        if composite[n] {
            continue;
        }
        primes.push(n as u32);
        let mut multiple = n * n;
        while multiple <= limit {
            composite[multiple] = true;
            multiple += n;
        }
    }
    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_primes_stop_at_bound() {
        let ctx = Context::default();
        assert_eq!(ctx.primes().first(), Some(&2));
        assert_eq!(ctx.primes().last(), Some(&101));
        assert_eq!(ctx.primes().len(), 26);
    }

    #[test]
    fn tiny_bound_still_has_two_and_three() {
        let config = Config {
            max_decomposition_factor: 1,
            ..Config::default()
        };
        let ctx = Context::new(config).expect("valid config");
        assert_eq!(ctx.primes(), &[2, 3]);
    }

    #[test]
    fn rejects_cubic_closed_form() {
        let config = Config {
            max_polynomial_degree: 3,
            ..Config::default()
        };
        assert!(matches!(
            Context::new(config),
            Err(SolverError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "max_branches_explored": 16, "record_steps": true }"#)
                .expect("deserialize");
        assert_eq!(config.max_branches_explored, 16);
        assert!(config.record_steps);
        assert_eq!(config.max_size_of_numbers_in_bytes, 15);
    }
}
