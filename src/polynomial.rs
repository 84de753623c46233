//! Polynomials in one variable with symbolic coefficients.

use std::collections::BTreeMap;

use num_traits::ToPrimitive;

use crate::error::{Result, SolverError};
use crate::expr::Expr;
use crate::guess::candidates;
use crate::simplify::Simplifier;

/// `Σ coeffs[i] · var^i`, keeping only non-zero coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    var: String,
    pub(crate) coeffs: BTreeMap<usize, Expr>,
}

impl Polynomial {
    /// Collects `side - value` as a polynomial in `var`, where `side` is a
    /// sum of monomials. Negative powers are cleared by multiplying through
    /// with the lowest power of `var`.
    pub fn from_equation(value: &Expr, side: &Expr, var: &str, s: &Simplifier<'_>) -> Result<Self> {
        let side = s.simplify_fully(side.clone())?;
        let terms: &[Expr] = match &side {
            Expr::Sum(terms) => terms,
            other => std::slice::from_ref(other),
        };

        let mut collected: BTreeMap<i64, Vec<Expr>> = BTreeMap::new();
        collected.entry(0).or_default().push(Expr::neg(value.clone()));
        for term in terms {
            let (degree, factors) = monomial(term, var)?;
            collected.entry(degree).or_default().push(Expr::Product(factors));
        }

        let lowest = collected.keys().next().copied().unwrap_or(0).min(0);
        let mut coeffs = BTreeMap::new();
        for (degree, parts) in collected {
            let coeff = s.simplify_fully(Expr::Sum(parts))?;
            if coeff.is_zero() {
                continue;
            }
            let shifted = usize::try_from(degree - lowest)
                .map_err(|_| SolverError::NotAPolynomial(format!("degree {degree} out of range")))?;
            coeffs.insert(shifted, coeff);
        }
        Ok(Self { var: var.to_string(), coeffs })
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    pub fn degree(&self) -> usize {
        self.coeffs.keys().next_back().copied().unwrap_or(0)
    }

    pub fn coeff(&self, power: usize) -> Expr {
        self.coeffs.get(&power).cloned().unwrap_or_else(Expr::zero)
    }

    pub fn to_expr(&self) -> Expr {
        let x = Expr::var(self.var.clone());
        let terms = self
            .coeffs
            .iter()
            .map(|(&power, coeff)| match power {
                0 => coeff.clone(),
                1 => Expr::Product(vec![coeff.clone(), x.clone()]),
                _ => Expr::Product(vec![coeff.clone(), Expr::pow(x.clone(), Expr::integer(power as i64))]),
            })
            .collect();
        Expr::Sum(terms)
    }

    /// The polynomial's value at `at`, fully simplified.
    pub fn evaluate(&self, at: &Expr, s: &Simplifier<'_>) -> Result<Expr> {
        let terms = self
            .coeffs
            .iter()
            .map(|(&power, coeff)| {
                Expr::Product(vec![coeff.clone(), Expr::pow(at.clone(), Expr::integer(power as i64))])
            })
            .collect();
        s.simplify_fully(Expr::Sum(terms))
    }

    /// Synthetic division by `(var - root)`. The caller has checked that
    /// `root` is a root, so the remainder is dropped.
    pub fn deflate(&self, root: &Expr, s: &Simplifier<'_>) -> Result<Self> {
        let mut coeffs = BTreeMap::new();
        let mut carry = Expr::zero();
        for power in (1..=self.degree()).rev() {
            let next = s.simplify_fully(Expr::Sum(vec![
                self.coeff(power),
                Expr::Product(vec![root.clone(), carry]),
            ]))?;
            if !next.is_zero() {
                coeffs.insert(power - 1, next.clone());
            }
            carry = next;
        }
        Ok(Self { var: self.var.clone(), coeffs })
    }

    /// First enumerated candidate that is a root, if any.
    pub fn guess_root(&self, s: &Simplifier<'_>) -> Option<Expr> {
        let ctx = s.context();
        candidates(ctx.config().max_guessed_numbers, ctx.guess_complexity()).find(|candidate| {
            match self.evaluate(candidate, s) {
                Ok(value) => value.is_zero(),
                Err(err) => {
                    tracing::trace!(target: "solver", %candidate, %err, "guess_rejected");
                    false
                }
            }
        })
    }

    /// All roots this solver can express. Degrees above the closed-form
    /// limit are first reduced by guessing roots; if guessing stalls after
    /// finding some roots, those are returned alone.
    pub fn solve(&self, s: &Simplifier<'_>) -> Result<Vec<Expr>> {
        let max = s.context().config().max_polynomial_degree;
        let mut poly = self.clone();
        let mut roots = Vec::new();
        while poly.degree() > max {
            let Some(root) = poly.guess_root(s) else {
                break;
            };
            poly = poly.deflate(&root, s)?;
            roots.push(root);
        }

        let degree = poly.degree();
        if degree > max {
            if roots.is_empty() {
                return Err(SolverError::PolynomialTooHighDegree { degree });
            }
            tracing::warn!(target: "solver", degree, found = roots.len(), "root_guessing_stopped");
            return Ok(roots);
        }

        match poly.closed_form(s) {
            Ok(found) => roots.extend(found),
            Err(err) if !roots.is_empty() => {
                tracing::debug!(target: "solver", %err, "closed_form_failed_after_guessing");
            }
            Err(err) => return Err(err),
        }
        Ok(roots)
    }

    /// Linear and quadratic formulas. A negative rational discriminant has
    /// no real roots.
    fn closed_form(&self, s: &Simplifier<'_>) -> Result<Vec<Expr>> {
        let (c0, c1, c2) = (self.coeff(0), self.coeff(1), self.coeff(2));
        match self.degree() {
            0 if c0.is_zero() => Err(SolverError::NotIsolatable(format!(
                "every value of {} satisfies the equation",
                self.var
            ))),
            0 => Err(SolverError::NoPolynomialSolution),
            1 => Ok(vec![Expr::Product(vec![Expr::neg(c0), Expr::inv(c1)])]),
            2 => {
                let discriminant = s.simplify_fully(Expr::Sum(vec![
                    Expr::Product(vec![c1.clone(), c1.clone()]),
                    Expr::Product(vec![Expr::integer(-4), c0, c2.clone()]),
                ]))?;
                if matches!(&discriminant, Expr::Rational(r) if r.is_negative()) {
                    return Err(SolverError::NoPolynomialSolution);
                }
                let denominator = Expr::inv(Expr::Product(vec![Expr::integer(2), c2]));
                let vertex = |offset: Option<Expr>| {
                    let mut numerator = vec![Expr::neg(c1.clone())];
                    numerator.extend(offset);
                    Expr::Product(vec![Expr::Sum(numerator), denominator.clone()])
                };
                if discriminant.is_zero() {
                    return Ok(vec![vertex(None)]);
                }
                let root = Expr::sqrt(discriminant);
                Ok(vec![vertex(Some(root.clone())), vertex(Some(Expr::neg(root)))])
            }
            degree => Err(SolverError::PolynomialTooHighDegree { degree }),
        }
    }
}

/// Degree and variable-free factors of one term.
fn monomial(term: &Expr, var: &str) -> Result<(i64, Vec<Expr>)> {
    let factors: &[Expr] = match term {
        Expr::Product(factors) => factors,
        other => std::slice::from_ref(other),
    };
    let mut degree = 0i64;
    let mut rest = Vec::new();
    for factor in factors {
        match factor {
            Expr::Variable(name) if name == var => degree += 1,
            Expr::Pow(base, exponent) if base.as_variable() == Some(var) => {
                let power = exponent
                    .as_rational()
                    .filter(|r| r.is_integer())
                    .and_then(|r| r.numer().to_i64())
                    .ok_or_else(|| {
                        SolverError::NotAPolynomial(format!("{var} raised to {exponent}"))
                    })?;
                degree += power;
            }
            other if other.contains_var(var) => {
                return Err(SolverError::NotAPolynomial(format!("term {other} in {var}")));
            }
            other => rest.push(other.clone()),
        }
    }
    Ok((degree, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn x_pow(n: i64) -> Expr {
        Expr::pow(x(), Expr::integer(n))
    }

    #[test]
    fn collects_coefficients() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let side = Expr::Sum(vec![x(), Expr::Product(vec![Expr::integer(3), x_pow(2)])]);
        let poly = Polynomial::from_equation(&Expr::integer(6), &side, "x", &s).expect("polynomial");
        assert_eq!(poly.degree(), 2);
        assert_eq!(poly.coeff(0), Expr::integer(-6));
        assert_eq!(poly.coeff(1), Expr::integer(1));
        assert_eq!(poly.coeff(2), Expr::integer(3));
    }

    #[test]
    fn rejects_fractional_powers() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let side = Expr::Sum(vec![x(), Expr::pow(x(), Expr::rational(1, 3))]);
        let err = Polynomial::from_equation(&Expr::zero(), &side, "x", &s).unwrap_err();
        assert!(matches!(err, SolverError::NotAPolynomial(_)));
    }

    #[test]
    fn quadratic_roots() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let side = Expr::Sum(vec![x(), x_pow(2)]);
        let poly = Polynomial::from_equation(&Expr::integer(6), &side, "x", &s).expect("polynomial");
        let roots: Vec<Expr> = poly
            .solve(&s)
            .expect("roots")
            .into_iter()
            .map(|r| s.simplify_fully(r).expect("simplifies"))
            .collect();
        assert_eq!(roots, vec![Expr::integer(2), Expr::integer(-3)]);
    }

    #[test]
    fn cubic_is_reduced_by_guessing() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        // x^3 - x = 0 has roots 0, 1, -1
        let side = Expr::Sum(vec![x_pow(3), Expr::Product(vec![Expr::integer(-1), x()])]);
        let poly = Polynomial::from_equation(&Expr::zero(), &side, "x", &s).expect("polynomial");
        assert_eq!(poly.degree(), 3);
        let mut roots: Vec<Expr> = poly
            .solve(&s)
            .expect("roots")
            .into_iter()
            .map(|r| s.simplify_fully(r).expect("simplifies"))
            .collect();
        roots.sort();
        let mut expected = vec![Expr::zero(), Expr::integer(1), Expr::integer(-1)];
        expected.sort();
        assert_eq!(roots, expected);
    }

    #[test]
    fn negative_discriminant_has_no_roots() {
        let ctx = Context::default();
        let s = Simplifier::new(&ctx);
        let poly = Polynomial::from_equation(&Expr::integer(-1), &x_pow(2), "x", &s).expect("polynomial");
        assert_eq!(poly.solve(&s), Err(SolverError::NoPolynomialSolution));
    }
}
