//! Deterministic enumeration of closed real expressions, used as candidate
//! roots for polynomials above the closed-form degree.
//!
//! Each enumerator is an infinite iterator that produces its values in
//! rounds. Composite enumerators interleave their parts with a fixed cadence
//! (`complexity`) and construct nested enumerators only when first needed,
//! so the mutual recursion between them stays finite for every prefix.

use std::collections::VecDeque;

use num_integer::Integer;

use crate::expr::{Expr, TrigFn};

type Stream = Box<dyn Iterator<Item = Expr>>;

/// `0, 1, -1, 2, -2, …`
pub fn integers() -> impl Iterator<Item = Expr> {
    std::iter::once(Expr::zero()).chain((1i64..).flat_map(|n| [Expr::integer(n), Expr::integer(-n)]))
}

/// `±a/b` with `b > 1` and `gcd(a, b) = 1`, ordered by `a + b` then `a`.
pub fn non_integer_rationals() -> impl Iterator<Item = Expr> {
    fractions(|sum| 1..sum - 1)
}

/// `0`, then every `±a/b` with `gcd(a, b) = 1`, ordered by `a + b` then `a`.
pub fn rationals() -> impl Iterator<Item = Expr> {
    std::iter::once(Expr::zero()).chain(fractions(|sum| 1..sum))
}

fn fractions(numerators: fn(i64) -> std::ops::Range<i64>) -> impl Iterator<Item = Expr> {
    (2i64..).flat_map(move |sum| {
        numerators(sum)
            .filter(move |num| num.gcd(&(sum - num)) == 1)
            .flat_map(move |num| [Expr::rational(num, sum - num), Expr::rational(-num, sum - num)])
    })
}

fn next_or_zero(stream: &mut dyn Iterator<Item = Expr>) -> Expr {
    stream.next().unwrap_or_else(Expr::zero)
}

/// Integers, with one non-integer rational after every `complexity`
/// integers, one simple root after every `complexity` rationals and one sum
/// after every `complexity` roots.
pub struct RealExpressions {
    complexity: usize,
    integers: Stream,
    rationals: Stream,
    roots: Option<Box<SimpleRoots>>,
    sums: Option<Box<AllSums>>,
    counts: [usize; 3],
    pending: VecDeque<Expr>,
}

impl RealExpressions {
    pub fn new(complexity: usize) -> Self {
        Self {
            complexity: complexity.max(2),
            integers: Box::new(integers()),
            rationals: Box::new(non_integer_rationals()),
            roots: None,
            sums: None,
            counts: [0; 3],
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self) {
        let c = self.complexity;
        self.pending.push_back(next_or_zero(&mut self.integers));
        self.counts[0] += 1;
        if self.counts[0] == c {
            self.counts[0] = 0;
            self.pending.push_back(next_or_zero(&mut self.rationals));
            self.counts[1] += 1;
        }
        if self.counts[1] == c {
            self.counts[1] = 0;
            let roots = self.roots.get_or_insert_with(|| Box::new(SimpleRoots::new(c)));
            self.pending.push_back(next_or_zero(roots.as_mut()));
            self.counts[2] += 1;
        }
        if self.counts[2] == c {
            self.counts[2] = 0;
            let sums = self.sums.get_or_insert_with(|| Box::new(AllSums::new(c)));
            self.pending.push_back(next_or_zero(sums.as_mut()));
        }
    }
}

impl Iterator for RealExpressions {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}

/// `±root(n, v)` for real expressions `v`, widening the degree range each
/// round.
pub struct SimpleRoots {
    complexity: usize,
    round: i64,
    pending: VecDeque<Expr>,
}

impl SimpleRoots {
    pub fn new(complexity: usize) -> Self {
        Self {
            complexity: complexity.max(2),
            round: 0,
            pending: VecDeque::new(),
        }
    }

    fn push_pair(&mut self, degree: i64, radicand: Expr) {
        let root = Expr::root(Expr::integer(degree), radicand);
        self.pending.push_back(root.clone());
        self.pending.push_back(Expr::neg(root));
    }

    fn refill(&mut self) {
        self.round += 1;
        let i = self.round;
        let mut radicands = RealExpressions::new(self.complexity);
        // 0 and 1 are their own roots
        radicands.nth(1);
        for _ in 0..(i - 1) {
            for _ in 0..self.complexity {
                let radicand = next_or_zero(&mut radicands);
                self.push_pair(i + 1, radicand);
            }
        }
        for _ in 0..self.complexity {
            for degree in 2..(i + 2) {
                let radicand = next_or_zero(&mut radicands);
                self.push_pair(degree, radicand);
            }
        }
    }
}

impl Iterator for SimpleRoots {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}

/// Simple roots, with one sum and one transcendental value after every
/// `complexity` roots.
pub struct IrrationalExpressions {
    complexity: usize,
    roots: SimpleRoots,
    sums: Option<Box<AllSums>>,
    operators: Option<Box<SimpleOperators>>,
    count: usize,
    pending: VecDeque<Expr>,
}

impl IrrationalExpressions {
    pub fn new(complexity: usize) -> Self {
        let complexity = complexity.max(2);
        Self {
            complexity,
            roots: SimpleRoots::new(complexity),
            sums: None,
            operators: None,
            count: 0,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self) {
        let c = self.complexity;
        self.pending.push_back(next_or_zero(&mut self.roots));
        self.count += 1;
        if self.count == c {
            self.count = 0;
            let sums = self.sums.get_or_insert_with(|| Box::new(AllSums::new(c)));
            self.pending.push_back(next_or_zero(sums.as_mut()));
            let operators = self.operators.get_or_insert_with(|| Box::new(SimpleOperators::new(c)));
            self.pending.push_back(next_or_zero(operators.as_mut()));
        }
    }
}

impl Iterator for IrrationalExpressions {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}

/// `π`, `e`, then all twelve trigonometric functions of each real expression.
pub struct SimpleOperators {
    complexity: usize,
    arguments: Option<Box<RealExpressions>>,
    pending: VecDeque<Expr>,
}

impl SimpleOperators {
    pub fn new(complexity: usize) -> Self {
        Self {
            complexity: complexity.max(2),
            arguments: None,
            pending: VecDeque::from([Expr::Pi, Expr::E]),
        }
    }

    fn refill(&mut self) {
        let c = self.complexity;
        let arguments = self.arguments.get_or_insert_with(|| Box::new(RealExpressions::new(c)));
        let argument = next_or_zero(arguments.as_mut());
        self.pending
            .extend(TrigFn::ALL.iter().map(|&func| Expr::trig(func, argument.clone())));
    }
}

impl Iterator for SimpleOperators {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}

/// Sums of a non-zero rational and an irrational expression, pairing the
/// `i`-th irrational with the first `i` rationals in round `i`.
pub struct AllSums {
    complexity: usize,
    round: usize,
    pending: VecDeque<Expr>,
}

impl AllSums {
    pub fn new(complexity: usize) -> Self {
        Self {
            complexity: complexity.max(2),
            round: 0,
            pending: VecDeque::new(),
        }
    }

    fn refill(&mut self) {
        self.round += 1;
        let i = self.round;
        let firsts: Vec<Expr> = rationals().skip(1).take(i).collect();
        let irrational = IrrationalExpressions::new(self.complexity)
            .nth(i - 1)
            .unwrap_or_else(Expr::zero);
        for rational in &firsts {
            self.pending.push_back(Expr::Sum(vec![rational.clone(), irrational.clone()]));
        }

        let last = firsts.last().cloned().unwrap_or_else(Expr::one);
        for irrational in IrrationalExpressions::new(self.complexity).take(i - 1) {
            self.pending.push_back(Expr::Sum(vec![last.clone(), irrational]));
        }
    }
}

impl Iterator for AllSums {
    type Item = Expr;

    fn next(&mut self) -> Option<Expr> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}

/// The first `count` candidates of [`RealExpressions`].
pub fn candidates(count: usize, complexity: usize) -> impl Iterator<Item = Expr> {
    RealExpressions::new(complexity).take(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_alternate_sign() {
        let first: Vec<_> = integers().take(5).collect();
        assert_eq!(
            first,
            vec![Expr::zero(), Expr::integer(1), Expr::integer(-1), Expr::integer(2), Expr::integer(-2)]
        );
    }

    #[test]
    fn non_integer_rationals_skip_integers() {
        let first: Vec<_> = non_integer_rationals().take(4).collect();
        assert_eq!(
            first,
            vec![
                Expr::rational(1, 2),
                Expr::rational(-1, 2),
                Expr::rational(1, 3),
                Expr::rational(-1, 3),
            ]
        );
    }

    #[test]
    fn rationals_start_with_zero_and_one() {
        let first: Vec<_> = rationals().take(3).collect();
        assert_eq!(first, vec![Expr::zero(), Expr::integer(1), Expr::integer(-1)]);
    }

    #[test]
    fn low_complexity_interleaves_roots() {
        let first: Vec<_> = RealExpressions::new(2).take(7).collect();
        assert_eq!(
            first,
            vec![
                Expr::zero(),
                Expr::integer(1),
                Expr::rational(1, 2),
                Expr::integer(-1),
                Expr::integer(2),
                Expr::rational(-1, 2),
                Expr::root(Expr::integer(2), Expr::rational(1, 2)),
            ]
        );
    }

    #[test]
    fn deep_prefix_is_finite() {
        assert_eq!(RealExpressions::new(2).take(200).count(), 200);
    }
}
