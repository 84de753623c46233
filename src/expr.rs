//! Expression tree definitions and helpers.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::BigInt;

use crate::number::Rational;

/// The six trigonometric functions and their inverses.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
}

impl TrigFn {
    pub const ALL: [TrigFn; 12] = [
        TrigFn::Sin,
        TrigFn::Cos,
        TrigFn::Tan,
        TrigFn::Cot,
        TrigFn::Sec,
        TrigFn::Csc,
        TrigFn::Asin,
        TrigFn::Acos,
        TrigFn::Atan,
        TrigFn::Acot,
        TrigFn::Asec,
        TrigFn::Acsc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Cot => "cot",
            TrigFn::Sec => "sec",
            TrigFn::Csc => "csc",
            TrigFn::Asin => "asin",
            TrigFn::Acos => "acos",
            TrigFn::Atan => "atan",
            TrigFn::Acot => "acot",
            TrigFn::Asec => "asec",
            TrigFn::Acsc => "acsc",
        }
    }

    /// The function that undoes this one.
    pub fn inverse(self) -> TrigFn {
        match self {
            TrigFn::Sin => TrigFn::Asin,
            TrigFn::Cos => TrigFn::Acos,
            TrigFn::Tan => TrigFn::Atan,
            TrigFn::Cot => TrigFn::Acot,
            TrigFn::Sec => TrigFn::Asec,
            TrigFn::Csc => TrigFn::Acsc,
            TrigFn::Asin => TrigFn::Sin,
            TrigFn::Acos => TrigFn::Cos,
            TrigFn::Atan => TrigFn::Tan,
            TrigFn::Acot => TrigFn::Cot,
            TrigFn::Asec => TrigFn::Sec,
            TrigFn::Acsc => TrigFn::Csc,
        }
    }

    pub fn is_inverse(self) -> bool {
        matches!(
            self,
            TrigFn::Asin | TrigFn::Acos | TrigFn::Atan | TrigFn::Acot | TrigFn::Asec | TrigFn::Acsc
        )
    }
}

/// Expression tree. Every node owns its children; rewrites build new nodes.
///
/// Equality and ordering are structural: `2/4` and `1/2` differ, as do
/// `x + y` and `y + x`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Rational(Rational),
    Variable(String),
    /// Free integer parameter of a periodic solution family.
    Param(String),
    Pi,
    E,
    Neg(Box<Expr>),
    Inv(Box<Expr>),
    Sum(Vec<Expr>),
    Product(Vec<Expr>),
    /// `Log(base, argument)`
    Log(Box<Expr>, Box<Expr>),
    /// `Pow(base, exponent)`
    Pow(Box<Expr>, Box<Expr>),
    /// `Root(degree, radicand)`
    Root(Box<Expr>, Box<Expr>),
    Trig(TrigFn, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Rational(Rational::from_integer(value))
    }

    pub fn rational(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Rational(Rational::new(num, den))
    }

    pub fn zero() -> Self {
        Expr::Rational(Rational::zero())
    }

    pub fn one() -> Self {
        Expr::Rational(Rational::one())
    }

    pub fn neg(inner: Expr) -> Self {
        Expr::Neg(inner.boxed())
    }

    pub fn inv(inner: Expr) -> Self {
        Expr::Inv(inner.boxed())
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::Pow(base.boxed(), exponent.boxed())
    }

    pub fn root(degree: Expr, radicand: Expr) -> Self {
        Expr::Root(degree.boxed(), radicand.boxed())
    }

    pub fn sqrt(radicand: Expr) -> Self {
        Expr::root(Expr::integer(2), radicand)
    }

    pub fn log(base: Expr, argument: Expr) -> Self {
        Expr::Log(base.boxed(), argument.boxed())
    }

    pub fn trig(func: TrigFn, argument: Expr) -> Self {
        Expr::Trig(func, argument.boxed())
    }

    pub fn sin(argument: Expr) -> Self {
        Expr::trig(TrigFn::Sin, argument)
    }

    pub fn cos(argument: Expr) -> Self {
        Expr::trig(TrigFn::Cos, argument)
    }

    pub fn sum(terms: Vec<Expr>) -> Self {
        Expr::Sum(terms)
    }

    pub fn product(factors: Vec<Expr>) -> Self {
        Expr::Product(factors)
    }

    /// `a - b`
    pub fn sub(a: Expr, b: Expr) -> Self {
        Expr::Sum(vec![a, Expr::neg(b)])
    }

    /// `a / b`
    pub fn div(a: Expr, b: Expr) -> Self {
        Expr::Product(vec![a, Expr::inv(b)])
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Expr::Rational(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Expr::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// A rational with zero numerator and non-zero denominator.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Rational(r) if r.is_zero())
    }

    /// Structurally `1/1`.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Rational(r) if r.is_one())
    }

    /// Structural equivalence, not mathematical equality.
    pub fn is_equivalent(&self, other: &Expr) -> bool {
        self == other
    }

    /// Names of the free variables, in alphabetical order. Parameters are
    /// not variables.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Variable(name) => {
                out.insert(name.clone());
            }
            Expr::Rational(_) | Expr::Param(_) | Expr::Pi | Expr::E => {}
            Expr::Neg(inner) | Expr::Inv(inner) | Expr::Trig(_, inner) => {
                inner.collect_variables(out)
            }
            Expr::Sum(items) | Expr::Product(items) => {
                for item in items {
                    item.collect_variables(out);
                }
            }
            Expr::Log(a, b) | Expr::Pow(a, b) | Expr::Root(a, b) => {
                a.collect_variables(out);
                b.collect_variables(out);
            }
        }
    }

    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(name) => name == var,
            Expr::Rational(_) | Expr::Param(_) | Expr::Pi | Expr::E => false,
            Expr::Neg(inner) | Expr::Inv(inner) | Expr::Trig(_, inner) => inner.contains_var(var),
            Expr::Sum(items) | Expr::Product(items) => items.iter().any(|e| e.contains_var(var)),
            Expr::Log(a, b) | Expr::Pow(a, b) | Expr::Root(a, b) => {
                a.contains_var(var) || b.contains_var(var)
            }
        }
    }

    /// Closed expression: no free variables. Constants and parameters count
    /// as real numbers.
    pub fn is_real_number(&self) -> bool {
        match self {
            Expr::Variable(_) => false,
            Expr::Rational(_) | Expr::Param(_) | Expr::Pi | Expr::E => true,
            Expr::Neg(inner) | Expr::Inv(inner) | Expr::Trig(_, inner) => inner.is_real_number(),
            Expr::Sum(items) | Expr::Product(items) => items.iter().all(Expr::is_real_number),
            Expr::Log(a, b) | Expr::Pow(a, b) | Expr::Root(a, b) => {
                a.is_real_number() && b.is_real_number()
            }
        }
    }

    pub fn contains_param(&self) -> bool {
        match self {
            Expr::Param(_) => true,
            Expr::Rational(_) | Expr::Variable(_) | Expr::Pi | Expr::E => false,
            Expr::Neg(inner) | Expr::Inv(inner) | Expr::Trig(_, inner) => inner.contains_param(),
            Expr::Sum(items) | Expr::Product(items) => items.iter().any(Expr::contains_param),
            Expr::Log(a, b) | Expr::Pow(a, b) | Expr::Root(a, b) => {
                a.contains_param() || b.contains_param()
            }
        }
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Expr::Rational(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}
