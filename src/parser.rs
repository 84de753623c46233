use crate::equation::Equation;
use crate::error::{Result, SolverError};
use crate::expr::{Expr, TrigFn};
use crate::number::Rational;
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::{ErrorKind, ParseError, VerboseError, convert_error};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, preceded, separated_pair};
use num_bigint::BigInt;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    finish(input, all_consuming(ws(parse_sum))(input))
}

/// Parses `lhs = rhs`.
pub fn parse_equation(input: &str) -> Result<Equation> {
    let parsed = all_consuming(separated_pair(ws(parse_sum), char('='), ws(parse_sum)))(input);
    let (left, right) = finish(input, parsed)?;
    Ok(Equation::new(left, right))
}

fn finish<O>(input: &str, parsed: ParseResult<'_, O>) -> Result<O> {
    match parsed {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            Err(SolverError::Parse(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(SolverError::Parse("incomplete input".into())),
    }
}

fn parse_sum(input: &str) -> ParseResult<'_, Expr> {
    let (rest, first) = parse_product(input)?;
    let (rest, others) = many0(pair(ws(alt((char('+'), char('-')))), parse_product))(rest)?;
    if others.is_empty() {
        return Ok((rest, first));
    }
    let mut terms = vec![first];
    terms.extend(others.into_iter().map(|(op, term)| match op {
        '-' => Expr::neg(term),
        _ => term,
    }));
    Ok((rest, Expr::Sum(terms)))
}

fn parse_product(input: &str) -> ParseResult<'_, Expr> {
    let (rest, first) = parse_unary(input)?;
    let (rest, others) = many0(pair(ws(alt((char('*'), char('/')))), parse_unary))(rest)?;
    if others.is_empty() {
        return Ok((rest, first));
    }
    let mut factors = vec![first];
    factors.extend(others.into_iter().map(|(op, factor)| match op {
        '/' => Expr::inv(factor),
        _ => factor,
    }));
    Ok((rest, Expr::Product(factors)))
}

/// Unary minus binds looser than `^`, so `-x^2` is `-(x^2)`.
fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, operand)) = preceded(ws(char('-')), parse_unary)(input) {
        let negated = match operand {
            Expr::Rational(r) => Expr::Rational(r.neg()),
            other => Expr::neg(other),
        };
        return Ok((rest, negated));
    }
    parse_power(input)
}

fn parse_power(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    match preceded(ws(char('^')), parse_unary)(rest) {
        Ok((next, exponent)) => Ok((next, Expr::pow(base, exponent))),
        Err(_) => Ok((rest, base)),
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((parse_parens, parse_fraction, parse_number, parse_name))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_sum, ws(char(')')))(input)
}

/// `n/d` between two integer literals is one rational literal.
fn parse_fraction(input: &str) -> ParseResult<'_, Expr> {
    map(separated_pair(parse_int, ws(char('/')), parse_int), |(n, d)| {
        Expr::Rational(Rational::new(n, d))
    })(input)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map(parse_int, |n| Expr::Rational(Rational::from_integer(n)))(input)
}

/// A constant, a variable, or a function call when an argument list follows.
fn parse_name(input: &str) -> ParseResult<'_, Expr> {
    let (rest, name) = ws(recognize(pair(alpha1, alphanumeric0)))(input)?;
    let (rest, args) = opt(delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), parse_sum),
        ws(char(')')),
    ))(rest)?;
    let Some(args) = args else {
        let expr = match name {
            "pi" => Expr::Pi,
            "e" => Expr::E,
            _ => Expr::var(name),
        };
        return Ok((rest, expr));
    };
    match call(name, args) {
        Some(expr) => Ok((rest, expr)),
        None => Err(nom::Err::Failure(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        ))),
    }
}

fn call(name: &str, args: Vec<Expr>) -> Option<Expr> {
    let mut args = args.into_iter();
    let first = args.next()?;
    let second = args.next();
    if args.next().is_some() {
        return None;
    }
    let expr = match (name, second) {
        ("log", Some(argument)) => Expr::log(first, argument),
        ("root", Some(radicand)) => Expr::root(first, radicand),
        ("pow", Some(exponent)) => Expr::pow(first, exponent),
        (_, Some(_)) => return None,
        ("sqrt", None) => Expr::sqrt(first),
        ("cbrt", None) => Expr::root(Expr::integer(3), first),
        ("ln", None) => Expr::log(Expr::E, first),
        ("log2", None) => Expr::log(Expr::integer(2), first),
        ("log10", None) => Expr::log(Expr::integer(10), first),
        (name, None) => Expr::trig(trig_function(name)?, first),
    };
    Some(expr)
}

fn trig_function(name: &str) -> Option<TrigFn> {
    let func = match name {
        "sin" => TrigFn::Sin,
        "cos" => TrigFn::Cos,
        "tan" | "tg" => TrigFn::Tan,
        "cot" | "cotg" => TrigFn::Cot,
        "sec" => TrigFn::Sec,
        "csc" => TrigFn::Csc,
        "asin" | "arcsin" => TrigFn::Asin,
        "acos" | "arccos" => TrigFn::Acos,
        "atan" | "arctan" | "arctg" => TrigFn::Atan,
        "acot" | "arccot" | "arccotg" => TrigFn::Acot,
        "asec" | "arcsec" => TrigFn::Asec,
        "acsc" | "arccsc" => TrigFn::Acsc,
        _ => return None,
    };
    Some(func)
}

fn parse_int(input: &str) -> ParseResult<'_, BigInt> {
    map_res(ws(digit1), |s: &str| s.parse::<BigInt>())(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_minus_wraps_power() {
        let parsed = parse_expr("-x^2").expect("parses");
        assert_eq!(parsed, Expr::neg(Expr::pow(Expr::var("x"), Expr::integer(2))));
    }

    #[test]
    fn negative_literal_is_rational() {
        assert_eq!(parse_expr("-3").expect("parses"), Expr::integer(-3));
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert!(matches!(parse_expr("foo(1)"), Err(SolverError::Parse(_))));
    }
}
