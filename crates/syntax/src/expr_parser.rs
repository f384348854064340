//! A `nom`-based parser for the embedded expression language.

use crate::expr::{BinaryOp, Expr, ExprKind, UnaryOp};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while},
    character::complete::{alpha1, char, multispace0},
    combinator::{map, not, opt, recognize},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated},
};
use thiserror::Error;

/// Failure to parse one embedded expression. The enclosing source location is
/// attached by the component parser, which knows where the expression sits.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ExprSyntaxError {
    pub message: String,
}

// --- Main Public Parser ---

pub fn parse_expression(input: &str) -> Result<Expr, ExprSyntaxError> {
    let trimmed = input.trim();
    match expression(trimmed) {
        Ok(("", kind)) => {
            validate_assign_targets(&kind)?;
            Ok(Expr {
                raw: trimmed.to_string(),
                kind,
            })
        }
        Ok((rem, _)) => Err(ExprSyntaxError {
            message: format!("unexpected trailing input '{}'", rem),
        }),
        Err(e) => Err(ExprSyntaxError {
            message: e.to_string(),
        }),
    }
}

/// Assignment targets must be plain identifier/member paths; anything else
/// (a literal, a call result) cannot be written back by the runtime.
fn validate_assign_targets(kind: &ExprKind) -> Result<(), ExprSyntaxError> {
    match kind {
        ExprKind::Assign { target, value } => {
            if !is_path(target) {
                return Err(ExprSyntaxError {
                    message: "assignment target must be an identifier or member path".to_string(),
                });
            }
            validate_assign_targets(value)
        }
        ExprKind::Unary { operand, .. } => validate_assign_targets(operand),
        ExprKind::Binary { lhs, rhs, .. } => {
            validate_assign_targets(lhs)?;
            validate_assign_targets(rhs)
        }
        ExprKind::Call { callee, args } => {
            validate_assign_targets(callee)?;
            args.iter().try_for_each(validate_assign_targets)
        }
        ExprKind::Member { object, .. } => validate_assign_targets(object),
        _ => Ok(()),
    }
}

fn is_path(kind: &ExprKind) -> bool {
    match kind {
        ExprKind::Ident(_) => true,
        ExprKind::Member { object, .. } => is_path(object),
        _ => false,
    }
}

// --- Combinators ---

fn expression(input: &str) -> IResult<&str, ExprKind> {
    ws(assignment).parse(input)
}

fn assignment(input: &str) -> IResult<&str, ExprKind> {
    let (input, lhs) = or_expr(input)?;
    // A single `=` that is not the start of `==`.
    let (input, eq) = opt(ws(terminated(char('='), not(char('='))))).parse(input)?;
    match eq {
        Some(_) => {
            let (input, rhs) = assignment(input)?;
            Ok((
                input,
                ExprKind::Assign {
                    target: Box::new(lhs),
                    value: Box::new(rhs),
                },
            ))
        }
        None => Ok((input, lhs)),
    }
}

fn binary_chain<'a>(
    mut next: impl FnMut(&'a str) -> IResult<&'a str, ExprKind>,
    ops: impl Fn(&'a str) -> IResult<&'a str, BinaryOp>,
    input: &'a str,
) -> IResult<&'a str, ExprKind> {
    let (input, first) = next(input)?;
    let (input, rest) = many0(pair(ws(ops), next)).parse(input)?;
    let folded = rest.into_iter().fold(first, |lhs, (op, rhs)| ExprKind::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    });
    Ok((input, folded))
}

fn or_expr(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(and_expr, |i| map(tag("||"), |_| BinaryOp::Or).parse(i), input)
}

fn and_expr(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(
        equality,
        |i| map(tag("&&"), |_| BinaryOp::And).parse(i),
        input,
    )
}

fn equality(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(
        comparison,
        |i| {
            alt((
                map(tag("=="), |_| BinaryOp::Eq),
                map(tag("!="), |_| BinaryOp::Ne),
            ))
            .parse(i)
        },
        input,
    )
}

fn comparison(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(
        additive,
        |i| {
            alt((
                map(tag("<="), |_| BinaryOp::Le),
                map(tag(">="), |_| BinaryOp::Ge),
                map(tag("<"), |_| BinaryOp::Lt),
                map(tag(">"), |_| BinaryOp::Gt),
            ))
            .parse(i)
        },
        input,
    )
}

fn additive(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(
        multiplicative,
        |i| {
            alt((
                map(char('+'), |_| BinaryOp::Add),
                map(char('-'), |_| BinaryOp::Sub),
            ))
            .parse(i)
        },
        input,
    )
}

fn multiplicative(input: &str) -> IResult<&str, ExprKind> {
    binary_chain(
        unary,
        |i| {
            alt((
                map(char('*'), |_| BinaryOp::Mul),
                map(char('/'), |_| BinaryOp::Div),
            ))
            .parse(i)
        },
        input,
    )
}

fn unary(input: &str) -> IResult<&str, ExprKind> {
    alt((
        map(preceded(ws(char('!')), unary), |operand| ExprKind::Unary {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }),
        map(preceded(ws(char('-')), unary), |operand| ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }),
        postfix,
    ))
    .parse(input)
}

/// Member access and call suffixes bind tightest: `a.b(c).d`.
fn postfix(input: &str) -> IResult<&str, ExprKind> {
    enum Suffix {
        Member(String),
        Call(Vec<ExprKind>),
    }

    let member = map(preceded(char('.'), identifier), |name| {
        Suffix::Member(name.to_string())
    });
    let call = map(
        delimited(
            char('('),
            separated_list0(ws(char(',')), expression),
            char(')'),
        ),
        Suffix::Call,
    );

    let (input, base) = ws(primary).parse(input)?;
    let (input, suffixes) = many0(alt((member, call))).parse(input)?;

    let folded = suffixes.into_iter().fold(base, |acc, suffix| match suffix {
        Suffix::Member(property) => ExprKind::Member {
            object: Box::new(acc),
            property,
        },
        Suffix::Call(args) => ExprKind::Call {
            callee: Box::new(acc),
            args,
        },
    });
    Ok((input, folded))
}

fn primary(input: &str) -> IResult<&str, ExprKind> {
    alt((
        string_literal,
        map(double, ExprKind::Number),
        delimited(ws(char('(')), expression, ws(char(')'))),
        ident_or_keyword,
    ))
    .parse(input)
}

// --- Leaf Parsers ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn ident_or_keyword(input: &str) -> IResult<&str, ExprKind> {
    map(identifier, |name| match name {
        "true" => ExprKind::Bool(true),
        "false" => ExprKind::Bool(false),
        _ => ExprKind::Ident(name.to_string()),
    })
    .parse(input)
}

fn string_literal(input: &str) -> IResult<&str, ExprKind> {
    alt((
        map(
            delimited(char('\''), opt(is_not("'")), char('\'')),
            |s: Option<&str>| ExprKind::Str(s.unwrap_or_default().to_string()),
        ),
        map(
            delimited(char('"'), opt(is_not("\"")), char('"')),
            |s: Option<&str>| ExprKind::Str(s.unwrap_or_default().to_string()),
        ),
    ))
    .parse(input)
}

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arithmetic_precedence() {
        let expr = parse_expression("count * 2 + 1").unwrap();
        match expr.kind {
            ExprKind::Binary {
                op: BinaryOp::Add,
                lhs,
                ..
            } => match *lhs {
                ExprKind::Binary {
                    op: BinaryOp::Mul, ..
                } => {}
                other => panic!("expected Mul on lhs, got {:?}", other),
            },
            other => panic!("expected Add at root, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_member_path() {
        let expr = parse_expression("item.name").unwrap();
        match expr.kind {
            ExprKind::Member { object, property } => {
                assert_eq!(*object, ExprKind::Ident("item".to_string()));
                assert_eq!(property, "name");
            }
            other => panic!("expected Member, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment() {
        let expr = parse_expression("count = count + 1").unwrap();
        assert!(matches!(expr.kind, ExprKind::Assign { .. }));
        assert_eq!(expr.raw, "count = count + 1");
    }

    #[test]
    fn test_parse_call_with_args() {
        let expr = parse_expression("signal(0)").unwrap();
        let args = expr.kind.is_call_to("signal").expect("call to signal");
        assert_eq!(args, &[ExprKind::Number(0.0)]);
    }

    #[test]
    fn test_equality_is_not_assignment() {
        let expr = parse_expression("count == 0").unwrap();
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_assignment_to_literal_rejected() {
        assert!(parse_expression("1 = 2").is_err());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse_expression("count +").is_err());
    }
}
