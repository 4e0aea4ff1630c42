//! Expression grammar: seven precedence levels, from assignment at the
//! loosest down through equality, less-than, additive, multiplicative and
//! a pass-through unary level, to postfix selector/call folding over
//! primary expressions. Every binary level left-folds its operator pairs,
//! so all operators chain left-associatively, including `=` and `==`.

use crate::ast::expressions::{
    BinaryOperatorExpression, CallExpression, ElementSelectorExpression, Expression,
    TermExpression,
};
use crate::ast::values::{IdentifierValue, Literal, LiteralValue, PathSegment, Value};
use crate::errors::errors::{ParseError, ParseErrorImpl};
use crate::{Position, Span};

use super::parser::{Parser, RuleResult};

pub fn parse_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_assignment_expression(parser)
}

/// Requires an expression past a commit point.
pub fn expect_expression(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<Expression, ParseError> {
    match parse_expression(parser)? {
        Some(expression) => Ok(expression),
        None => Err(parser.expected(rule, String::from("an expression"))),
    }
}

/// One binary level: parse a sub-expression at the next-tighter level, then
/// left-fold zero or more `(operator, next-tighter)` pairs onto it. A
/// matched operator whose right operand fails is unwound and ends the fold.
fn parse_binary_level(
    parser: &mut Parser,
    operators: &[&str],
    next_level: fn(&mut Parser) -> RuleResult<Expression>,
) -> RuleResult<Expression> {
    let start = parser.mark();
    let Some(mut left) = next_level(parser)? else {
        return Ok(None);
    };

    'fold: loop {
        let saved = parser.save();
        for &operator in operators {
            if !parser.lit(operator) {
                continue;
            }
            match next_level(parser)? {
                Some(right) => {
                    left = Expression::BinaryOperator(BinaryOperatorExpression {
                        operator: String::from(operator),
                        left: Box::new(left),
                        right: Box::new(right),
                        span: parser.span_from(&start),
                    });
                    continue 'fold;
                }
                None => {
                    parser.restore(saved);
                    break 'fold;
                }
            }
        }
        break;
    }

    Ok(Some(left))
}

fn parse_assignment_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_binary_level(parser, &["="], parse_equality_expression)
}

fn parse_equality_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_binary_level(parser, &["=="], parse_less_than_expression)
}

fn parse_less_than_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_binary_level(parser, &["<"], parse_additive_expression)
}

fn parse_additive_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_binary_level(parser, &["+", "-"], parse_multiplicative_expression)
}

fn parse_multiplicative_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_binary_level(parser, &["*", "/", "%"], parse_unary_expression)
}

// No prefix operators in the grammar; the level exists so the hierarchy
// keeps its place for them.
fn parse_unary_expression(parser: &mut Parser) -> RuleResult<Expression> {
    parse_postfix_expression(parser)
}

/// Folds a primary expression through trailing `.selector` and `(args)`
/// suffixes, left to right.
fn parse_postfix_expression(parser: &mut Parser) -> RuleResult<Expression> {
    let start = parser.mark();
    let Some(mut expression) = parse_primary_expression(parser)? else {
        return Ok(None);
    };

    loop {
        let saved = parser.save();
        if parser.lit(".") {
            match parse_selector_identifier(parser) {
                Some(selector) => {
                    expression = Expression::ElementSelector(ElementSelectorExpression {
                        base: Box::new(expression),
                        selector,
                        span: parser.span_from(&start),
                    });
                    continue;
                }
                None => {
                    parser.restore(saved);
                    break;
                }
            }
        }
        if let Some(arguments) = parse_argument_list(parser)? {
            expression = Expression::Call(CallExpression {
                callee: Box::new(expression),
                arguments,
                span: parser.span_from(&start),
            });
            continue;
        }
        break;
    }

    Ok(Some(expression))
}

/// The identifier after a selector dot. A second leading dot marks a
/// root-qualified selector.
fn parse_selector_identifier(parser: &mut Parser) -> Option<IdentifierValue> {
    let saved = parser.save();
    parser.skip();
    let start = parser.get_position();
    let root_qualified = parser.lit_no_skip(".");
    parser.skip();
    match parser.match_symbol() {
        Some(name) => Some(IdentifierValue {
            segments: vec![PathSegment::Symbol { name }],
            root_qualified,
            span: parser.span_from(&start),
        }),
        None => {
            parser.restore(saved);
            None
        }
    }
}

/// `( )` or `( expression (, expression)* )`.
pub fn parse_argument_list(parser: &mut Parser) -> RuleResult<Vec<Expression>> {
    let saved = parser.save();
    if !parser.lit("(") {
        return Ok(None);
    }

    let mut arguments = Vec::new();
    if parser.lit(")") {
        return Ok(Some(arguments));
    }

    match parse_expression(parser)? {
        Some(expression) => arguments.push(expression),
        None => {
            parser.restore(saved);
            return Ok(None);
        }
    }
    loop {
        let comma_saved = parser.save();
        if !parser.lit(",") {
            break;
        }
        match parse_expression(parser)? {
            Some(expression) => arguments.push(expression),
            None => {
                parser.restore(comma_saved);
                break;
            }
        }
    }

    if !parser.lit(")") {
        parser.restore(saved);
        return Ok(None);
    }
    Ok(Some(arguments))
}

/// Primary expressions: a value form wrapped in a term expression, or a
/// parenthesized sub-expression. Literal alternatives come before
/// identifier forms so `true` and `false` stay boolean literals.
fn parse_primary_expression(parser: &mut Parser) -> RuleResult<Expression> {
    let start = parser.mark();

    let value = match parse_integer_literal(parser)? {
        Some(value) => Some(value),
        None => match parse_boolean_literal(parser) {
            Some(value) => Some(value),
            None => match parse_string_literal(parser)? {
                Some(value) => Some(value),
                None => parse_identifier_value(parser),
            },
        },
    };
    if let Some(value) = value {
        return Ok(Some(Expression::Term(TermExpression {
            value,
            span: parser.span_from(&start),
        })));
    }

    let saved = parser.save();
    if parser.lit("(") {
        if let Some(expression) = parse_expression(parser)? {
            if parser.lit(")") {
                return Ok(Some(expression));
            }
        }
        parser.restore(saved);
    }

    Ok(None)
}

/// Decimal integer, optional sign, 32-bit signed range. A decimal run that
/// overflows the range is a syntax error, not a backtracking signal.
fn parse_integer_literal(parser: &mut Parser) -> RuleResult<Value> {
    parser.skip();
    let start = parser.get_position();
    let Some(text) = parser.match_integer() else {
        return Ok(None);
    };

    match text.parse::<i32>() {
        Ok(value) => Ok(Some(Value::Literal(LiteralValue {
            literal: Literal::Int32(value),
            span: parser.span_from(&start),
        }))),
        Err(_) => Err(ParseError::new(
            "integer_literal",
            ParseErrorImpl::IntegerOutOfRange { literal: text },
            start,
        )),
    }
}

fn parse_boolean_literal(parser: &mut Parser) -> Option<Value> {
    parser.skip();
    let start = parser.get_position();
    let literal = if parser.keyword("true") {
        true
    } else if parser.keyword("false") {
        false
    } else {
        return None;
    };
    Some(Value::Literal(LiteralValue {
        literal: Literal::Boolean(literal),
        span: parser.span_from(&start),
    }))
}

fn parse_string_literal(parser: &mut Parser) -> RuleResult<Value> {
    parser.skip();
    let start = parser.get_position();
    let Some((content, span)) = parse_string_literal_sequence(parser, start)? else {
        return Ok(None);
    };
    Ok(Some(Value::Literal(LiteralValue {
        literal: Literal::String(content),
        span,
    })))
}

/// The raw double-quoted sequence, shared with extern linkage names.
///
/// Body characters are taken verbatim in no-skip mode. `\n` is the one
/// recognized escape; any other backslash sequence passes through as two
/// literal characters, and any `"` ends the body. Reaching end of input
/// before the closing quote is a hard error at the opening quote.
pub fn parse_string_literal_sequence(
    parser: &mut Parser,
    start: Position,
) -> RuleResult<(String, Span)> {
    if !parser.lit_no_skip("\"") {
        return Ok(None);
    }

    let mut content = String::new();
    loop {
        let Some(c) = parser.peek() else {
            return Err(ParseError::new(
                "string_literal",
                ParseErrorImpl::UnterminatedString,
                start,
            ));
        };
        if c == '"' {
            parser.advance_n(1);
            break;
        }
        if c == '\\' && parser.remainder()[1..].starts_with('n') {
            content.push('\n');
            parser.advance_n(2);
            continue;
        }
        content.push(c);
        parser.advance_n(c.len_utf8());
    }

    let span = parser.span_from(&start);
    Ok(Some((content, span)))
}

/// An identifier used as a value: optional leading `.` (root
/// qualification) and a single path segment. Dotted chains in expression
/// position are element selectors, handled at the postfix level.
fn parse_identifier_value(parser: &mut Parser) -> Option<Value> {
    let saved = parser.save();
    parser.skip();
    let start = parser.get_position();
    let root_qualified = parser.lit_no_skip(".");
    parser.skip();
    match parser.match_symbol() {
        Some(name) => Some(Value::Identifier(IdentifierValue {
            segments: vec![PathSegment::Symbol { name }],
            root_qualified,
            span: parser.span_from(&start),
        })),
        None => {
            parser.restore(saved);
            None
        }
    }
}

/// A bare single-segment identifier, as used for declared names.
pub fn parse_single_identifier(parser: &mut Parser) -> Option<IdentifierValue> {
    parser.skip();
    let start = parser.get_position();
    let name = parser.match_symbol()?;
    Some(IdentifierValue::single(name, parser.span_from(&start)))
}

pub fn expect_single_identifier(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<IdentifierValue, ParseError> {
    match parse_single_identifier(parser) {
        Some(identifier) => Ok(identifier),
        None => Err(parser.expected(rule, String::from("an identifier"))),
    }
}

/// A dotted identifier path as used in type position: optional leading `.`
/// for root qualification, then one or more segments joined by `.`.
pub fn parse_nested_identifier(parser: &mut Parser) -> Option<IdentifierValue> {
    let saved = parser.save();
    parser.skip();
    let start = parser.get_position();
    let root_qualified = parser.lit_no_skip(".");
    parser.skip();

    let mut segments = Vec::new();
    match parser.match_symbol() {
        Some(name) => segments.push(PathSegment::Symbol { name }),
        None => {
            parser.restore(saved);
            return None;
        }
    }

    loop {
        let dot_saved = parser.save();
        if !parser.lit(".") {
            break;
        }
        parser.skip();
        match parser.match_symbol() {
            Some(name) => segments.push(PathSegment::Symbol { name }),
            None => {
                parser.restore(dot_saved);
                break;
            }
        }
    }

    Some(IdentifierValue {
        segments,
        root_qualified,
        span: parser.span_from(&start),
    })
}
