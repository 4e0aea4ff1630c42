//! Unit tests for error handling.
//!
//! This module contains tests for parse error construction and the
//! diagnostics record shape.

use std::rc::Rc;

use crate::errors::errors::{
    Diagnostic, DiagnosticSink, ParseError, ParseErrorImpl, Severity,
};
use crate::Position;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new(String::from("test.lang")))
}

#[test]
fn test_error_carries_rule_and_position() {
    let error = ParseError::new(
        "return_statement",
        ParseErrorImpl::Expected {
            expected: String::from("an expression"),
        },
        position(42),
    );

    assert_eq!(error.rule(), "return_statement");
    assert_eq!(error.position().0, 42);
    assert_eq!(error.expected(), "an expression");
    assert_eq!(error.get_error_name(), "Expected");
}

#[test]
fn test_error_display_names_the_rule() {
    let error = ParseError::new(
        "expression_statement",
        ParseErrorImpl::Expected {
            expected: String::from("`;`"),
        },
        position(3),
    );

    let message = error.to_string();
    assert!(message.contains("expression_statement"));
    assert!(message.contains("`;`"));
}

#[test]
fn test_unterminated_string_error() {
    let error = ParseError::new("string_literal", ParseErrorImpl::UnterminatedString, position(7));

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.expected(), "a closing `\"`");
}

#[test]
fn test_integer_out_of_range_error() {
    let error = ParseError::new(
        "integer_literal",
        ParseErrorImpl::IntegerOutOfRange {
            literal: String::from("999999999999"),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "IntegerOutOfRange");
    assert!(error.to_string().contains("999999999999"));
}

#[test]
fn test_trailing_input_error() {
    let error = ParseError::new("program", ParseErrorImpl::TrailingInput, position(10));

    assert_eq!(error.get_error_name(), "TrailingInput");
    assert_eq!(error.expected(), "end of input");
}

#[test]
fn test_error_to_diagnostic() {
    let error = ParseError::new(
        "if_statement",
        ParseErrorImpl::Expected {
            expected: String::from("`)`"),
        },
        position(12),
    );

    let diagnostic = error.to_diagnostic();
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.position.0, 12);
    assert!(diagnostic.message.contains("if_statement"));
}

#[test]
fn test_vec_collects_diagnostics() {
    let mut sink: Vec<Diagnostic> = Vec::new();

    sink.report(Diagnostic {
        message: String::from("first"),
        position: position(1),
        severity: Severity::Warning,
    });
    sink.report(Diagnostic {
        message: String::from("second"),
        position: position(2),
        severity: Severity::Note,
    });

    assert_eq!(sink.len(), 2);
    assert_eq!(sink[0].message, "first");
    assert_eq!(sink[1].severity, Severity::Note);
}
