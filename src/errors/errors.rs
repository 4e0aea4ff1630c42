use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A syntax error raised past a commit point.
///
/// Carries the name of the grammar rule that failed, what that rule
/// expected, and the input position at the point of failure. A parse either
/// produces a complete tree or one of these; no partial tree is ever handed
/// to later passes.
#[derive(Debug, Clone)]
pub struct ParseError {
    rule: &'static str,
    internal_error: ParseErrorImpl,
    position: Position,
}

impl ParseError {
    pub fn new(rule: &'static str, error_impl: ParseErrorImpl, position: Position) -> Self {
        ParseError {
            rule,
            internal_error: error_impl,
            position,
        }
    }

    /// The grammar rule that was being parsed when the error was raised.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// A description of what the failing rule expected at the error position.
    pub fn expected(&self) -> String {
        match &self.internal_error {
            ParseErrorImpl::Expected { expected } => expected.clone(),
            ParseErrorImpl::UnterminatedString => String::from("a closing `\"`"),
            ParseErrorImpl::IntegerOutOfRange { .. } => {
                String::from("a 32-bit signed integer literal")
            }
            ParseErrorImpl::TrailingInput => String::from("end of input"),
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ParseErrorImpl::Expected { .. } => "Expected",
            ParseErrorImpl::UnterminatedString => "UnterminatedString",
            ParseErrorImpl::IntegerOutOfRange { .. } => "IntegerOutOfRange",
            ParseErrorImpl::TrailingInput => "TrailingInput",
        }
    }

    /// Converts the error into the record shape diagnostics sinks receive.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            message: format!("{}", self),
            position: self.position.clone(),
            severity: Severity::Error,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error in {}: {}", self.rule, self.internal_error)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorImpl {
    #[error("expected {expected}")]
    Expected { expected: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("integer literal {literal:?} does not fit in 32 bits")]
    IntegerOutOfRange { literal: String },
    #[error("expected end of input")]
    TrailingInput,
}

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// One record handed to a diagnostics sink, for both parse errors and
/// visitor-reported issues.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub position: Position,
    pub severity: Severity,
}

/// Receiver for diagnostic records. How records are rendered or stored is
/// the sink's business.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
