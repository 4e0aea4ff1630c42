//! The parser cursor and the parse entry points.
//!
//! The [`Parser`] owns the source buffer, the current byte offset and the
//! coordinate origin. Grammar rules are free functions over it, split by
//! node category:
//!
//! - `stmt.rs` - statement alternations and their commit points
//! - `expr.rs` - the expression precedence ladder and value forms
//! - `types.rs` - type expressions, attributes and declaration units
//!
//! Rule functions return [`RuleResult`]: `Ok(Some(node))` on a match,
//! `Ok(None)` when the alternative did not apply (cursor restored, ordered
//! choice moves on), `Err` when a rule failed past its commit point.

use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::statements::Statement;
use crate::errors::errors::{ParseError, ParseErrorImpl};
use crate::{Position, Span};

use super::stmt::parse_top_level_statements;

lazy_static! {
    static ref SYMBOL: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref INTEGER: Regex = Regex::new("^[+-]?[0-9]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new("^//[^\n]*").unwrap();
}

/// Outcome of one grammar rule: matched, not applicable, or hard failure.
pub type RuleResult<T> = Result<Option<T>, ParseError>;

/// The parser state: a byte cursor over one source buffer.
pub struct Parser<'src> {
    /// The source buffer being parsed
    source: &'src str,
    /// Current byte offset into the buffer
    pos: usize,
    /// Coordinate origin added to every reported position
    origin: u32,
    /// The name of the source buffer being parsed
    file: Rc<String>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, file: Option<String>) -> Self {
        Parser::with_origin(source, file, 0)
    }

    /// Creates a parser whose reported positions start at `origin` instead
    /// of zero, for buffers that are slices of a larger input.
    pub fn with_origin(source: &'src str, file: Option<String>, origin: u32) -> Self {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Parser {
            source,
            pos: 0,
            origin,
            file: file_name,
        }
    }

    /// Returns the current position in the source buffer.
    pub fn get_position(&self) -> Position {
        Position(self.origin + self.pos as u32, Rc::clone(&self.file))
    }

    /// Records the cursor so a failed alternative can restore it.
    pub fn save(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, saved: usize) {
        self.pos = saved;
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Consumes whitespace and `//` line comments. Never applied inside
    /// symbol runs, literal bodies or escape sequences.
    pub fn skip(&mut self) {
        loop {
            if let Some(matched) = WHITESPACE.find(self.remainder()) {
                self.pos += matched.end();
                continue;
            }
            if let Some(matched) = LINE_COMMENT.find(self.remainder()) {
                self.pos += matched.end();
                continue;
            }
            break;
        }
    }

    /// Skips, then returns the position a rule starts matching at.
    pub fn mark(&mut self) -> Position {
        self.skip();
        self.get_position()
    }

    /// The span from a rule's start mark to the cursor.
    pub fn span_from(&self, start: &Position) -> Span {
        Span {
            start: start.clone(),
            end: self.get_position(),
        }
    }

    /// Tries to consume a literal token. Soft: leaves the cursor unmoved on
    /// a mismatch.
    pub fn lit(&mut self, token: &str) -> bool {
        self.skip();
        self.lit_no_skip(token)
    }

    /// Literal matching without the leading skip, for no-skip contexts.
    pub fn lit_no_skip(&mut self, token: &str) -> bool {
        if self.remainder().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Tries to consume a keyword: the word itself, not followed by a
    /// symbol character, so `val` does not match the head of `value`.
    pub fn keyword(&mut self, word: &str) -> bool {
        self.skip();
        if !self.remainder().starts_with(word) {
            return false;
        }
        let follows = self.remainder()[word.len()..].chars().next();
        if follows.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
        self.pos += word.len();
        true
    }

    /// Requires a literal token past a commit point.
    pub fn expect_lit(&mut self, token: &str, rule: &'static str) -> Result<(), ParseError> {
        if self.lit(token) {
            Ok(())
        } else {
            Err(self.expected(rule, format!("`{}`", token)))
        }
    }

    /// Builds the hard error for a failed expectation at the cursor.
    pub fn expected(&mut self, rule: &'static str, expected: String) -> ParseError {
        self.skip();
        ParseError::new(
            rule,
            ParseErrorImpl::Expected { expected },
            self.get_position(),
        )
    }

    /// Matches a symbol run at the cursor, in no-skip mode.
    pub fn match_symbol(&mut self) -> Option<String> {
        let matched = SYMBOL.find(self.remainder())?;
        let text = matched.as_str().to_string();
        self.pos += matched.end();
        Some(text)
    }

    /// Matches an optionally signed decimal run at the cursor, in no-skip
    /// mode. Range checking happens at the literal rule.
    pub fn match_integer(&mut self) -> Option<String> {
        let matched = INTEGER.find(self.remainder())?;
        let text = matched.as_str().to_string();
        self.pos += matched.end();
        Some(text)
    }
}

/// Parses a source buffer into the program's top-level statement sequence.
///
/// This is the main entry point. Trailing input that matches no top-level
/// alternative is a hard error for the `program` rule.
pub fn parse_program(source: &str, file: Option<String>) -> Result<Vec<Statement>, ParseError> {
    parse_program_at(source, file, 0)
}

/// Like [`parse_program`], with an explicit coordinate origin for all
/// reported positions.
pub fn parse_program_at(
    source: &str,
    file: Option<String>,
    origin: u32,
) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::with_origin(source, file, origin);

    let statements = parse_top_level_statements(&mut parser)?;

    parser.skip();
    if !parser.at_eof() {
        return Err(ParseError::new(
            "program",
            ParseErrorImpl::TrailingInput,
            parser.get_position(),
        ));
    }

    Ok(statements)
}
