#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod environment;
pub mod errors;
pub mod parser;
pub mod visitor;

extern crate regex;

/// A coordinate in a source buffer: offset from the origin the parser was
/// given, plus the name of the buffer it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// The source region `(start, end)` a node was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}
