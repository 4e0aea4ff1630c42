//! Unit tests for the environment interface, exercised through a minimal
//! scope-chain implementation of the kind a semantic pass would provide.

use std::collections::HashMap;

use crate::ast::values::{IdentifierValue, PathSegment};
use crate::Span;

use super::{AlreadyDeclared, Environment, NotFound};

#[derive(Clone, Default)]
struct LexicalScope {
    bindings: HashMap<String, u32>,
    parent: Option<Box<LexicalScope>>,
}

impl LexicalScope {
    fn root(&self) -> &LexicalScope {
        let mut scope = self;
        while let Some(parent) = &scope.parent {
            scope = parent;
        }
        scope
    }
}

impl Environment for LexicalScope {
    type Binding = u32;

    fn child_scope(&self) -> Self {
        LexicalScope {
            bindings: HashMap::new(),
            parent: Some(Box::new(self.clone())),
        }
    }

    fn bind(&mut self, name: &str, binding: u32) -> Result<(), AlreadyDeclared> {
        if self.bindings.contains_key(name) {
            return Err(AlreadyDeclared {
                name: String::from(name),
            });
        }
        self.bindings.insert(String::from(name), binding);
        Ok(())
    }

    fn resolve(&self, identifier: &IdentifierValue) -> Result<&u32, NotFound> {
        let name = identifier.segments[0].name();
        let not_found = NotFound {
            name: String::from(name),
        };

        if identifier.root_qualified {
            return self.root().bindings.get(name).ok_or(not_found);
        }

        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(binding) = current.bindings.get(name) {
                return Ok(binding);
            }
            scope = current.parent.as_deref();
        }
        Err(not_found)
    }
}

fn identifier(name: &str) -> IdentifierValue {
    IdentifierValue::single(String::from(name), Span::null())
}

fn root_identifier(name: &str) -> IdentifierValue {
    IdentifierValue {
        segments: vec![PathSegment::Symbol {
            name: String::from(name),
        }],
        root_qualified: true,
        span: Span::null(),
    }
}

#[test]
fn test_bind_and_resolve() {
    let mut global = LexicalScope::default();
    global.bind("x", 1).unwrap();

    assert_eq!(global.resolve(&identifier("x")).unwrap(), &1);
}

#[test]
fn test_resolve_walks_outward() {
    let mut global = LexicalScope::default();
    global.bind("x", 1).unwrap();

    let inner = global.child_scope();
    assert_eq!(inner.resolve(&identifier("x")).unwrap(), &1);
}

#[test]
fn test_shadowing_is_not_a_rebind() {
    let mut global = LexicalScope::default();
    global.bind("x", 1).unwrap();

    let mut inner = global.child_scope();
    inner.bind("x", 2).unwrap();

    assert_eq!(inner.resolve(&identifier("x")).unwrap(), &2);
}

#[test]
fn test_root_qualified_resolution_skips_lexical_scopes() {
    let mut global = LexicalScope::default();
    global.bind("x", 1).unwrap();

    let mut inner = global.child_scope();
    inner.bind("x", 2).unwrap();

    assert_eq!(inner.resolve(&root_identifier("x")).unwrap(), &1);
}

#[test]
fn test_resolve_reports_not_found() {
    let global = LexicalScope::default();
    let error = global.resolve(&identifier("missing")).unwrap_err();
    assert_eq!(error, NotFound { name: String::from("missing") });
}

#[test]
fn test_rebind_reports_already_declared() {
    let mut global = LexicalScope::default();
    global.bind("x", 1).unwrap();

    let error = global.bind("x", 2).unwrap_err();
    assert_eq!(error, AlreadyDeclared { name: String::from("x") });
}
