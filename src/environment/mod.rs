//! Interface of the lexical environment collaborator.
//!
//! The front end threads an environment value through traversal but never
//! inspects it; the concrete symbol-table implementation lives in the
//! semantic passes. This module only fixes the operations those passes
//! agree on and the two failure outcomes they report.

use thiserror::Error;

use crate::ast::values::IdentifierValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("identifier {name:?} is already declared in this scope")]
pub struct AlreadyDeclared {
    pub name: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("identifier {name:?} was not found")]
pub struct NotFound {
    pub name: String,
}

/// A lexical scope chain.
///
/// `resolve` starts in the receiver's scope and walks outward; a
/// root-qualified identifier instead resolves from the global scope,
/// regardless of lexical nesting.
pub trait Environment: Sized {
    /// What identifiers resolve to in this environment.
    type Binding;

    /// A fresh scope nested inside this one.
    fn child_scope(&self) -> Self;

    /// Binds `name` in the innermost scope. Rebinding a name already bound
    /// in that scope is an error; shadowing an outer scope is not.
    fn bind(&mut self, name: &str, binding: Self::Binding) -> Result<(), AlreadyDeclared>;

    /// Resolves an identifier path, honoring its root-qualification flag.
    fn resolve(&self, identifier: &IdentifierValue) -> Result<&Self::Binding, NotFound>;
}

#[cfg(test)]
mod tests;
