/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Per-category node kind enums
/// - expressions: Definitions for the expression node variants
/// - statements: Definitions for the statement node variants
/// - types: Type expressions, attributes and declaration units
/// - values: Literal, identifier and symbol values
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod values;
