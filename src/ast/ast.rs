use std::fmt::Display;

/// Statement Kinds
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StatementKind {
    ExpressionStatement,
    EmptyStatement,
    ReturnStatement,
    VariableDeclarationStatement,
    ClassVariableDeclarationStatement,
    FunctionDefinitionStatement,
    EmbeddedFunctionDefinitionStatement,
    ClassFunctionDefinitionStatement,
    ClassDefinitionStatement,
    ExternFunctionDeclarationStatement,
    BlockStatement,
    IfStatement,
    WhileStatement,
}

/// Expression Kinds
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExpressionKind {
    TermExpression,
    BinaryOperatorExpression,
    CallExpression,
    ElementSelectorExpression,
}

/// Value Kinds
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ValueKind {
    LiteralValue,
    IdentifierValue,
    TemplateInstanceValue,
    SymbolValue,
}

/// Type Expression Kinds
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TypeExpressionKind {
    TypeIdentifierExpression,
    CompiletimeReturnTypeExpression,
}

/// A single tag covering every concrete node variant, across all four node
/// categories. Used by the visitor core to name a node whose case a visitor
/// did not implement.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeKind {
    Statement(StatementKind),
    Expression(ExpressionKind),
    Value(ValueKind),
    TypeExpression(TypeExpressionKind),
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Statement(kind) => write!(f, "{:?}", kind),
            NodeKind::Expression(kind) => write!(f, "{:?}", kind),
            NodeKind::Value(kind) => write!(f, "{:?}", kind),
            NodeKind::TypeExpression(kind) => write!(f, "{:?}", kind),
        }
    }
}
