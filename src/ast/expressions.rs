use crate::Span;

use super::ast::ExpressionKind;
use super::values::{IdentifierValue, Value};

/// The closed set of expression node variants.
#[derive(Debug, Clone)]
pub enum Expression {
    Term(TermExpression),
    BinaryOperator(BinaryOperatorExpression),
    Call(CallExpression),
    ElementSelector(ElementSelectorExpression),
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Term(_) => ExpressionKind::TermExpression,
            Expression::BinaryOperator(_) => ExpressionKind::BinaryOperatorExpression,
            Expression::Call(_) => ExpressionKind::CallExpression,
            Expression::ElementSelector(_) => ExpressionKind::ElementSelectorExpression,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Expression::Term(expression) => &expression.span,
            Expression::BinaryOperator(expression) => &expression.span,
            Expression::Call(expression) => &expression.span,
            Expression::ElementSelector(expression) => &expression.span,
        }
    }
}

/// Term Expression
/// Wraps a single value as an expression.
#[derive(Debug, Clone)]
pub struct TermExpression {
    pub value: Value,
    pub span: Span,
}

/// Binary Operator Expression
///
/// The operator is kept as its source symbol (`"="`, `"=="`, `"+"`, ...);
/// overload resolution happens in later passes, not here.
#[derive(Debug, Clone)]
pub struct BinaryOperatorExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

/// Call Expression
#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

/// Element Selector Expression
/// Member access: `base.selector`.
#[derive(Debug, Clone)]
pub struct ElementSelectorExpression {
    pub base: Box<Expression>,
    pub selector: IdentifierValue,
    pub span: Span,
}
