use tracing::debug;

use crate::ast::ast::{ExpressionKind, NodeKind, StatementKind, TypeExpressionKind, ValueKind};
use crate::ast::expressions::{
    BinaryOperatorExpression, CallExpression, ElementSelectorExpression, Expression,
    TermExpression,
};
use crate::ast::statements::{
    BlockStatement, ClassDefinitionStatement, ClassFunctionDefinitionStatement,
    ClassVariableDeclarationStatement, EmbeddedFunctionDefinitionStatement, EmptyStatement,
    ExpressionStatement, ExternFunctionDeclarationStatement, FunctionDefinitionStatement,
    IfStatement, ReturnStatement, Statement, VariableDeclarationStatement, WhileStatement,
};
use crate::ast::types::{CompiletimeReturnTypeExpression, TypeExpression, TypeIdentifierExpression};
use crate::ast::values::{
    IdentifierValue, LiteralValue, SymbolValue, TemplateInstanceValue, Value,
};
use crate::Span;

/// Result of visiting an expression, value or type-expression node: the
/// (possibly absent) per-node result plus the environment to propagate to
/// the node's parent or sibling continuation.
#[derive(Debug, Clone)]
pub struct ValueEnvPair<V, E> {
    pub value: Option<V>,
    pub env: E,
}

impl<V, E> ValueEnvPair<V, E> {
    pub fn new(value: V, env: E) -> Self {
        ValueEnvPair {
            value: Some(value),
            env,
        }
    }

    /// The fallback shape: no result, environment passed through untouched.
    pub fn absent(env: E) -> Self {
        ValueEnvPair { value: None, env }
    }
}

/// The traversal contract over the AST.
///
/// Statement operations consume the incoming environment and produce the
/// one used by the following sibling statement. Expression, value and
/// type-expression operations return a [`ValueEnvPair`].
///
/// Every operation has a default body implementing the documented fallback:
/// it signals [`unhandled`](TreeVisitor::unhandled) and returns an absent
/// result with the environment unchanged, so a visitor only overrides the
/// cases it cares about and decides for itself whether a missing case
/// matters. Visitors own no nodes; any number of them may walk the same
/// tree, each threading its own environment chain.
pub trait TreeVisitor {
    /// Opaque scope value threaded through the traversal.
    type Env;
    /// Per-node result produced by expression and value operations.
    type Value;

    /// Folds the environment through a statement sequence in order.
    fn visit_statements(&mut self, statements: &[Statement], env: Self::Env) -> Self::Env {
        let mut env = env;
        for statement in statements {
            env = statement.dispatch(self, env);
        }
        env
    }

    // statement

    fn visit_expression_statement(
        &mut self,
        statement: &ExpressionStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ExpressionStatement),
            &statement.span,
        );
        env
    }

    fn visit_empty_statement(&mut self, statement: &EmptyStatement, env: Self::Env) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::EmptyStatement),
            &statement.span,
        );
        env
    }

    fn visit_return_statement(&mut self, statement: &ReturnStatement, env: Self::Env) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ReturnStatement),
            &statement.span,
        );
        env
    }

    fn visit_variable_declaration_statement(
        &mut self,
        statement: &VariableDeclarationStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::VariableDeclarationStatement),
            &statement.span,
        );
        env
    }

    fn visit_class_variable_declaration_statement(
        &mut self,
        statement: &ClassVariableDeclarationStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ClassVariableDeclarationStatement),
            &statement.span,
        );
        env
    }

    fn visit_function_definition_statement(
        &mut self,
        statement: &FunctionDefinitionStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::FunctionDefinitionStatement),
            &statement.span,
        );
        env
    }

    fn visit_embedded_function_definition_statement(
        &mut self,
        statement: &EmbeddedFunctionDefinitionStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::EmbeddedFunctionDefinitionStatement),
            &statement.span,
        );
        env
    }

    fn visit_class_function_definition_statement(
        &mut self,
        statement: &ClassFunctionDefinitionStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ClassFunctionDefinitionStatement),
            &statement.span,
        );
        env
    }

    fn visit_class_definition_statement(
        &mut self,
        statement: &ClassDefinitionStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ClassDefinitionStatement),
            &statement.span,
        );
        env
    }

    fn visit_extern_function_declaration_statement(
        &mut self,
        statement: &ExternFunctionDeclarationStatement,
        env: Self::Env,
    ) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::ExternFunctionDeclarationStatement),
            &statement.span,
        );
        env
    }

    fn visit_block_statement(&mut self, statement: &BlockStatement, env: Self::Env) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::BlockStatement),
            &statement.span,
        );
        env
    }

    fn visit_if_statement(&mut self, statement: &IfStatement, env: Self::Env) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::IfStatement),
            &statement.span,
        );
        env
    }

    fn visit_while_statement(&mut self, statement: &WhileStatement, env: Self::Env) -> Self::Env {
        self.unhandled(
            NodeKind::Statement(StatementKind::WhileStatement),
            &statement.span,
        );
        env
    }

    // expression

    fn visit_term_expression(
        &mut self,
        expression: &TermExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::Expression(ExpressionKind::TermExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    fn visit_binary_operator_expression(
        &mut self,
        expression: &BinaryOperatorExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::Expression(ExpressionKind::BinaryOperatorExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    fn visit_call_expression(
        &mut self,
        expression: &CallExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::Expression(ExpressionKind::CallExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    fn visit_element_selector_expression(
        &mut self,
        expression: &ElementSelectorExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::Expression(ExpressionKind::ElementSelectorExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    // value

    fn visit_literal_value(
        &mut self,
        value: &LiteralValue,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(NodeKind::Value(ValueKind::LiteralValue), &value.span);
        ValueEnvPair::absent(env)
    }

    fn visit_identifier_value(
        &mut self,
        value: &IdentifierValue,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(NodeKind::Value(ValueKind::IdentifierValue), &value.span);
        ValueEnvPair::absent(env)
    }

    fn visit_template_instance_value(
        &mut self,
        value: &TemplateInstanceValue,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::Value(ValueKind::TemplateInstanceValue),
            &value.span,
        );
        ValueEnvPair::absent(env)
    }

    fn visit_symbol_value(
        &mut self,
        value: &SymbolValue,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(NodeKind::Value(ValueKind::SymbolValue), &value.span);
        ValueEnvPair::absent(env)
    }

    // type expression

    fn visit_type_identifier_expression(
        &mut self,
        expression: &TypeIdentifierExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::TypeExpression(TypeExpressionKind::TypeIdentifierExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    fn visit_compiletime_return_type_expression(
        &mut self,
        expression: &CompiletimeReturnTypeExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        self.unhandled(
            NodeKind::TypeExpression(TypeExpressionKind::CompiletimeReturnTypeExpression),
            &expression.span,
        );
        ValueEnvPair::absent(env)
    }

    /// Hook invoked by every default operation body before it returns the
    /// fallback result, naming the node kind the visitor did not implement.
    fn unhandled(&mut self, kind: NodeKind, span: &Span) {
        debug!(
            kind = %kind,
            position = span.start.0,
            "node kind not implemented by visitor"
        );
    }
}

impl Statement {
    /// Resolves this node's variant to the matching visitor operation and
    /// invokes it with `env`.
    pub fn dispatch<V>(&self, visitor: &mut V, env: V::Env) -> V::Env
    where
        V: TreeVisitor + ?Sized,
    {
        match self {
            Statement::Expression(statement) => visitor.visit_expression_statement(statement, env),
            Statement::Empty(statement) => visitor.visit_empty_statement(statement, env),
            Statement::Return(statement) => visitor.visit_return_statement(statement, env),
            Statement::VariableDeclaration(statement) => {
                visitor.visit_variable_declaration_statement(statement, env)
            }
            Statement::ClassVariableDeclaration(statement) => {
                visitor.visit_class_variable_declaration_statement(statement, env)
            }
            Statement::FunctionDefinition(statement) => {
                visitor.visit_function_definition_statement(statement, env)
            }
            Statement::EmbeddedFunctionDefinition(statement) => {
                visitor.visit_embedded_function_definition_statement(statement, env)
            }
            Statement::ClassFunctionDefinition(statement) => {
                visitor.visit_class_function_definition_statement(statement, env)
            }
            Statement::ClassDefinition(statement) => {
                visitor.visit_class_definition_statement(statement, env)
            }
            Statement::ExternFunctionDeclaration(statement) => {
                visitor.visit_extern_function_declaration_statement(statement, env)
            }
            Statement::Block(statement) => visitor.visit_block_statement(statement, env),
            Statement::If(statement) => visitor.visit_if_statement(statement, env),
            Statement::While(statement) => visitor.visit_while_statement(statement, env),
        }
    }
}

impl Expression {
    pub fn dispatch<V>(&self, visitor: &mut V, env: V::Env) -> ValueEnvPair<V::Value, V::Env>
    where
        V: TreeVisitor + ?Sized,
    {
        match self {
            Expression::Term(expression) => visitor.visit_term_expression(expression, env),
            Expression::BinaryOperator(expression) => {
                visitor.visit_binary_operator_expression(expression, env)
            }
            Expression::Call(expression) => visitor.visit_call_expression(expression, env),
            Expression::ElementSelector(expression) => {
                visitor.visit_element_selector_expression(expression, env)
            }
        }
    }
}

impl Value {
    pub fn dispatch<V>(&self, visitor: &mut V, env: V::Env) -> ValueEnvPair<V::Value, V::Env>
    where
        V: TreeVisitor + ?Sized,
    {
        match self {
            Value::Literal(value) => visitor.visit_literal_value(value, env),
            Value::Identifier(value) => visitor.visit_identifier_value(value, env),
            Value::TemplateInstance(value) => visitor.visit_template_instance_value(value, env),
            Value::Symbol(value) => visitor.visit_symbol_value(value, env),
        }
    }
}

impl TypeExpression {
    pub fn dispatch<V>(&self, visitor: &mut V, env: V::Env) -> ValueEnvPair<V::Value, V::Env>
    where
        V: TreeVisitor + ?Sized,
    {
        match self {
            TypeExpression::TypeIdentifier(expression) => {
                visitor.visit_type_identifier_expression(expression, env)
            }
            TypeExpression::CompiletimeReturnType(expression) => {
                visitor.visit_compiletime_return_type_expression(expression, env)
            }
        }
    }
}
