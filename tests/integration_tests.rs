//! Integration tests for the language front end.
//!
//! These tests drive the full pipeline: source text through the parser into
//! an AST, then visitor passes threading environments over the finished
//! tree, with diagnostics collected through the sink interface.

use std::collections::HashMap;

use frontend::ast::expressions::{BinaryOperatorExpression, Expression, TermExpression};
use frontend::ast::statements::{
    ClassDefinitionStatement, ClassFunctionDefinitionStatement,
    ClassVariableDeclarationStatement, ExternFunctionDeclarationStatement,
    FunctionDefinitionStatement, Statement, VariableDeclarationStatement,
};
use frontend::ast::values::{IdentifierValue, Literal, LiteralValue};
use frontend::environment::{AlreadyDeclared, Environment, NotFound};
use frontend::errors::errors::{Diagnostic, DiagnosticSink, Severity};
use frontend::parser::parser::parse_program;
use frontend::visitor::visitor::{TreeVisitor, ValueEnvPair};

const SAMPLE_PROGRAM: &str = r#"
extern def print(val :string) :int "c_print";

class Point(val x :int, val y :int) {
    def magnitude() :int {
        return x * x + y * y;
    }
    val origin = 0;
}

def main() :int {
    val p = 3;
    while (p < 10) {
        p = p + 1;
    }
    if (p == 10) {
        return p;
    } else {
        return 0;
    }
}
"#;

#[test]
fn test_parse_sample_program() {
    let statements = parse_program(SAMPLE_PROGRAM, Some(String::from("sample.lang"))).unwrap();
    assert_eq!(statements.len(), 3);

    assert!(matches!(
        statements[0],
        Statement::ExternFunctionDeclaration(_)
    ));
    assert!(matches!(statements[1], Statement::ClassDefinition(_)));
    assert!(matches!(statements[2], Statement::FunctionDefinition(_)));
}

/// Collects every declared name in source order, threading the accumulator
/// through the environment parameter.
#[derive(Default)]
struct DeclarationCollector;

impl TreeVisitor for DeclarationCollector {
    type Env = Vec<String>;
    type Value = ();

    fn visit_extern_function_declaration_statement(
        &mut self,
        statement: &ExternFunctionDeclarationStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        env.push(format!("extern {}", statement.identifier.path_string()));
        env
    }

    fn visit_class_definition_statement(
        &mut self,
        statement: &ClassDefinitionStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        env.push(format!("class {}", statement.identifier.path_string()));
        self.visit_statements(&statement.statements, env)
    }

    fn visit_class_function_definition_statement(
        &mut self,
        statement: &ClassFunctionDefinitionStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        env.push(format!("method {}", statement.identifier.path_string()));
        self.visit_statements(&statement.statements, env)
    }

    fn visit_class_variable_declaration_statement(
        &mut self,
        statement: &ClassVariableDeclarationStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        if let Some(name) = &statement.declaration.decl_unit.name {
            env.push(format!("field {}", name.path_string()));
        }
        env
    }

    fn visit_function_definition_statement(
        &mut self,
        statement: &FunctionDefinitionStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        env.push(format!("def {}", statement.identifier.path_string()));
        self.visit_statements(&statement.statements, env)
    }

    fn visit_variable_declaration_statement(
        &mut self,
        statement: &VariableDeclarationStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        if let Some(name) = &statement.declaration.decl_unit.name {
            env.push(format!("val {}", name.path_string()));
        }
        env
    }
}

#[test]
fn test_declaration_collector_pass() {
    let statements = parse_program(SAMPLE_PROGRAM, Some(String::from("sample.lang"))).unwrap();

    let mut visitor = DeclarationCollector;
    let names = visitor.visit_statements(&statements, Vec::new());

    assert_eq!(
        names,
        vec![
            String::from("extern print"),
            String::from("class Point"),
            String::from("method magnitude"),
            String::from("field origin"),
            String::from("def main"),
            String::from("val p"),
        ]
    );
}

/// A constant-folding visitor over literal arithmetic.
struct Evaluator;

impl TreeVisitor for Evaluator {
    type Env = ();
    type Value = i32;

    fn visit_term_expression(
        &mut self,
        expression: &TermExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        expression.value.dispatch(self, env)
    }

    fn visit_literal_value(
        &mut self,
        value: &LiteralValue,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        match value.literal {
            Literal::Int32(v) => ValueEnvPair::new(v, env),
            _ => ValueEnvPair::absent(env),
        }
    }

    fn visit_binary_operator_expression(
        &mut self,
        expression: &BinaryOperatorExpression,
        env: Self::Env,
    ) -> ValueEnvPair<Self::Value, Self::Env> {
        let left = expression.left.dispatch(self, env);
        let right = expression.right.dispatch(self, left.env);
        let (Some(l), Some(r)) = (left.value, right.value) else {
            return ValueEnvPair::absent(());
        };
        let value = match expression.operator.as_str() {
            "+" => l + r,
            "-" => l - r,
            "*" => l * r,
            "/" => l / r,
            "%" => l % r,
            "<" => (l < r) as i32,
            "==" => (l == r) as i32,
            _ => return ValueEnvPair::absent(()),
        };
        ValueEnvPair::new(value, ())
    }
}

fn first_return_expression(statements: &[Statement]) -> &Expression {
    let Statement::FunctionDefinition(function) = &statements[0] else {
        panic!("expected function definition");
    };
    let Statement::Return(statement) = &function.statements[0] else {
        panic!("expected return statement");
    };
    &statement.expression
}

#[test]
fn test_expression_evaluator_pass() {
    let statements = parse_program(
        "def main() { return (1+2)*3+4; }",
        Some(String::from("eval.lang")),
    )
    .unwrap();

    let expression = first_return_expression(&statements);
    let result = expression.dispatch(&mut Evaluator, ());
    assert_eq!(result.value, Some(13));
}

#[test]
fn test_left_folded_chains_evaluate_left_to_right() {
    let statements = parse_program(
        "def main() { return 10-4-3; }",
        Some(String::from("eval.lang")),
    )
    .unwrap();

    // (10-4)-3, not 10-(4-3).
    let expression = first_return_expression(&statements);
    let result = expression.dispatch(&mut Evaluator, ());
    assert_eq!(result.value, Some(3));
}

/// A scope chain of the shape semantic passes plug in behind the
/// `Environment` interface.
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

/// Binds declarations into a scope chain and reports duplicates through the
/// diagnostics sink.
struct BindingPass<'a> {
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl TreeVisitor for BindingPass<'_> {
    type Env = LexicalScope;
    type Value = ();

    fn visit_function_definition_statement(
        &mut self,
        statement: &FunctionDefinitionStatement,
        env: Self::Env,
    ) -> Self::Env {
        // The body binds into a child scope; the enclosing scope flows on.
        let inner = env.child_scope();
        self.visit_statements(&statement.statements, inner);
        env
    }

    fn visit_variable_declaration_statement(
        &mut self,
        statement: &VariableDeclarationStatement,
        mut env: Self::Env,
    ) -> Self::Env {
        let Some(name) = &statement.declaration.decl_unit.name else {
            return env;
        };
        if let Err(error) = env.bind(&name.path_string(), 0) {
            self.diagnostics.report(Diagnostic {
                message: error.to_string(),
                position: statement.span.start.clone(),
                severity: Severity::Error,
            });
        }
        env
    }
}

#[test]
fn test_binding_pass_reports_duplicate_declarations() {
    let statements = parse_program(
        "def main() { val x = 1; val y = 2; val x = 3; }",
        Some(String::from("bind.lang")),
    )
    .unwrap();

    let mut diagnostics = Vec::new();
    let mut pass = BindingPass {
        diagnostics: &mut diagnostics,
    };
    pass.visit_statements(&statements, LexicalScope::default());

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("x"));
}

#[test]
fn test_independent_visitors_share_one_tree() {
    let statements = parse_program(
        "def main() { return 2*3; }",
        Some(String::from("shared.lang")),
    )
    .unwrap();

    let names = DeclarationCollector.visit_statements(&statements, Vec::new());
    let value = first_return_expression(&statements)
        .dispatch(&mut Evaluator, ())
        .value;

    assert_eq!(names, vec![String::from("def main")]);
    assert_eq!(value, Some(6));
}

#[test]
fn test_parse_error_surfaces_as_diagnostic() {
    let error = parse_program("def f() { return ; }", Some(String::from("bad.lang")))
        .unwrap_err();

    let mut sink: Vec<Diagnostic> = Vec::new();
    sink.report(error.to_diagnostic());

    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].severity, Severity::Error);
    assert!(sink[0].message.contains("return_statement"));
    assert_eq!(sink[0].position.0, error.position().0);
}
