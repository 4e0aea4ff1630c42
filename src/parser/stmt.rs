//! Statement grammar: the top-level, class-body and flow-statement
//! alternations, in their normative ordered-choice order.

use crate::ast::statements::{
    BlockStatement, ClassDefinitionStatement, ClassFunctionDefinitionStatement,
    ClassVariableDeclarationStatement, EmptyStatement, ExpressionStatement,
    ExternFunctionDeclarationStatement, FunctionDefinitionStatement, IfStatement, ReturnStatement,
    Statement, VariableDeclarationStatement, WhileStatement,
};
use crate::ast::types::{ParameterList, TypeExpression};
use crate::ast::values::IdentifierValue;
use crate::errors::errors::ParseError;

use super::expr::{
    expect_expression, expect_single_identifier, parse_expression, parse_single_identifier,
    parse_string_literal_sequence,
};
use super::parser::{Parser, RuleResult};
use super::types::{
    expect_parameter_variable_declaration_list, expect_type_specifier, parse_type_specifier,
    parse_parameter_variable_declaration_list, parse_variable_declaration,
};

/// Top level: function definitions, class definitions, extern declarations
/// and empty statements, in that order, until no alternative applies.
pub fn parse_top_level_statements(parser: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    loop {
        if let Some(statement) = parse_function_definition_statement(parser)? {
            statements.push(statement);
            continue;
        }
        if let Some(statement) = parse_class_definition_statement(parser)? {
            statements.push(statement);
            continue;
        }
        if let Some(statement) = parse_extern_statement(parser)? {
            statements.push(statement);
            continue;
        }
        if let Some(statement) = parse_empty_statement(parser)? {
            statements.push(statement);
            continue;
        }
        break;
    }
    Ok(statements)
}

/// Statements allowed inside function and block bodies. The
/// expression-statement alternative must stay last: it is the least
/// specific and would otherwise shadow the keyword-led constructs.
pub fn parse_flow_statement(parser: &mut Parser) -> RuleResult<Statement> {
    if let Some(statement) = parse_variable_declaration_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_while_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_if_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_return_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_flow_block_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_empty_statement(parser)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_expression_statement(parser)? {
        return Ok(Some(statement));
    }
    Ok(None)
}

pub fn parse_flow_statements(parser: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    while let Some(statement) = parse_flow_statement(parser)? {
        statements.push(statement);
    }
    Ok(statements)
}

pub fn parse_empty_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.lit(";") {
        return Ok(None);
    }
    Ok(Some(Statement::Empty(EmptyStatement {
        span: parser.span_from(&start),
    })))
}

pub fn parse_return_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("return") {
        return Ok(None);
    }
    let expression = expect_expression(parser, "return_statement")?;
    parser.expect_lit(";", "return_statement")?;
    Ok(Some(Statement::Return(ReturnStatement {
        expression,
        span: parser.span_from(&start),
    })))
}

pub fn parse_variable_declaration_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    let Some(declaration) = parse_variable_declaration(parser)? else {
        return Ok(None);
    };
    parser.expect_lit(";", "variable_declaration_statement")?;
    Ok(Some(Statement::VariableDeclaration(
        VariableDeclarationStatement {
            declaration,
            span: parser.span_from(&start),
        },
    )))
}

pub fn parse_expression_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    let Some(expression) = parse_expression(parser)? else {
        return Ok(None);
    };
    // A parsed expression commits this alternative; the terminator is no
    // longer optional.
    parser.expect_lit(";", "expression_statement")?;
    Ok(Some(Statement::Expression(ExpressionStatement {
        expression,
        span: parser.span_from(&start),
    })))
}

pub fn parse_if_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("if") {
        return Ok(None);
    }
    parser.expect_lit("(", "if_statement")?;
    let condition = expect_expression(parser, "if_statement")?;
    parser.expect_lit(")", "if_statement")?;
    let then_statement = parse_wrapped_flow_statement(parser, "if_statement")?;
    let else_statement = if parser.keyword("else") {
        Some(Box::new(parse_wrapped_flow_statement(parser, "if_statement")?))
    } else {
        None
    };
    Ok(Some(Statement::If(IfStatement {
        condition,
        then_statement: Box::new(then_statement),
        else_statement,
        span: parser.span_from(&start),
    })))
}

pub fn parse_while_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("while") {
        return Ok(None);
    }
    parser.expect_lit("(", "while_statement")?;
    let condition = expect_expression(parser, "while_statement")?;
    parser.expect_lit(")", "while_statement")?;
    let body = parse_wrapped_flow_statement(parser, "while_statement")?;
    Ok(Some(Statement::While(WhileStatement {
        condition,
        body: Box::new(body),
        span: parser.span_from(&start),
    })))
}

/// `{ flow* }` in statement position. Soft on its own delimiters; hard
/// errors from inner committed statements propagate.
pub fn parse_flow_block_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    let saved = parser.save();
    if !parser.lit("{") {
        return Ok(None);
    }
    let statements = parse_flow_statements(parser)?;
    if !parser.lit("}") {
        parser.restore(saved);
        return Ok(None);
    }
    Ok(Some(Statement::Block(BlockStatement {
        statements,
        span: parser.span_from(&start),
    })))
}

/// The body of an `if` or `while`: any single flow statement, wrapped in a
/// block statement so bodies are uniform for later passes.
fn parse_wrapped_flow_statement(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<Statement, ParseError> {
    let start = parser.mark();
    match parse_flow_statement(parser)? {
        Some(statement) => Ok(Statement::Block(BlockStatement {
            statements: vec![statement],
            span: parser.span_from(&start),
        })),
        None => Err(parser.expected(rule, String::from("a statement"))),
    }
}

/// The required `{ flow* }` after a committed function header.
fn expect_function_body_block(parser: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    parser.expect_lit("{", "function_body_block")?;
    let statements = parse_flow_statements(parser)?;
    parser.expect_lit("}", "function_body_block")?;
    Ok(statements)
}

/// Everything after a committed `def`: name, parameters, optional return
/// type, body block. Shared by the top-level and class-method forms.
fn parse_function_definition_parts(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<
    (
        IdentifierValue,
        ParameterList,
        Option<TypeExpression>,
        Vec<Statement>,
    ),
    ParseError,
> {
    let identifier = expect_single_identifier(parser, rule)?;
    let parameter_list = expect_parameter_variable_declaration_list(parser, rule)?;
    let return_type = parse_type_specifier(parser)?;
    let statements = expect_function_body_block(parser)?;
    Ok((identifier, parameter_list, return_type, statements))
}

pub fn parse_function_definition_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("def") {
        return Ok(None);
    }
    let (identifier, parameter_list, return_type, statements) =
        parse_function_definition_parts(parser, "function_definition_statement")?;
    Ok(Some(Statement::FunctionDefinition(
        FunctionDefinitionStatement {
            identifier,
            parameter_list,
            return_type,
            statements,
            span: parser.span_from(&start),
        },
    )))
}

pub fn parse_class_function_definition_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("def") {
        return Ok(None);
    }
    let (identifier, parameter_list, return_type, statements) =
        parse_function_definition_parts(parser, "class_function_definition_statement")?;
    Ok(Some(Statement::ClassFunctionDefinition(
        ClassFunctionDefinitionStatement {
            identifier,
            parameter_list,
            return_type,
            statements,
            span: parser.span_from(&start),
        },
    )))
}

pub fn parse_class_variable_declaration_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    let Some(declaration) = parse_variable_declaration(parser)? else {
        return Ok(None);
    };
    parser.expect_lit(";", "class_variable_declaration_statement")?;
    Ok(Some(Statement::ClassVariableDeclaration(
        ClassVariableDeclarationStatement {
            declaration,
            span: parser.span_from(&start),
        },
    )))
}

fn parse_class_body_statements(parser: &mut Parser) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    loop {
        if let Some(statement) = parse_class_function_definition_statement(parser)? {
            statements.push(statement);
            continue;
        }
        if let Some(statement) = parse_class_variable_declaration_statement(parser)? {
            statements.push(statement);
            continue;
        }
        if let Some(statement) = parse_empty_statement(parser)? {
            statements.push(statement);
            continue;
        }
        break;
    }
    Ok(statements)
}

fn parse_class_body_block(parser: &mut Parser) -> RuleResult<Vec<Statement>> {
    let saved = parser.save();
    if !parser.lit("{") {
        return Ok(None);
    }
    let statements = parse_class_body_statements(parser)?;
    if !parser.lit("}") {
        parser.restore(saved);
        return Ok(None);
    }
    Ok(Some(statements))
}

/// `class name constructor-parameters? { body }`. Unlike the other
/// keyword-led statements this rule carries no commit point of its own: a
/// structural mismatch unwinds the whole alternative and ordered choice
/// moves on. Hard errors raised inside committed class members still
/// propagate.
pub fn parse_class_definition_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    let saved = parser.save();
    if !parser.keyword("class") {
        return Ok(None);
    }
    let Some(identifier) = parse_single_identifier(parser) else {
        parser.restore(saved);
        return Ok(None);
    };
    let constructor_parameter_list = parse_parameter_variable_declaration_list(parser)?;
    let Some(statements) = parse_class_body_block(parser)? else {
        parser.restore(saved);
        return Ok(None);
    };
    Ok(Some(Statement::ClassDefinition(ClassDefinitionStatement {
        identifier,
        constructor_parameter_list,
        statements,
        span: parser.span_from(&start),
    })))
}

/// `extern def name(params) :type "linkage";` where the linkage string
/// names the foreign symbol. Everything after `extern` is committed.
pub fn parse_extern_statement(parser: &mut Parser) -> RuleResult<Statement> {
    let start = parser.mark();
    if !parser.keyword("extern") {
        return Ok(None);
    }
    if !parser.keyword("def") {
        return Err(parser.expected(
            "extern_function_declaration_statement",
            String::from("`def`"),
        ));
    }
    let identifier = expect_single_identifier(parser, "extern_function_declaration_statement")?;
    let parameter_list = expect_parameter_variable_declaration_list(
        parser,
        "extern_function_declaration_statement",
    )?;
    let return_type = expect_type_specifier(parser, "extern_function_declaration_statement")?;

    parser.skip();
    let literal_start = parser.get_position();
    let extern_symbol_name = match parse_string_literal_sequence(parser, literal_start)? {
        Some((content, _)) => content,
        None => {
            return Err(parser.expected(
                "extern_function_declaration_statement",
                String::from("a string literal"),
            ))
        }
    };

    parser.expect_lit(";", "extern_statement")?;
    Ok(Some(Statement::ExternFunctionDeclaration(
        ExternFunctionDeclarationStatement {
            identifier,
            parameter_list,
            return_type,
            extern_symbol_name,
            span: parser.span_from(&start),
        },
    )))
}
