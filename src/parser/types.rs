//! Type expressions, type attributes and declaration units.

use crate::ast::types::{
    CompiletimeReturnTypeExpression, ModifiabilityKind, ParameterList, QualityKind,
    TypeAttributes, TypeExpression, TypeIdentifierExpression, ValueInitializerUnit,
    VariableDeclaration, VariableDeclarationUnit,
};
use crate::errors::errors::ParseError;

use super::expr::{
    expect_expression, expect_single_identifier, parse_nested_identifier, parse_single_identifier,
};
use super::parser::{Parser, RuleResult};

/// `val` or `ref`. The first element of every declaration; matching it is
/// the declaration's commit point.
pub fn parse_quality_specifier(parser: &mut Parser) -> Option<QualityKind> {
    if parser.keyword("val") {
        Some(QualityKind::Val)
    } else if parser.keyword("ref") {
        Some(QualityKind::Ref)
    } else {
        None
    }
}

/// Attributes trailing a type identifier: a quality and a modifiability
/// word, each optional, each at most once, in either order.
pub fn parse_type_attributes(parser: &mut Parser) -> TypeAttributes {
    let mut attributes = TypeAttributes::default();
    loop {
        if attributes.quality.is_none() {
            if parser.keyword("val") {
                attributes.quality = Some(QualityKind::Val);
                continue;
            }
            if parser.keyword("ref") {
                attributes.quality = Some(QualityKind::Ref);
                continue;
            }
        }
        if attributes.modifiability.is_none() {
            if parser.keyword("mutable") {
                attributes.modifiability = Some(ModifiabilityKind::Mutable);
                continue;
            }
            if parser.keyword("const") {
                attributes.modifiability = Some(ModifiabilityKind::Const);
                continue;
            }
            if parser.keyword("immutable") {
                attributes.modifiability = Some(ModifiabilityKind::Immutable);
                continue;
            }
        }
        break;
    }
    attributes
}

pub fn parse_type_expression(parser: &mut Parser) -> RuleResult<TypeExpression> {
    if let Some(expression) = parse_type_identifier_expression(parser)? {
        return Ok(Some(expression));
    }
    if let Some(expression) = parse_compiletime_return_type_expression(parser)? {
        return Ok(Some(expression));
    }
    Ok(None)
}

fn parse_type_identifier_expression(parser: &mut Parser) -> RuleResult<TypeExpression> {
    let start = parser.mark();
    let Some(identifier) = parse_nested_identifier(parser) else {
        return Ok(None);
    };
    let attributes = parse_type_attributes(parser);
    Ok(Some(TypeExpression::TypeIdentifier(
        TypeIdentifierExpression {
            identifier,
            attributes,
            span: parser.span_from(&start),
        },
    )))
}

/// `^expression`: the type is whatever the expression evaluates to at
/// compile time. The `^` is the commit point.
fn parse_compiletime_return_type_expression(parser: &mut Parser) -> RuleResult<TypeExpression> {
    let start = parser.mark();
    if !parser.lit("^") {
        return Ok(None);
    }
    let expression = expect_expression(parser, "compiletime_return_type_expression")?;
    Ok(Some(TypeExpression::CompiletimeReturnType(
        CompiletimeReturnTypeExpression {
            expression: Box::new(expression),
            span: parser.span_from(&start),
        },
    )))
}

/// `: type_expression`. Optional in most positions; the `:` commits.
pub fn parse_type_specifier(parser: &mut Parser) -> RuleResult<TypeExpression> {
    if !parser.lit(":") {
        return Ok(None);
    }
    match parse_type_expression(parser)? {
        Some(expression) => Ok(Some(expression)),
        None => Err(parser.expected("type_specifier", String::from("a type expression"))),
    }
}

pub fn expect_type_specifier(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<TypeExpression, ParseError> {
    match parse_type_specifier(parser)? {
        Some(expression) => Ok(expression),
        None => Err(parser.expected(rule, String::from("`:`"))),
    }
}

/// `= expr`, `:type` or `= expr :type`; at least one half is present.
/// Required wherever it appears, so failure here is always hard.
pub fn expect_value_initializer_unit(
    parser: &mut Parser,
) -> Result<ValueInitializerUnit, ParseError> {
    let initializer = if parser.lit("=") {
        Some(expect_expression(parser, "value_initializer_unit")?)
    } else {
        None
    };
    let type_expression = parse_type_specifier(parser)?;

    if initializer.is_none() && type_expression.is_none() {
        return Err(parser.expected("value_initializer_unit", String::from("`=` or `:`")));
    }

    Ok(ValueInitializerUnit {
        initializer,
        type_expression,
    })
}

/// A declaration in statement position: quality, then a named declaration
/// unit. Everything after the quality keyword is committed.
pub fn parse_variable_declaration(parser: &mut Parser) -> RuleResult<VariableDeclaration> {
    let Some(kind) = parse_quality_specifier(parser) else {
        return Ok(None);
    };

    let name = expect_single_identifier(parser, "variable_declaration_unit")?;
    let init_unit = expect_value_initializer_unit(parser)?;

    Ok(Some(VariableDeclaration {
        kind,
        decl_unit: VariableDeclarationUnit {
            name: Some(name),
            init_unit,
        },
    }))
}

/// A declaration in parameter position: the declared name is optional, the
/// initializer unit is not.
fn parse_parameter_variable_declaration(parser: &mut Parser) -> RuleResult<VariableDeclaration> {
    let Some(kind) = parse_quality_specifier(parser) else {
        return Ok(None);
    };

    let name = parse_single_identifier(parser);
    let init_unit = expect_value_initializer_unit(parser)?;

    Ok(Some(VariableDeclaration {
        kind,
        decl_unit: VariableDeclarationUnit { name, init_unit },
    }))
}

/// `( )` or `( declaration (, declaration)* )`. Soft at the list level,
/// so the enclosing rule decides whether a missing list is fatal; commits
/// inside each declaration still propagate.
pub fn parse_parameter_variable_declaration_list(
    parser: &mut Parser,
) -> RuleResult<ParameterList> {
    let saved = parser.save();
    if !parser.lit("(") {
        return Ok(None);
    }

    let mut parameters = Vec::new();
    if parser.lit(")") {
        return Ok(Some(parameters));
    }

    loop {
        match parse_parameter_variable_declaration(parser)? {
            Some(declaration) => parameters.push(declaration),
            None => {
                parser.restore(saved);
                return Ok(None);
            }
        }
        if !parser.lit(",") {
            break;
        }
    }

    if !parser.lit(")") {
        parser.restore(saved);
        return Ok(None);
    }
    Ok(Some(parameters))
}

pub fn expect_parameter_variable_declaration_list(
    parser: &mut Parser,
    rule: &'static str,
) -> Result<ParameterList, ParseError> {
    match parse_parameter_variable_declaration_list(parser)? {
        Some(parameters) => Ok(parameters),
        None => Err(parser.expected(rule, String::from("a parameter list"))),
    }
}
