//! Type annotation parsing.
//!
//! Supports named types (`int`, `Point`), generic constructors
//! (`array<int>`, `dict<string, int>`), the nullable suffix `T?` and the
//! array suffix `T[]`. Like expressions, annotations are parsed with NUD/LED
//! handlers and binding powers.

use std::collections::HashMap;

use crate::{
    ast::ast::TypeExpr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeExpr, Error>;
pub type TypeLEDHandler = fn(&mut Parser, TypeExpr, BindingPower) -> Result<TypeExpr, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
    parser.type_led(TokenKind::Question, BindingPower::Call, parse_nullable_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;

    if parser.current_token_kind() != TokenKind::Less {
        return Ok(TypeExpr::Named(name));
    }

    parser.advance();
    let mut arguments = vec![parse_type(parser, BindingPower::Default)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        arguments.push(parse_type(parser, BindingPower::Default)?);
    }

    let error = parser.unexpected("expected `>` to close the type arguments");
    parser.expect_error(TokenKind::Greater, Some(error))?;

    Ok(TypeExpr::Generic { name, arguments })
}

/// `T[]` is sugar for `array<T>`.
pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeExpr,
    _bp: BindingPower,
) -> Result<TypeExpr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeExpr::generic("array", vec![left]))
}

pub fn parse_nullable_type(
    parser: &mut Parser,
    left: TypeExpr,
    _bp: BindingPower,
) -> Result<TypeExpr, Error> {
    parser.expect(TokenKind::Question)?;
    Ok(TypeExpr::Nullable(Box::new(left)))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeExpr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a type"),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    while let Some(next_bp) = parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        if next_bp <= bp {
            break;
        }

        let led = match parser
            .get_type_led_lookup()
            .get(&parser.current_token_kind())
            .copied()
        {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}
