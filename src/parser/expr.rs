use crate::{
    ast::{
        ast::{Expr, ExprKind},
        expressions::{
            BinaryOperator, CallExpr, Literal, MemberExpr, PrefixOperator, SubscriptExpr,
            SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind).copied() {
        Some(nud) => nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(next_bp) = parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&parser.current_token_kind()).copied() {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Comma separated expressions up to (not including) `closing`. A trailing
/// comma is accepted.
pub fn parse_expr_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != closing {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != closing {
            return Err(parser.unexpected(&format!("expected `,` or closing `{}`", closing)));
        }
    }

    Ok(items)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.get_position();
    let token = parser.advance().clone();

    let literal = match token.kind {
        TokenKind::Number => match token.value.parse::<i64>() {
            Ok(value) => Literal::Integer(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    position,
                ))
            }
        },
        TokenKind::LongNumber => Literal::Long(token.value),
        TokenKind::String => Literal::String(token.value),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        TokenKind::Null => Literal::Null,
        TokenKind::Identifier => return Ok(Expr::symbol(&token.value)),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                position,
            ))
        }
    };

    Ok(Expr::new(ExprKind::Literal(literal)))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let position = parser.get_position();
    let operator_token = parser.advance().clone();

    let operator = BinaryOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            position,
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::binary(left, operator, right))
}

/// `^` associates to the right.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Caret)?;
    let right = parse_expr(parser, BindingPower::Multiplicative)?;

    Ok(Expr::binary(left, BinaryOperator::Power, right))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.get_position();
    let operator_token = parser.advance().clone();

    let operator = PrefixOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            position,
        )
    })?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::prefix(operator, operand))
}

pub fn parse_await_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::Await)?;
    let position = parser.get_position();
    let mut operand = parse_expr(parser, BindingPower::Unary)?;

    match &mut operand.kind {
        ExprKind::Call(call) => {
            call.awaited = true;
            Ok(operand)
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: String::from("await"),
                message: String::from("`await` must be applied to a call"),
            },
            position,
        )),
    }
}

/// `( e )` groups, `( e, ... )` and `()` build tuples.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(Expr::new(ExprKind::Tuple(vec![])));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(first);
    }

    parser.advance();
    let mut members = vec![first];
    members.extend(parse_expr_list(parser, TokenKind::CloseParen)?);
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(ExprKind::Tuple(members)))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(ExprKind::Array(elements)))
}

/// `{}` is an empty dict; `{k: v, ...}` a dict; `{e, ...}` a set.
pub fn parse_curly_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    if parser.current_token_kind() == TokenKind::CloseCurly {
        parser.advance();
        return Ok(Expr::new(ExprKind::Dict(vec![])));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Colon {
        let mut elements = vec![first];
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            elements.extend(parse_expr_list(parser, TokenKind::CloseCurly)?);
        }
        parser.expect(TokenKind::CloseCurly)?;
        return Ok(Expr::new(ExprKind::Set(elements)));
    }

    parser.expect(TokenKind::Colon)?;
    let mut entries = vec![(first, parse_expr(parser, BindingPower::Default)?)];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }

        let key = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon)?;
        let value = parse_expr(parser, BindingPower::Default)?;
        entries.push((key, value));
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::new(ExprKind::Dict(entries)))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(ExprKind::Call(CallExpr::new(left, arguments))))
}

pub fn parse_subscript_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(ExprKind::Subscript(SubscriptExpr {
        base: Box::new(left),
        index: Box::new(index),
    })))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;

    let error = parser.unexpected("expected member name after `.`");
    let member = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Expr::new(ExprKind::Member(MemberExpr {
        object: Box::new(left),
        member: SymbolExpr::new(&member.value),
    })))
}
