use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::SymbolExpr,
        statements::{
            AssignmentStmt, BlockStmt, ClassDeclStmt, ConditionalBranch, Declarator,
            ExpressionStmt, FnDeclStmt, ForStmt, ForUpdate, IfStmt, Parameter, PrintStmt,
            RangeForStmt, ReturnStmt, SwitchCase, SwitchStmt, UpdateOperator, VarDeclStmt,
            WhileStmt,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let mut targets = parse_comma_separated(parser)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let values = parse_comma_separated(parser)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assignment(AssignmentStmt { targets, values }));
    }

    if targets.len() != 1 {
        return Err(parser.unexpected("expected `=` after assignment targets"));
    }

    parser.expect(TokenKind::Semicolon)?;

    let expression = targets.remove(0);
    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

/// One or more expressions separated by commas, with no closing token.
fn parse_comma_separated(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut items = vec![parse_expr(parser, BindingPower::Default)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        items.push(parse_expr(parser, BindingPower::Default)?);
    }

    Ok(items)
}

fn parse_declarator(parser: &mut Parser) -> Result<Declarator, Error> {
    let error = parser.unexpected("expected identifier during variable declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let explicit_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Declarator::new(&name, explicit_type))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let is_constant = parser.advance().kind == TokenKind::Const;

    let mut declarators = vec![parse_declarator(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        declarators.push(parse_declarator(parser)?);
    }

    let values = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        parse_comma_separated(parser)?
    } else {
        vec![]
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        is_constant,
        declarators,
        values,
    }))
}

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let error = parser.unexpected("expected parameter name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

        let error = parser.unexpected("parameters require a type annotation");
        parser.expect_error(TokenKind::Colon, Some(error))?;

        let mut parameter = Parameter::new(&name, parse_type(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            parameter.default = Some(parse_expr(parser, BindingPower::Default)?);
        }

        parameters.push(parameter);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` after parameter"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parameters)
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let error = parser.unexpected("expected `{` to open a block");
    parser.expect_error(TokenKind::OpenCurly, Some(error))?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}` to close the block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(statements)
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let is_async = parser.current_token_kind() == TokenKind::Async;
    if is_async {
        parser.advance();
    }

    parser.expect(TokenKind::Fn)?;

    let error = parser.unexpected("expected function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let parameters = parse_parameters(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        name,
        id: None,
        parameters,
        return_type,
        is_async,
        body,
    }))
}

pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Class)?;

    let error = parser.unexpected("expected class name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let parameters = if parser.current_token_kind() == TokenKind::OpenParen {
        parse_parameters(parser)?
    } else {
        vec![]
    };

    let body = parse_block(parser)?;

    Ok(Stmt::ClassDecl(ClassDeclStmt {
        name,
        id: None,
        parameters,
        body,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    let mut branches = vec![ConditionalBranch { condition, body }];
    let mut alternate = None;

    while parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        if parser.current_token_kind() == TokenKind::If {
            parser.advance();
            let condition = parse_expr(parser, BindingPower::Default)?;
            let body = parse_block(parser)?;
            branches.push(ConditionalBranch { condition, body });
        } else {
            alternate = Some(parse_block(parser)?);
            break;
        }
    }

    Ok(Stmt::If(IfStmt {
        branches,
        alternate,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::While)?;

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

/// `for (let i: int = 0; test; update) { }` or `for (start ... end) { }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::OpenParen)?;

    if parser.current_token_kind() != TokenKind::Let {
        let start = parse_expr(parser, BindingPower::Default)?;

        let error = parser.unexpected("expected `...` in range loop");
        parser.expect_error(TokenKind::Ellipsis, Some(error))?;

        let end = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        let body = parse_block(parser)?;

        return Ok(Stmt::RangeFor(RangeForStmt { start, end, body }));
    }

    parser.expect(TokenKind::Let)?;
    let index = parse_declarator(parser)?;

    let error = parser.unexpected("loop index requires an initial value");
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let init = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let update = parse_for_update(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        index,
        init,
        test,
        update,
        body,
    }))
}

fn parse_for_update(parser: &mut Parser) -> Result<ForUpdate, Error> {
    let error = parser.unexpected("expected loop variable in update clause");
    let target = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let operator = match parser.current_token_kind() {
        TokenKind::PlusPlus => {
            parser.advance();
            UpdateOperator::Increment
        }
        TokenKind::MinusMinus => {
            parser.advance();
            UpdateOperator::Decrement
        }
        TokenKind::PlusEquals => {
            parser.advance();
            UpdateOperator::Increase(parse_expr(parser, BindingPower::Default)?)
        }
        TokenKind::MinusEquals => {
            parser.advance();
            UpdateOperator::Decrease(parse_expr(parser, BindingPower::Default)?)
        }
        _ => return Err(parser.unexpected("expected `++`, `--`, `+=` or `-=`")),
    };

    Ok(ForUpdate {
        target: SymbolExpr::new(&target),
        operator,
    })
}

/// Statements of one `case`/`default` arm.
fn parse_case_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];

    while !matches!(
        parser.current_token_kind(),
        TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly | TokenKind::EOF
    ) {
        body.push(parse_stmt(parser)?);
    }

    Ok(body)
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Switch)?;

    parser.expect(TokenKind::OpenParen)?;
    let scrutinee = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    let mut default = None;

    while parser.current_token_kind() == TokenKind::Case {
        parser.advance();
        let guard = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon)?;
        let body = parse_case_body(parser)?;
        cases.push(SwitchCase { guard, body });
    }

    if parser.current_token_kind() == TokenKind::Default {
        parser.advance();
        parser.expect(TokenKind::Colon)?;
        default = Some(parse_case_body(parser)?);
    }

    let error = parser.unexpected("expected `case`, `default` or `}` in switch");
    parser.expect_error(TokenKind::CloseCurly, Some(error))?;

    Ok(Stmt::Switch(SwitchStmt {
        scrutinee,
        cases,
        default,
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Break)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Break)
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Continue)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Continue)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Return)?;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt { value }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Print)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt { value }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let body = parse_block(parser)?;
    Ok(Stmt::Block(BlockStmt { body }))
}
