use crate::ast::{
    ast::{Expr, ExprKind, Resolution},
    expressions::{BinaryExpr, BinaryOperator, CallExpr, Literal, PrefixExpr, PrefixOperator, SymbolExpr},
    types::Type,
};

use super::compiler::Compiler;

/// Renders `expr` as a JavaScript expression.
pub fn gen_expression(compiler: &mut Compiler, expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(literal) => gen_literal(literal),
        ExprKind::Symbol(symbol) => gen_symbol(compiler, symbol),
        ExprKind::Binary(binary) => gen_binary(compiler, binary),
        ExprKind::Prefix(prefix) => gen_prefix(compiler, prefix),
        ExprKind::Call(call) => gen_call(compiler, call),
        ExprKind::Subscript(subscript) => {
            let base = gen_expression(compiler, &subscript.base);
            let index = gen_expression(compiler, &subscript.index);
            format!("{}[{}]", base, index)
        }
        ExprKind::Member(member) => {
            let object = gen_expression(compiler, &member.object);
            let name = gen_symbol(compiler, &member.member);
            format!("{}.{}", object, name)
        }
        ExprKind::Array(elements) | ExprKind::Tuple(elements) => {
            format!("[{}]", gen_list(compiler, elements))
        }
        ExprKind::Set(elements) => format!("new Set([{}])", gen_list(compiler, elements)),
        ExprKind::Dict(entries) => {
            if entries.is_empty() {
                return String::from("{}");
            }

            let entries = entries
                .iter()
                .map(|(key, value)| {
                    let key = gen_expression(compiler, key);
                    let value = gen_expression(compiler, value);
                    format!("{}: {}", key, value)
                })
                .collect::<Vec<_>>();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

/// Comma separated rendering of `exprs`.
pub fn gen_list(compiler: &mut Compiler, exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|expr| gen_expression(compiler, expr))
        .collect::<Vec<_>>()
        .join(", ")
}

fn gen_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(value) => value.to_string(),
        Literal::Long(digits) => format!("{}n", digits),
        Literal::String(value) => quote(value),
        Literal::Boolean(value) => value.to_string(),
        Literal::Null => String::from("null"),
    }
}

/// Double-quoted string literal using the escapes the lexer accepts.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

pub fn gen_symbol(compiler: &mut Compiler, symbol: &SymbolExpr) -> String {
    match &symbol.resolution {
        Some(Resolution::Declared(id)) => compiler.mangle(Some(*id), &symbol.name),
        Some(Resolution::Builtin(native)) => native.to_string(),
        None => symbol.name.clone(),
    }
}

fn gen_binary(compiler: &mut Compiler, binary: &BinaryExpr) -> String {
    let left = gen_expression(compiler, &binary.left);
    let right = gen_expression(compiler, &binary.right);

    let operator = match binary.operator {
        BinaryOperator::Power => "**",
        BinaryOperator::Equals => "===",
        BinaryOperator::NotEquals => "!==",
        operator => operator.symbol(),
    };
    let rendered = format!("({} {} {})", left, operator, right);

    // Integer division truncates
    if binary.operator == BinaryOperator::Divide && binary.left.get_type() == Some(&Type::Integer) {
        return format!("Math.trunc({})", rendered);
    }

    rendered
}

fn gen_prefix(compiler: &mut Compiler, prefix: &PrefixExpr) -> String {
    let operand = gen_expression(compiler, &prefix.operand);

    if prefix.operator == PrefixOperator::Plus && prefix.operand.get_type() == Some(&Type::Long) {
        return format!("({})", operand);
    }

    format!("({}{})", prefix.operator.symbol(), operand)
}

fn gen_call(compiler: &mut Compiler, call: &CallExpr) -> String {
    let callee = gen_expression(compiler, &call.callee);
    let arguments = gen_list(compiler, &call.arguments);

    let rendered = if call.is_constructor {
        format!("new {}({})", callee, arguments)
    } else {
        format!("{}({})", callee, arguments)
    };

    if call.awaited {
        format!("(await {})", rendered)
    } else {
        rendered
    }
}
