use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

use super::ast::{Expr, Resolution};

// LITERALS

/// Literal values. Long literals keep their digits as written since the
/// type is unbounded.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Long(String),
    String(String),
    Boolean(bool),
    Null,
}

/// Identifier reference. `resolution` is filled in by the type checker.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
    pub resolution: Option<Resolution>,
}

impl SymbolExpr {
    pub fn new(name: &str) -> Self {
        SymbolExpr {
            name: name.to_string(),
            resolution: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    And,
    Or,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::Caret => BinaryOperator::Power,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEquals => BinaryOperator::LessEquals,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEquals,
            TokenKind::Equals => BinaryOperator::Equals,
            TokenKind::NotEquals => BinaryOperator::NotEquals,
            _ => return None,
        })
    }

    /// Source spelling of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "^",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
    Negate,
    Plus,
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Not => Some(PrefixOperator::Not),
            TokenKind::Dash => Some(PrefixOperator::Negate),
            TokenKind::Plus => Some(PrefixOperator::Plus),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Negate => "-",
            PrefixOperator::Plus => "+",
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub operand: Box<Expr>,
}

/// Call Expression
///
/// `awaited` comes from the source; `is_constructor` is set by the type
/// checker when the callee names a class.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub awaited: bool,
    pub is_constructor: bool,
}

impl CallExpr {
    pub fn new(callee: Expr, arguments: Vec<Expr>) -> Self {
        CallExpr {
            callee: Box::new(callee),
            arguments,
            awaited: false,
            is_constructor: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub base: Box<Expr>,
    pub index: Box<Expr>,
}

/// Member access `object.member`. The member is resolved as an ordinary
/// identifier of the surrounding scope.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub member: SymbolExpr,
}
