use std::fmt::Display;

use super::{
    expressions::{
        BinaryExpr, BinaryOperator, CallExpr, Literal, MemberExpr, PrefixExpr, PrefixOperator,
        SubscriptExpr, SymbolExpr,
    },
    statements::{
        AssignmentStmt, BlockStmt, ClassDeclStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt,
        PrintStmt, RangeForStmt, ReturnStmt, SwitchStmt, VarDeclStmt, WhileStmt,
    },
    types::Type,
};

/// Identity of one declaration site, assigned by the type checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub u32);

/// What an identifier reference was bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Declared(DeclId),
    /// Standard library binding, rendered under its native target name
    Builtin(&'static str),
}

/// Root of one compilation unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    FnDecl(FnDeclStmt),
    ClassDecl(ClassDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    RangeFor(RangeForStmt),
    Switch(SwitchStmt),
    Break,
    Continue,
    Return(ReturnStmt),
    Print(PrintStmt),
    Block(BlockStmt),
}

/// An expression node plus the type slot filled in by the type checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Call(CallExpr),
    Subscript(SubscriptExpr),
    Member(MemberExpr),
    Array(Vec<Expr>),
    Set(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    Tuple(Vec<Expr>),
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, ty: None }
    }

    /// Returns the analyzed type, if the type checker has visited this node.
    pub fn get_type(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    pub fn integer(value: i64) -> Self {
        Expr::new(ExprKind::Literal(Literal::Integer(value)))
    }

    pub fn long(digits: &str) -> Self {
        Expr::new(ExprKind::Literal(Literal::Long(digits.to_string())))
    }

    pub fn string(value: &str) -> Self {
        Expr::new(ExprKind::Literal(Literal::String(value.to_string())))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::new(ExprKind::Literal(Literal::Boolean(value)))
    }

    pub fn null() -> Self {
        Expr::new(ExprKind::Literal(Literal::Null))
    }

    pub fn symbol(name: &str) -> Self {
        Expr::new(ExprKind::Symbol(SymbolExpr::new(name)))
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::new(ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    pub fn prefix(operator: PrefixOperator, operand: Expr) -> Self {
        Expr::new(ExprKind::Prefix(PrefixExpr {
            operator,
            operand: Box::new(operand),
        }))
    }

    /// Short description used when an error names this expression.
    pub fn describe(&self) -> String {
        match &self.kind {
            ExprKind::Literal(_) => String::from("a literal"),
            ExprKind::Symbol(symbol) => format!("`{}`", symbol.name),
            ExprKind::Binary(binary) => format!("a `{}` expression", binary.operator),
            ExprKind::Prefix(prefix) => format!("a `{}` expression", prefix.operator),
            ExprKind::Call(_) => String::from("a call"),
            ExprKind::Subscript(_) => String::from("a subscript"),
            ExprKind::Member(member) => format!("member `{}`", member.member.name),
            ExprKind::Array(_) => String::from("an array literal"),
            ExprKind::Set(_) => String::from("a set literal"),
            ExprKind::Dict(_) => String::from("a dict literal"),
            ExprKind::Tuple(_) => String::from("a tuple literal"),
        }
    }
}

/// Type annotation as written in source, resolved by the type checker.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Named(String),
    Generic {
        name: String,
        arguments: Vec<TypeExpr>,
    },
    Nullable(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Named(name.to_string())
    }

    pub fn generic(name: &str, arguments: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            name: name.to_string(),
            arguments,
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Generic { name, arguments } => {
                write!(f, "{}<", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ">")
            }
            TypeExpr::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}
