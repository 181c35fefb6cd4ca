use super::{
    ast::{DeclId, Expr, Stmt, TypeExpr},
    expressions::SymbolExpr,
    types::Type,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

/// One name introduced by a declaration. `id` and `ty` are filled in by the
/// type checker.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub explicit_type: Option<TypeExpr>,
    pub id: Option<DeclId>,
    pub ty: Option<Type>,
}

impl Declarator {
    pub fn new(name: &str, explicit_type: Option<TypeExpr>) -> Self {
        Declarator {
            name: name.to_string(),
            explicit_type,
            id: None,
            ty: None,
        }
    }
}

/// `let a: int, b = 1, "x";` / `const c = 2;`
///
/// `values` is either empty (no initializer) or positionally matched to
/// `declarators`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub is_constant: bool,
    pub declarators: Vec<Declarator>,
    pub values: Vec<Expr>,
}

/// `a, b = b, a;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub targets: Vec<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: TypeExpr,
    pub default: Option<Expr>,
    pub id: Option<DeclId>,
    pub ty: Option<Type>,
}

impl Parameter {
    pub fn new(name: &str, type_annotation: TypeExpr) -> Self {
        Parameter {
            name: name.to_string(),
            type_annotation,
            default: None,
            id: None,
            ty: None,
        }
    }
}

/// Function declaration. A missing return annotation means the function
/// returns `none`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub id: Option<DeclId>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeExpr>,
    pub is_async: bool,
    pub body: Vec<Stmt>,
}

/// Class declaration. `parameters` belong to the constructor; `body` holds
/// the member declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclStmt {
    pub name: String,
    pub id: Option<DeclId>,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// `if` with any number of `else if` branches and an optional `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<ConditionalBranch>,
    pub alternate: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
    Increase(Expr),
    Decrease(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForUpdate {
    pub target: SymbolExpr,
    pub operator: UpdateOperator,
}

/// `for (let i: int = 0; i < n; i++) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub index: Declarator,
    pub init: Expr,
    pub test: Expr,
    pub update: ForUpdate,
    pub body: Vec<Stmt>,
}

/// `for (start ... end) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeForStmt {
    pub start: Expr,
    pub end: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub guard: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub scrutinee: Expr,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}
