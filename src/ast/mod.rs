/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root, statement/expression unions, type annotations
/// - expressions: Definitions for the expression node kinds and operators
/// - statements: Definitions for the statement node kinds
/// - types: The type descriptors and the rules relating them
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
