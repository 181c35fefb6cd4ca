//! Error types and error handling for the compiler.
//!
//! Every stage reports its first failure as an [`errors::Error`] wrapping
//! one [`errors::ErrorImpl`] variant. Variants are grouped by
//! [`errors::ErrorKind`]:
//!
//! - Syntax errors from the lexer and parser, carrying a source position
//! - Declaration errors (duplicate or unknown names)
//! - Type errors (operand, assignment, call and collection mismatches)
//! - Control-flow errors (misplaced break/continue/return)
//! - Configuration errors (unsupported output target)

pub mod errors;

#[cfg(test)]
mod tests;
