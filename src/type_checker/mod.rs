//! Type checking and semantic analysis module.
//!
//! Walks the syntax tree once, in place:
//!
//! - Resolves every identifier through the scope chain
//! - Computes and records a type for every expression
//! - Checks declarations, assignments, calls and control flow
//!
//! Analysis stops at the first violation.

pub mod builtins;
pub mod environment;
pub mod expr;
pub mod stmt;
pub mod type_checker;

#[cfg(test)]
mod tests;
