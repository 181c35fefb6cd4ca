//! Code generation module for the compiler.
//!
//! Renders an analyzed syntax tree as JavaScript source:
//!
//! - Every declaration gets a unique `name_<n>` so scopes can be flattened
//! - Operators render fully parenthesized
//! - Classes become constructor functions with prototype methods

pub mod compiler;
pub mod expr;
pub mod stmt;
