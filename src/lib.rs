#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    compiler::compiler::compile,
    config::CompileOptions,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{environment::Environment, type_checker::type_check},
};

pub mod ast;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the front end and the semantic analyzer over `source`, returning the
/// annotated tree.
pub fn analyze_source(source: &str, file_name: &str, root: &Environment) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    let mut program = parse(tokens, Rc::new(file_name.to_string()))?;
    type_check(&mut program, root)?;
    Ok(program)
}

/// Full pipeline: source text to target text.
pub fn compile_source(
    source: &str,
    file_name: &str,
    root: &Environment,
    options: &CompileOptions,
) -> Result<String, Error> {
    let program = analyze_source(source, file_name, root)?;
    compile(&program, options)
}

/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Position at end of input (EOF token)
    content
        .lines()
        .last()
        .map(|line| (line_number.saturating_sub(1).max(1), line.to_string(), line.len()))
}


/// Renders an error for display by a driver program.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `#`, did you miss a semicolon?)
/// -> final.lang
///    |
/// 20 | let a = #;
///    | --------^
/// ```
///
/// Semantic errors carry no position and render as the header line only.
pub fn format_error(error: &Error, source: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }

    let Some(position) = error.get_position() else {
        return out;
    };
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();
    (String::from(&string[start..]), start)
}
