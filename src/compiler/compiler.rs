//! Main compiler module.
//!
//! Holds the generator state shared by statement and expression rendering:
//! the output buffer, the current indentation and the table of mangled
//! declaration names.

use std::collections::HashMap;

use tracing::{debug, error, info, instrument};

use crate::{
    ast::ast::{DeclId, Program},
    config::CompileOptions,
    errors::errors::{Error, ErrorImpl},
};

use super::stmt::gen_statement;

/// State of one generation pass over an analyzed program.
///
/// The tree is only read; every name the output needs is derived from the
/// declaration ids the type checker recorded.
#[derive(Debug)]
pub struct Compiler {
    /// Generated text so far
    output: String,
    /// Current nesting depth
    indent: usize,
    indent_width: usize,
    /// Mangled name of every declaration emitted so far
    names: HashMap<DeclId, String>,
    next_suffix: u32,
}

impl Compiler {
    pub fn new(options: &CompileOptions) -> Self {
        Compiler {
            output: String::new(),
            indent: 0,
            indent_width: options.indent_width,
            names: HashMap::new(),
            next_suffix: 1,
        }
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        let width = self.indent * self.indent_width;
        self.output.push_str(&" ".repeat(width));
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Runs `f` one nesting level deeper.
    pub fn indented<F: FnOnce(&mut Compiler)>(&mut self, f: F) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Renders `name` for the declaration `id`, assigning the next suffix on
    /// first use. Declarations without an id keep their source name.
    pub fn mangle(&mut self, id: Option<DeclId>, name: &str) -> String {
        let Some(id) = id else {
            return name.to_string();
        };

        if let Some(mangled) = self.names.get(&id) {
            return mangled.clone();
        }

        let mangled = self.fresh_name(name);
        debug!(id = id.0, name = %mangled, "mangled declaration");
        self.names.insert(id, mangled.clone());
        mangled
    }

    /// A name no other declaration in the output uses.
    pub fn fresh_name(&mut self, name: &str) -> String {
        let mangled = format!("{}_{}", name, self.next_suffix);
        self.next_suffix += 1;
        mangled
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

/// Renders an analyzed program as target text.
///
/// Only JavaScript output is implemented; any other target fails with
/// `UnsupportedTarget` before anything is generated.
#[instrument(skip(program, options), fields(target = %options.target))]
pub fn compile(program: &Program, options: &CompileOptions) -> Result<String, Error> {
    if !options.target.is_supported() {
        let err = Error::semantic(ErrorImpl::UnsupportedTarget {
            target: options.target.to_string(),
        });
        error!(error = %err, "code generation failed");
        return Err(err);
    }

    let mut compiler = Compiler::new(options);
    for stmt in program.body.iter() {
        gen_statement(&mut compiler, stmt);
    }

    let output = compiler.into_output();
    info!(bytes = output.len(), "code generation completed successfully");
    Ok(output)
}
