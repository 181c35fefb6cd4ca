use tracing::{debug, error, info, instrument, span, Level};

use crate::{
    ast::{
        ast::{DeclId, Program, Resolution, Stmt, TypeExpr},
        statements::FnDeclStmt,
        types::{FunctionSignature, ParameterSignature, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::environment::{Binding, BindingKind, Environment};

/// Walks a program once, resolving identifiers and writing types and
/// declaration ids back onto the tree.
#[derive(Debug)]
pub struct TypeChecker {
    next_decl_id: u32,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn type_mismatch(expected: &Type, received: &Type) -> Error {
    Error::semantic(ErrorImpl::TypeMatchError {
        expected: expected.to_string(),
        received: received.to_string(),
    })
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker { next_decl_id: 1 }
    }

    pub fn fresh_id(&mut self) -> DeclId {
        let id = DeclId(self.next_decl_id);
        self.next_decl_id += 1;
        id
    }

    /// Resolves a written annotation to a type descriptor.
    pub fn resolve_type(&self, env: &Environment, annotation: &TypeExpr) -> Result<Type, Error> {
        let unknown = |name: &str| {
            Error::semantic(ErrorImpl::UnknownType {
                type_: name.to_string(),
            })
        };

        match annotation {
            TypeExpr::Named(name) => {
                if let Some(expected) = generic_arity(name) {
                    return Err(Error::semantic(ErrorImpl::GenericArityError {
                        type_: name.clone(),
                        expected,
                        received: 0,
                    }));
                }

                env.find_class(name)
                    .map(|class| class.ty.clone())
                    .ok_or_else(|| unknown(name))
            }
            TypeExpr::Generic { name, arguments } => {
                let Some(expected) = generic_arity(name) else {
                    return match env.find_class(name) {
                        Some(_) => Err(Error::semantic(ErrorImpl::GenericArityError {
                            type_: name.clone(),
                            expected: 0,
                            received: arguments.len(),
                        })),
                        None => Err(unknown(name)),
                    };
                };

                // Tuples take any positive number of members
                let arity_ok = if name == "tuple" {
                    !arguments.is_empty()
                } else {
                    arguments.len() == expected
                };

                if !arity_ok {
                    return Err(Error::semantic(ErrorImpl::GenericArityError {
                        type_: name.clone(),
                        expected,
                        received: arguments.len(),
                    }));
                }

                let mut resolved = arguments
                    .iter()
                    .map(|argument| self.resolve_type(env, argument))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(match name.as_str() {
                    "array" => Type::Array(Box::new(resolved.remove(0))),
                    "set" => Type::Set(Box::new(resolved.remove(0))),
                    "dict" => {
                        let value = resolved.remove(1);
                        Type::Dict(Box::new(resolved.remove(0)), Box::new(value))
                    }
                    _ => Type::tuple_of(resolved),
                })
            }
            TypeExpr::Nullable(inner) => Ok(Type::Nullable(Box::new(self.resolve_type(env, inner)?))),
        }
    }

    /// Resolves the signature of a function declaration, recording each
    /// parameter's type on the tree.
    pub fn function_signature(
        &self,
        env: &Environment,
        decl: &mut FnDeclStmt,
    ) -> Result<FunctionSignature, Error> {
        let mut parameters = vec![];

        for parameter in decl.parameters.iter_mut() {
            let ty = self.resolve_type(env, &parameter.type_annotation)?;
            parameter.ty = Some(ty.clone());
            parameters.push(ParameterSignature {
                ty,
                has_default: parameter.default.is_some(),
            });
        }

        let return_type = match &decl.return_type {
            Some(annotation) => self.resolve_type(env, annotation)?,
            None => Type::None,
        };

        Ok(FunctionSignature {
            parameters,
            return_type,
            is_async: decl.is_async,
        })
    }

    /// Binds a function's name in `env` so it is visible to the whole block.
    pub fn declare_function(&mut self, env: &mut Environment, decl: &mut FnDeclStmt) -> Result<(), Error> {
        let signature = self.function_signature(env, decl)?;
        let id = self.fresh_id();

        env.declare_variable(
            &decl.name,
            Binding {
                resolution: Resolution::Declared(id),
                ty: Type::Function(Box::new(signature)),
                kind: BindingKind::Function,
            },
        )?;
        decl.id = Some(id);

        debug!(name = %decl.name, id = id.0, "hoisted function");
        Ok(())
    }

    /// Checks a statement list in `env`, after hoisting the functions it
    /// declares directly.
    ///
    /// # Arguments
    ///
    /// * `env` - The scope the statements declare into
    /// * `body` - The statements, annotated in place
    ///
    /// # Returns
    ///
    /// Returns the first error found; later statements are not checked.
    pub fn check_statements(&mut self, env: &mut Environment, body: &mut [Stmt]) -> Result<(), Error> {
        for stmt in body.iter_mut() {
            if let Stmt::FnDecl(decl) = stmt {
                self.declare_function(env, decl)?;
            }
        }

        for stmt in body.iter_mut() {
            self.check_stmt(env, stmt)?;
        }

        Ok(())
    }

    /// Checks a statement list in a fresh block scope under `env`.
    pub fn check_block(&mut self, env: &Environment, body: &mut [Stmt]) -> Result<(), Error> {
        let mut scope = env.child_for_block();
        self.check_statements(&mut scope, body)
    }
}

/// Number of type arguments a generic constructor takes.
fn generic_arity(name: &str) -> Option<usize> {
    match name {
        "array" | "set" | "tuple" => Some(1),
        "dict" => Some(2),
        _ => None,
    }
}

/// Analyzes `program` in a block scope under `root`, annotating the tree in
/// place. Stops at the first violation.
///
/// # Arguments
///
/// * `program` - The parsed program. Every expression gets its `ty` slot
///   filled and every declaration its `DeclId`
/// * `root` - The root scope holding primitive classes and the standard
///   library. It is only borrowed, so one root serves many compiles
///
/// # Returns
///
/// Returns Ok(()) when the whole program is well formed, otherwise the
/// first error found.
#[instrument(skip(program, root))]
pub fn type_check(program: &mut Program, root: &Environment) -> Result<(), Error> {
    let span = span!(Level::INFO, "type_check", statements = program.body.len());
    let _guard = span.enter();

    let mut checker = TypeChecker::new();
    let mut scope = root.child_for_block();

    match checker.check_statements(&mut scope, &mut program.body) {
        Ok(()) => {
            info!(
                declarations = checker.next_decl_id - 1,
                "type checking completed successfully"
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "type checking failed");
            Err(err)
        }
    }
}
