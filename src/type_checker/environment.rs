//! Lexical scopes for the type checker.
//!
//! An [`Environment`] is one frame in a chain of scopes. Children borrow
//! their parent, so a scope can never outlive the scope it was derived from
//! and the parent cannot be mutated while a child is alive.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::Resolution,
        types::{FunctionSignature, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

#[derive(Debug, Clone, PartialEq)]
pub enum BindingKind {
    Variable { is_constant: bool },
    Parameter,
    Function,
    /// Standard library function seeded in the root scope
    Builtin,
}

/// What a variable name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub resolution: Resolution,
    pub ty: Type,
    pub kind: BindingKind,
}

impl Binding {
    /// Whether an assignment statement may overwrite this binding.
    pub fn is_writable(&self) -> bool {
        matches!(
            self.kind,
            BindingKind::Variable { is_constant: false } | BindingKind::Parameter
        )
    }
}

/// What a class (type) name is bound to. Primitive types are classes
/// without a constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBinding {
    pub resolution: Resolution,
    pub ty: Type,
    pub constructor: Option<FunctionSignature>,
}

#[derive(Debug)]
pub struct Environment<'p> {
    parent: Option<&'p Environment<'p>>,
    /// Insertion ordered
    variables: Vec<(String, Binding)>,
    variable_index: HashMap<String, usize>,
    classes: HashMap<String, ClassBinding>,
    function: Option<FunctionSignature>,
    inside_loop: bool,
}

impl Default for Environment<'static> {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment<'static> {
    /// An empty scope with no parent.
    pub fn new() -> Self {
        Environment {
            parent: None,
            variables: vec![],
            variable_index: HashMap::new(),
            classes: HashMap::new(),
            function: None,
            inside_loop: false,
        }
    }
}

impl<'p> Environment<'p> {
    fn child(&self, function: Option<FunctionSignature>, inside_loop: bool) -> Environment<'_> {
        Environment {
            parent: Some(self),
            variables: vec![],
            variable_index: HashMap::new(),
            classes: HashMap::new(),
            function,
            inside_loop,
        }
    }

    /// Scope of a function body. Loop context does not carry into a function.
    pub fn child_for_function(&self, signature: FunctionSignature) -> Environment<'_> {
        self.child(Some(signature), false)
    }

    pub fn child_for_loop(&self) -> Environment<'_> {
        self.child(self.function.clone(), true)
    }

    /// Plain block: inherits both function and loop context.
    pub fn child_for_block(&self) -> Environment<'_> {
        self.child(self.function.clone(), self.inside_loop)
    }

    /// Binds a variable name in this scope.
    ///
    /// # Arguments
    ///
    /// * `name` - The source name being declared
    /// * `binding` - What the name resolves to, with its type and kind
    ///
    /// # Returns
    ///
    /// Returns a `DuplicateDeclaration` error if this scope already binds
    /// `name`. Bindings in ancestor scopes are shadowed, not rejected.
    pub fn declare_variable(&mut self, name: &str, binding: Binding) -> Result<(), Error> {
        if self.variable_index.contains_key(name) {
            return Err(Error::semantic(ErrorImpl::DuplicateDeclaration {
                name: name.to_string(),
            }));
        }

        self.define_variable(name, binding);
        Ok(())
    }

    /// Binds a class name in this scope. Class and variable names live in
    /// separate tables.
    ///
    /// # Returns
    ///
    /// Returns a `DuplicateDeclaration` error if this scope already has a
    /// class called `name`.
    pub fn declare_class(&mut self, name: &str, binding: ClassBinding) -> Result<(), Error> {
        if self.classes.contains_key(name) {
            return Err(Error::semantic(ErrorImpl::DuplicateDeclaration {
                name: name.to_string(),
            }));
        }

        self.classes.insert(name.to_string(), binding);
        Ok(())
    }

    pub(super) fn define_variable(&mut self, name: &str, binding: Binding) {
        match self.variable_index.get(name) {
            Some(index) => self.variables[*index].1 = binding,
            None => {
                self.variable_index
                    .insert(name.to_string(), self.variables.len());
                self.variables.push((name.to_string(), binding));
            }
        }
    }

    pub(super) fn define_class(&mut self, name: &str, binding: ClassBinding) {
        self.classes.insert(name.to_string(), binding);
    }

    /// Walks this scope then its ancestors.
    pub fn find_variable(&self, name: &str) -> Option<&Binding> {
        match self.variable_index.get(name) {
            Some(index) => Some(&self.variables[*index].1),
            None => self.parent.and_then(|parent| parent.find_variable(name)),
        }
    }

    pub fn find_class(&self, name: &str) -> Option<&ClassBinding> {
        match self.classes.get(name) {
            Some(class) => Some(class),
            None => self.parent.and_then(|parent| parent.find_class(name)),
        }
    }

    /// Resolves a variable name through this scope and its ancestors.
    ///
    /// # Arguments
    ///
    /// * `name` - The source name to resolve
    ///
    /// # Returns
    ///
    /// The innermost binding for `name`, or an `UndeclaredIdentifier` error.
    pub fn lookup_variable(&self, name: &str) -> Result<&Binding, Error> {
        self.find_variable(name).ok_or_else(|| {
            Error::semantic(ErrorImpl::UndeclaredIdentifier {
                name: name.to_string(),
            })
        })
    }

    /// Like [`Environment::lookup_variable`], over the class table.
    pub fn lookup_class(&self, name: &str) -> Result<&ClassBinding, Error> {
        self.find_class(name).ok_or_else(|| {
            Error::semantic(ErrorImpl::UndeclaredIdentifier {
                name: name.to_string(),
            })
        })
    }

    /// Signature of the innermost enclosing function, if any.
    pub fn function(&self) -> Option<&FunctionSignature> {
        self.function.as_ref()
    }

    pub fn inside_loop(&self) -> bool {
        self.inside_loop
    }

    /// Names declared directly in this scope, in declaration order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(name, _)| name.as_str())
    }
}
