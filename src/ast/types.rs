//! Type system definitions.
//!
//! This module defines the fixed catalogue of type descriptors used by the
//! type checker, and the scope-independent rules relating them:
//!
//! - Primitive types (int, long, string, bool, none)
//! - Composite types (array, set, dict, tuple, nullable)
//! - Nominal class types and function signatures
//! - Assignability and equality
//! - Literal inference and operator typing

use std::{collections::BTreeSet, fmt::Display};

use crate::errors::errors::ErrorImpl;

use super::{
    ast::DeclId,
    expressions::{BinaryOperator, Literal, PrefixOperator},
};

/// A type descriptor. Two descriptors are equal when they are the same
/// variant with structurally equal components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Integer,
    /// Unbounded-width integer
    Long,
    String,
    Boolean,
    None,
    Array(Box<Type>),
    Set(Box<Type>),
    Dict(Box<Type>, Box<Type>),
    /// Distinct member types, not positional
    Tuple(BTreeSet<Type>),
    Nullable(Box<Type>),
    Class(ClassType),
    Function(Box<FunctionSignature>),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassType {
    pub id: DeclId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterSignature {
    pub ty: Type,
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionSignature {
    pub parameters: Vec<ParameterSignature>,
    pub return_type: Type,
    pub is_async: bool,
}

impl FunctionSignature {
    /// Number of leading parameters a call must supply.
    pub fn required_arguments(&self) -> usize {
        self.parameters.iter().filter(|p| !p.has_default).count()
    }
}

impl Type {
    /// Builds the type of a tuple literal or annotation from its element
    /// types. Duplicate member types collapse; an empty tuple is typed as an
    /// empty set.
    pub fn tuple_of<I: IntoIterator<Item = Type>>(members: I) -> Type {
        let members: BTreeSet<Type> = members.into_iter().collect();
        if members.is_empty() {
            Type::Set(Box::new(Type::None))
        } else {
            Type::Tuple(members)
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Type::Integer | Type::Long)
    }

    /// Element type produced by indexing, when the type can be indexed.
    pub fn subscript_result(&self) -> Option<Type> {
        match self {
            Type::Array(element) => Some((**element).clone()),
            Type::Dict(_, value) => Some((**value).clone()),
            Type::String => Some(Type::String),
            Type::Tuple(members) if members.len() == 1 => members.iter().next().cloned(),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Integer => write!(f, "int"),
            Type::Long => write!(f, "long"),
            Type::String => write!(f, "string"),
            Type::Boolean => write!(f, "bool"),
            Type::None => write!(f, "none"),
            Type::Array(element) => write!(f, "array<{}>", element),
            Type::Set(element) => write!(f, "set<{}>", element),
            Type::Dict(key, value) => write!(f, "dict<{}, {}>", key, value),
            Type::Tuple(members) => {
                write!(f, "tuple<")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, ">")
            }
            Type::Nullable(inner) => write!(f, "{}?", inner),
            Type::Class(class) => write!(f, "{}", class.name),
            Type::Function(signature) => {
                if signature.is_async {
                    write!(f, "async ")?;
                }
                write!(f, "fn(")?;
                for (i, parameter) in signature.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter.ty)?;
                }
                write!(f, ") -> {}", signature.return_type)
            }
        }
    }
}

/// Whether a value of `source` may be stored into a binding of `target`.
///
/// Identical types are assignable; a nullable target also accepts its bare
/// underlying type and the null sentinel.
pub fn assignable(source: &Type, target: &Type) -> bool {
    if equal(source, target) {
        return true;
    }

    match target {
        Type::Nullable(inner) => equal(source, inner) || *source == Type::None,
        _ => false,
    }
}

pub fn equal(a: &Type, b: &Type) -> bool {
    a == b
}

impl Literal {
    pub fn get_type(&self) -> Type {
        match self {
            Literal::Integer(_) => Type::Integer,
            Literal::Long(_) => Type::Long,
            Literal::String(_) => Type::String,
            Literal::Boolean(_) => Type::Boolean,
            Literal::Null => Type::None,
        }
    }
}

/// Result type of `left operator right`.
pub fn binary_result(operator: BinaryOperator, left: &Type, right: &Type) -> Result<Type, ErrorImpl> {
    let mismatch = || ErrorImpl::OperandTypeError {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    };

    match operator {
        BinaryOperator::Power
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Modulo
        | BinaryOperator::Divide => {
            if *left == Type::Integer && *right == Type::Integer {
                Ok(Type::Integer)
            } else {
                Err(mismatch())
            }
        }
        BinaryOperator::And | BinaryOperator::Or => {
            if *left == Type::Boolean && *right == Type::Boolean {
                Ok(Type::Boolean)
            } else {
                Err(mismatch())
            }
        }
        BinaryOperator::Less
        | BinaryOperator::LessEquals
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEquals => {
            if equal(left, right) && matches!(left, Type::Integer | Type::String) {
                Ok(Type::Boolean)
            } else {
                Err(mismatch())
            }
        }
        BinaryOperator::Add => match (left, right) {
            (Type::Integer, Type::Integer) => Ok(Type::Integer),
            (Type::String, Type::String) => Ok(Type::String),
            _ => Err(ErrorImpl::ConcatenationTypeError {
                left: left.to_string(),
                right: right.to_string(),
            }),
        },
        BinaryOperator::Equals | BinaryOperator::NotEquals => {
            if equal(left, right) {
                Ok(Type::Boolean)
            } else {
                Err(mismatch())
            }
        }
    }
}

/// Result type of `operator operand`.
pub fn prefix_result(operator: PrefixOperator, operand: &Type) -> Result<Type, ErrorImpl> {
    match (operator, operand) {
        (PrefixOperator::Not, Type::Boolean) => Ok(Type::Boolean),
        (PrefixOperator::Negate | PrefixOperator::Plus, Type::Integer) => Ok(Type::Integer),
        (PrefixOperator::Negate | PrefixOperator::Plus, Type::Long) => Ok(Type::Long),
        _ => Err(ErrorImpl::PrefixOperandError {
            operator: operator.to_string(),
            operand: operand.to_string(),
        }),
    }
}
