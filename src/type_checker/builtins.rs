//! Root scope seeding: primitive type names and the standard library.

use crate::ast::{
    ast::Resolution,
    types::{FunctionSignature, ParameterSignature, Type},
};

use super::environment::{Binding, BindingKind, ClassBinding, Environment};

/// (source name, type)
const PRIMITIVES: [(&str, Type); 5] = [
    ("int", Type::Integer),
    ("long", Type::Long),
    ("string", Type::String),
    ("bool", Type::Boolean),
    ("none", Type::None),
];

/// (source name, target name, parameter types, return type)
const STDLIB: [(&str, &str, Type, Type); 4] = [
    ("str", "String", Type::Integer, Type::String),
    ("parseInt", "parseInt", Type::String, Type::Integer),
    ("toLong", "BigInt", Type::Integer, Type::Long),
    ("toInt", "Number", Type::Long, Type::Integer),
];

/// Builds the root scope every compile starts from. The result is never
/// mutated by the type checker, so one value can serve many compiles.
pub fn root_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, ty) in PRIMITIVES {
        env.define_class(
            name,
            ClassBinding {
                resolution: Resolution::Builtin(name),
                ty,
                constructor: None,
            },
        );
    }

    for (name, target, parameter, return_type) in STDLIB {
        let signature = FunctionSignature {
            parameters: vec![ParameterSignature {
                ty: parameter,
                has_default: false,
            }],
            return_type,
            is_async: false,
        };

        env.define_variable(
            name,
            Binding {
                resolution: Resolution::Builtin(target),
                ty: Type::Function(Box::new(signature)),
                kind: BindingKind::Builtin,
            },
        );
    }

    env
}
