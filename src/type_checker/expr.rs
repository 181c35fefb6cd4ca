use crate::{
    ast::{
        ast::{Expr, ExprKind},
        expressions::CallExpr,
        types::{assignable, binary_result, prefix_result, FunctionSignature, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{environment::Environment, type_checker::TypeChecker};

impl TypeChecker {
    /// Computes the type of `expr`, records it on the node and returns it.
    ///
    /// # Returns
    ///
    /// The expression's type, or the first error found in it. A node that
    /// fails keeps an empty `ty` slot.
    pub fn check_expr(&mut self, env: &Environment, expr: &mut Expr) -> Result<Type, Error> {
        let ty = match &mut expr.kind {
            ExprKind::Literal(literal) => literal.get_type(),
            ExprKind::Symbol(symbol) => {
                let binding = env.lookup_variable(&symbol.name)?;
                symbol.resolution = Some(binding.resolution.clone());
                binding.ty.clone()
            }
            ExprKind::Binary(binary) => {
                let left = self.check_expr(env, &mut binary.left)?;
                let right = self.check_expr(env, &mut binary.right)?;
                binary_result(binary.operator, &left, &right).map_err(Error::semantic)?
            }
            ExprKind::Prefix(prefix) => {
                let operand = self.check_expr(env, &mut prefix.operand)?;
                prefix_result(prefix.operator, &operand).map_err(Error::semantic)?
            }
            ExprKind::Call(call) => self.check_call(env, call)?,
            ExprKind::Subscript(subscript) => {
                let base = self.check_expr(env, &mut subscript.base)?;
                let index = self.check_expr(env, &mut subscript.index)?;

                let element = base.subscript_result().ok_or_else(|| {
                    Error::semantic(ErrorImpl::NotSubscriptable {
                        received: base.to_string(),
                    })
                })?;

                if index != Type::Integer {
                    return Err(Error::semantic(ErrorImpl::IndexTypeError {
                        received: index.to_string(),
                    }));
                }

                element
            }
            ExprKind::Member(member) => {
                self.check_expr(env, &mut member.object)?;

                // The member name resolves in the surrounding scope
                let binding = env.lookup_variable(&member.member.name)?;
                member.member.resolution = Some(binding.resolution.clone());
                binding.ty.clone()
            }
            ExprKind::Array(elements) => Type::Array(Box::new(self.check_elements(env, elements)?)),
            ExprKind::Set(elements) => Type::Set(Box::new(self.check_elements(env, elements)?)),
            ExprKind::Dict(entries) => {
                let mut key_type = Type::None;
                let mut value_type = Type::None;

                for (i, (key, value)) in entries.iter_mut().enumerate() {
                    let key_ty = self.check_expr(env, key)?;
                    let value_ty = self.check_expr(env, value)?;

                    if i == 0 {
                        key_type = key_ty;
                        value_type = value_ty;
                        continue;
                    }

                    for (expected, received) in [(&key_type, &key_ty), (&value_type, &value_ty)] {
                        if !assignable(received, expected) {
                            return Err(Error::semantic(ErrorImpl::ElementTypeError {
                                expected: expected.to_string(),
                                received: received.to_string(),
                            }));
                        }
                    }
                }

                Type::Dict(Box::new(key_type), Box::new(value_type))
            }
            ExprKind::Tuple(members) => {
                let mut types = vec![];
                for member in members.iter_mut() {
                    types.push(self.check_expr(env, member)?);
                }
                Type::tuple_of(types)
            }
        };

        expr.ty = Some(ty.clone());
        Ok(ty)
    }

    /// Element type of an array or set literal: the first element's type,
    /// or `none` when empty.
    fn check_elements(&mut self, env: &Environment, elements: &mut [Expr]) -> Result<Type, Error> {
        let mut element_type = Type::None;

        for (i, element) in elements.iter_mut().enumerate() {
            let ty = self.check_expr(env, element)?;

            if i == 0 {
                element_type = ty;
            } else if !assignable(&ty, &element_type) {
                return Err(Error::semantic(ErrorImpl::ElementTypeError {
                    expected: element_type.to_string(),
                    received: ty.to_string(),
                }));
            }
        }

        Ok(element_type)
    }

    /// Resolves the callee of `call` to a signature. Bare names are looked
    /// up as variables first and fall back to classes (constructor calls).
    fn resolve_callee(&mut self, env: &Environment, call: &mut CallExpr) -> Result<(String, FunctionSignature), Error> {
        let name = match &call.callee.kind {
            ExprKind::Symbol(symbol) => symbol.name.clone(),
            _ => {
                let ty = self.check_expr(env, &mut call.callee)?;
                return match ty {
                    Type::Function(signature) => Ok((call.callee.describe(), *signature)),
                    _ => Err(Error::semantic(ErrorImpl::NotCallable {
                        name: call.callee.describe(),
                    })),
                };
            }
        };

        if env.find_variable(&name).is_some() {
            let ty = self.check_expr(env, &mut call.callee)?;
            return match ty {
                Type::Function(signature) => Ok((name, *signature)),
                _ => Err(Error::semantic(ErrorImpl::NotCallable { name })),
            };
        }

        let class = env.lookup_class(&name)?;
        let Some(constructor) = class.constructor.clone() else {
            return Err(Error::semantic(ErrorImpl::NotCallable { name }));
        };

        if let ExprKind::Symbol(symbol) = &mut call.callee.kind {
            symbol.resolution = Some(class.resolution.clone());
        }
        call.callee.ty = Some(class.ty.clone());
        call.is_constructor = true;

        Ok((name, constructor))
    }

    fn check_call(&mut self, env: &Environment, call: &mut CallExpr) -> Result<Type, Error> {
        let (name, signature) = self.resolve_callee(env, call)?;

        let received = call.arguments.len();
        let required = signature.required_arguments();
        let total = signature.parameters.len();

        if received < required {
            return Err(Error::semantic(ErrorImpl::MissingArguments {
                expected: required,
                received,
            }));
        }
        if received > total {
            return Err(Error::semantic(ErrorImpl::UnexpectedArguments {
                expected: total,
                received,
            }));
        }

        for (argument, parameter) in call.arguments.iter_mut().zip(signature.parameters.iter()) {
            let ty = self.check_expr(env, argument)?;
            if !assignable(&ty, &parameter.ty) {
                return Err(Error::semantic(ErrorImpl::ArgumentTypeMatchError {
                    expected: parameter.ty.to_string(),
                    received: ty.to_string(),
                }));
            }
        }

        if signature.is_async != call.awaited {
            return Err(Error::semantic(ErrorImpl::AwaitMismatch {
                function: name,
                is_async: signature.is_async,
            }));
        }
        if call.awaited && !env.function().is_some_and(|function| function.is_async) {
            return Err(Error::semantic(ErrorImpl::AwaitOutsideAsyncFunction));
        }

        Ok(signature.return_type)
    }
}
