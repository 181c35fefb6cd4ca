use tracing::debug;

use crate::{
    ast::{
        ast::{ExprKind, Resolution, Stmt},
        statements::{
            AssignmentStmt, ClassDeclStmt, FnDeclStmt, ForStmt, IfStmt, Parameter, RangeForStmt,
            ReturnStmt, SwitchStmt, UpdateOperator, VarDeclStmt, WhileStmt,
        },
        types::{assignable, equal, ClassType, FunctionSignature, ParameterSignature, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    environment::{Binding, BindingKind, ClassBinding, Environment},
    type_checker::{type_mismatch, TypeChecker},
};

fn require_condition(construct: &str, ty: &Type) -> Result<(), Error> {
    if *ty == Type::Boolean {
        Ok(())
    } else {
        Err(Error::semantic(ErrorImpl::ConditionTypeError {
            construct: construct.to_string(),
            received: ty.to_string(),
        }))
    }
}

impl TypeChecker {
    /// Checks one statement, declaring any names it binds into `env`.
    ///
    /// # Arguments
    ///
    /// * `env` - The scope the statement sits in
    /// * `stmt` - The statement, annotated in place
    ///
    /// # Returns
    ///
    /// Returns a declaration, type or control-flow error for the first
    /// violation found.
    pub fn check_stmt(&mut self, env: &mut Environment, stmt: &mut Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Expression(stmt) => self.check_expr(env, &mut stmt.expression).map(|_| ()),
            Stmt::VarDecl(decl) => self.check_var_decl(env, decl),
            Stmt::Assignment(assignment) => self.check_assignment(env, assignment),
            Stmt::FnDecl(decl) => self.check_fn_decl(env, decl),
            Stmt::ClassDecl(decl) => self.check_class_decl(env, decl),
            Stmt::If(stmt) => self.check_if(env, stmt),
            Stmt::While(stmt) => self.check_while(env, stmt),
            Stmt::For(stmt) => self.check_for(env, stmt),
            Stmt::RangeFor(stmt) => self.check_range_for(env, stmt),
            Stmt::Switch(stmt) => self.check_switch(env, stmt),
            Stmt::Break => {
                if env.inside_loop() {
                    Ok(())
                } else {
                    Err(Error::semantic(ErrorImpl::BreakOutsideLoop))
                }
            }
            Stmt::Continue => {
                if env.inside_loop() {
                    Ok(())
                } else {
                    Err(Error::semantic(ErrorImpl::ContinueOutsideLoop))
                }
            }
            Stmt::Return(stmt) => self.check_return(env, stmt),
            Stmt::Print(stmt) => self.check_expr(env, &mut stmt.value).map(|_| ()),
            Stmt::Block(block) => self.check_block(env, &mut block.body),
        }
    }

    fn check_var_decl(&mut self, env: &mut Environment, decl: &mut VarDeclStmt) -> Result<(), Error> {
        if decl.values.is_empty() {
            for declarator in decl.declarators.iter() {
                if decl.is_constant {
                    return Err(Error::semantic(ErrorImpl::ConstantWithoutValue {
                        name: declarator.name.clone(),
                    }));
                }
                if declarator.explicit_type.is_none() {
                    return Err(Error::semantic(ErrorImpl::ExpectedExplicitValue {
                        name: declarator.name.clone(),
                    }));
                }
            }
        } else if decl.values.len() != decl.declarators.len() {
            return Err(Error::semantic(ErrorImpl::ArityMismatch {
                targets: decl.declarators.len(),
                values: decl.values.len(),
            }));
        }

        // Initializers see the scope as it was before this statement
        let mut value_types = vec![];
        for value in decl.values.iter_mut() {
            value_types.push(self.check_expr(env, value)?);
        }

        for (i, declarator) in decl.declarators.iter_mut().enumerate() {
            let ty = match &declarator.explicit_type {
                Some(annotation) => self.resolve_type(env, annotation)?,
                None => value_types[i].clone(),
            };

            if let Some(value_type) = value_types.get(i) {
                if !assignable(value_type, &ty) {
                    return Err(type_mismatch(&ty, value_type));
                }
            }

            let id = self.fresh_id();
            env.declare_variable(
                &declarator.name,
                Binding {
                    resolution: Resolution::Declared(id),
                    ty: ty.clone(),
                    kind: BindingKind::Variable {
                        is_constant: decl.is_constant,
                    },
                },
            )?;

            debug!(name = %declarator.name, id = id.0, ty = %ty, "declared variable");
            declarator.id = Some(id);
            declarator.ty = Some(ty);
        }

        Ok(())
    }

    fn check_assignment(&mut self, env: &mut Environment, assignment: &mut AssignmentStmt) -> Result<(), Error> {
        if assignment.targets.len() != assignment.values.len() {
            return Err(Error::semantic(ErrorImpl::ArityMismatch {
                targets: assignment.targets.len(),
                values: assignment.values.len(),
            }));
        }

        let mut target_types = vec![];

        for target in assignment.targets.iter_mut() {
            match &target.kind {
                ExprKind::Symbol(symbol) => {
                    let binding = env.lookup_variable(&symbol.name)?;
                    if !binding.is_writable() {
                        return Err(Error::semantic(ErrorImpl::ConstantAssignment {
                            name: symbol.name.clone(),
                        }));
                    }
                }
                ExprKind::Subscript(_) | ExprKind::Member(_) => {}
                _ => {
                    return Err(Error::semantic(ErrorImpl::InvalidAssignmentTarget {
                        target: target.describe(),
                    }))
                }
            }

            target_types.push(self.check_expr(env, target)?);

            // Members resolve to ambient bindings, so they share their rules
            if let ExprKind::Member(member) = &target.kind {
                let binding = env.lookup_variable(&member.member.name)?;
                if !binding.is_writable() {
                    return Err(Error::semantic(ErrorImpl::ConstantAssignment {
                        name: member.member.name.clone(),
                    }));
                }
            }
        }

        for (value, target_type) in assignment.values.iter_mut().zip(target_types.iter()) {
            let value_type = self.check_expr(env, value)?;
            if !assignable(&value_type, target_type) {
                return Err(type_mismatch(target_type, &value_type));
            }
        }

        Ok(())
    }

    /// Checks parameter defaults in `env` against their declared types.
    fn check_defaults(&mut self, env: &Environment, parameters: &mut [Parameter]) -> Result<(), Error> {
        for parameter in parameters.iter_mut() {
            let expected = match &parameter.ty {
                Some(ty) => ty.clone(),
                None => self.resolve_type(env, &parameter.type_annotation)?,
            };

            if let Some(default) = parameter.default.as_mut() {
                let received = self.check_expr(env, default)?;
                if !assignable(&received, &expected) {
                    return Err(type_mismatch(&expected, &received));
                }
            }
        }

        Ok(())
    }

    /// Binds parameters in a function scope.
    fn bind_parameters(&mut self, scope: &mut Environment, parameters: &mut [Parameter]) -> Result<(), Error> {
        for parameter in parameters.iter_mut() {
            let ty = match &parameter.ty {
                Some(ty) => ty.clone(),
                None => self.resolve_type(scope, &parameter.type_annotation)?,
            };

            let id = self.fresh_id();
            scope.declare_variable(
                &parameter.name,
                Binding {
                    resolution: Resolution::Declared(id),
                    ty: ty.clone(),
                    kind: BindingKind::Parameter,
                },
            )?;

            parameter.id = Some(id);
            parameter.ty = Some(ty);
        }

        Ok(())
    }

    fn check_fn_decl(&mut self, env: &mut Environment, decl: &mut FnDeclStmt) -> Result<(), Error> {
        // The name was bound when the enclosing block was hoisted
        let signature = self.function_signature(env, decl)?;
        self.check_defaults(env, &mut decl.parameters)?;

        let mut scope = env.child_for_function(signature);
        self.bind_parameters(&mut scope, &mut decl.parameters)?;
        self.check_statements(&mut scope, &mut decl.body)
    }

    fn check_class_decl(&mut self, env: &mut Environment, decl: &mut ClassDeclStmt) -> Result<(), Error> {
        let id = self.fresh_id();
        let ty = Type::Class(ClassType {
            id,
            name: decl.name.clone(),
        });

        let mut parameters = vec![];
        for parameter in decl.parameters.iter_mut() {
            let parameter_type = self.resolve_type(env, &parameter.type_annotation)?;
            parameter.ty = Some(parameter_type.clone());
            parameters.push(ParameterSignature {
                ty: parameter_type,
                has_default: parameter.default.is_some(),
            });
        }

        let constructor = FunctionSignature {
            parameters,
            return_type: ty.clone(),
            is_async: false,
        };

        env.declare_class(
            &decl.name,
            ClassBinding {
                resolution: Resolution::Declared(id),
                ty,
                constructor: Some(constructor.clone()),
            },
        )?;
        decl.id = Some(id);
        debug!(name = %decl.name, id = id.0, "declared class");

        self.check_defaults(env, &mut decl.parameters)?;

        {
            let mut scope = env.child_for_function(constructor);
            self.bind_parameters(&mut scope, &mut decl.parameters)?;
        }

        // Members become bindings of the enclosing scope
        self.check_statements(env, &mut decl.body)
    }

    fn check_if(&mut self, env: &mut Environment, stmt: &mut IfStmt) -> Result<(), Error> {
        for branch in stmt.branches.iter_mut() {
            let condition = self.check_expr(env, &mut branch.condition)?;
            require_condition("if", &condition)?;
            self.check_block(env, &mut branch.body)?;
        }

        if let Some(alternate) = stmt.alternate.as_mut() {
            self.check_block(env, alternate)?;
        }

        Ok(())
    }

    fn check_while(&mut self, env: &mut Environment, stmt: &mut WhileStmt) -> Result<(), Error> {
        let condition = self.check_expr(env, &mut stmt.condition)?;
        require_condition("while", &condition)?;

        let mut scope = env.child_for_loop();
        self.check_statements(&mut scope, &mut stmt.body)
    }

    fn check_for(&mut self, env: &mut Environment, stmt: &mut ForStmt) -> Result<(), Error> {
        let mut scope = env.child_for_loop();

        let init_type = self.check_expr(&scope, &mut stmt.init)?;
        let index_type = match &stmt.index.explicit_type {
            Some(annotation) => self.resolve_type(&scope, annotation)?,
            None => init_type.clone(),
        };

        if !assignable(&init_type, &index_type) {
            return Err(type_mismatch(&index_type, &init_type));
        }

        let id = self.fresh_id();
        scope.declare_variable(
            &stmt.index.name,
            Binding {
                resolution: Resolution::Declared(id),
                ty: index_type.clone(),
                kind: BindingKind::Variable { is_constant: false },
            },
        )?;
        stmt.index.id = Some(id);
        stmt.index.ty = Some(index_type);

        let test = self.check_expr(&scope, &mut stmt.test)?;
        require_condition("for", &test)?;

        let target = &mut stmt.update.target;
        let binding = scope.lookup_variable(&target.name)?;
        if !binding.ty.is_integral() {
            return Err(Error::semantic(ErrorImpl::LoopIndexTypeError {
                name: target.name.clone(),
                received: binding.ty.to_string(),
            }));
        }
        let target_type = binding.ty.clone();
        target.resolution = Some(binding.resolution.clone());

        match &mut stmt.update.operator {
            UpdateOperator::Increment | UpdateOperator::Decrement => {}
            UpdateOperator::Increase(step) | UpdateOperator::Decrease(step) => {
                let step_type = self.check_expr(&scope, step)?;
                if !equal(&step_type, &target_type) {
                    return Err(type_mismatch(&target_type, &step_type));
                }
            }
        }

        self.check_statements(&mut scope, &mut stmt.body)
    }

    fn check_range_for(&mut self, env: &mut Environment, stmt: &mut RangeForStmt) -> Result<(), Error> {
        for bound in [&mut stmt.start, &mut stmt.end] {
            let ty = self.check_expr(env, bound)?;
            if !ty.is_integral() {
                return Err(Error::semantic(ErrorImpl::RangeBoundTypeError {
                    received: ty.to_string(),
                }));
            }
        }

        let mut scope = env.child_for_loop();
        self.check_statements(&mut scope, &mut stmt.body)
    }

    fn check_switch(&mut self, env: &mut Environment, stmt: &mut SwitchStmt) -> Result<(), Error> {
        self.check_expr(env, &mut stmt.scrutinee)?;

        // Each case is its own boolean guard
        for case in stmt.cases.iter_mut() {
            let guard = self.check_expr(env, &mut case.guard)?;
            require_condition("case", &guard)?;
            self.check_block(env, &mut case.body)?;
        }

        if let Some(default) = stmt.default.as_mut() {
            self.check_block(env, default)?;
        }

        Ok(())
    }

    fn check_return(&mut self, env: &mut Environment, stmt: &mut ReturnStmt) -> Result<(), Error> {
        let Some(function) = env.function() else {
            return Err(Error::semantic(ErrorImpl::ReturnOutsideFunction));
        };
        let expected = function.return_type.clone();

        let received = match stmt.value.as_mut() {
            Some(_) if expected == Type::None => {
                return Err(Error::semantic(ErrorImpl::ReturnValueInVoidFunction))
            }
            Some(value) => self.check_expr(env, value)?,
            None => Type::None,
        };

        if !assignable(&received, &expected) {
            return Err(type_mismatch(&expected, &received));
        }

        Ok(())
    }
}
