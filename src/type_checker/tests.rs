//! Unit tests for the type checker.
//!
//! Programs are written as source text and run through the lexer and parser
//! first; the assertions look at the annotations and errors the checker
//! produces.

use crate::{
    analyze_source,
    ast::{
        ast::{ExprKind, Program, Resolution, Stmt},
        types::{ClassType, FunctionSignature, Type},
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
};

use super::{
    builtins::root_environment,
    environment::{Binding, BindingKind, Environment},
};

fn analyze(source: &str) -> Result<Program, Error> {
    let root = root_environment();
    analyze_source(source, "test.sc", &root)
}

fn error_of(source: &str) -> Error {
    analyze(source).expect_err("expected analysis to fail")
}

fn initializer_type(program: &Program, index: usize) -> Type {
    match &program.body[index] {
        Stmt::VarDecl(decl) => decl.declarators[0].ty.clone().unwrap(),
        other => panic!("expected declaration, got {:?}", other),
    }
}

// Scopes

#[test]
fn test_environment_shadowing_and_duplicates() {
    let mut root = Environment::new();
    let binding = Binding {
        resolution: Resolution::Builtin("x"),
        ty: Type::Integer,
        kind: BindingKind::Variable { is_constant: false },
    };

    root.declare_variable("x", binding.clone()).unwrap();
    assert!(root.declare_variable("x", binding.clone()).is_err());

    let mut child = root.child_for_block();
    child
        .declare_variable(
            "x",
            Binding {
                ty: Type::String,
                ..binding.clone()
            },
        )
        .unwrap();
    assert_eq!(child.lookup_variable("x").unwrap().ty, Type::String);
    assert_eq!(root.lookup_variable("x").unwrap().ty, Type::Integer);

    let error = child.lookup_variable("y").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Declaration);
}

#[test]
fn test_environment_context_flags() {
    let root = Environment::new();
    assert!(!root.inside_loop());
    assert!(root.function().is_none());

    let loop_scope = root.child_for_loop();
    assert!(loop_scope.inside_loop());
    assert!(loop_scope.child_for_block().inside_loop());

    let signature = FunctionSignature {
        parameters: vec![],
        return_type: Type::Integer,
        is_async: false,
    };
    let function_scope = loop_scope.child_for_function(signature.clone());
    assert!(!function_scope.inside_loop());
    assert_eq!(function_scope.function(), Some(&signature));
    assert_eq!(function_scope.child_for_loop().function(), Some(&signature));
}

#[test]
fn test_environment_keeps_declaration_order() {
    let mut env = Environment::new();
    for name in ["b", "a", "c"] {
        env.declare_variable(
            name,
            Binding {
                resolution: Resolution::Builtin("v"),
                ty: Type::Integer,
                kind: BindingKind::Parameter,
            },
        )
        .unwrap();
    }

    assert_eq!(env.variable_names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
}

#[test]
fn test_root_environment_is_reusable() {
    let root = root_environment();
    assert!(analyze_source("let x = 1;", "a.sc", &root).is_ok());
    assert!(analyze_source("let x = 2;", "b.sc", &root).is_ok());
    assert!(root.find_variable("x").is_none());
}

// Declarations

#[test]
fn test_redeclaration_in_same_scope_fails() {
    let error = error_of("let a = 1; let a = 2;");
    assert_eq!(error.kind(), ErrorKind::Declaration);
    assert!(matches!(error.get_impl(), ErrorImpl::DuplicateDeclaration { name } if name == "a"));
}

#[test]
fn test_shadowing_in_nested_scope_succeeds() {
    assert!(analyze("let a = 1; if true { let a = \"x\"; print a; }").is_ok());
    assert!(analyze("let a = 1; { let a = 2; }").is_ok());
}

#[test]
fn test_undeclared_identifier() {
    let error = error_of("print missing;");
    assert!(matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { name } if name == "missing"));
}

#[test]
fn test_declaration_inference_and_annotation() {
    let program = analyze("let a = 1; let b: long = 2n; let c: int? = null; let d: string? = \"x\";").unwrap();

    assert_eq!(initializer_type(&program, 0), Type::Integer);
    assert_eq!(initializer_type(&program, 1), Type::Long);
    assert_eq!(initializer_type(&program, 2), Type::Nullable(Box::new(Type::Integer)));
    assert_eq!(initializer_type(&program, 3), Type::Nullable(Box::new(Type::String)));
}

#[test]
fn test_declaration_type_mismatch() {
    let error = error_of("let a: int = \"x\";");
    assert_eq!(error.kind(), ErrorKind::Type);
}

#[test]
fn test_declaration_arity_mismatch() {
    let error = error_of("let a, b = 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::ArityMismatch { targets: 2, values: 1 }));
}

#[test]
fn test_constant_requires_value() {
    let error = error_of("const a: int;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantWithoutValue { .. }));
    assert_eq!(error.kind(), ErrorKind::Declaration);
}

#[test]
fn test_untyped_declaration_requires_value() {
    let error = error_of("let a;");
    assert!(matches!(error.get_impl(), ErrorImpl::ExpectedExplicitValue { .. }));
}

#[test]
fn test_initializer_cannot_reference_itself() {
    let error = error_of("let a: int = a;");
    assert!(matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { .. }));
}

#[test]
fn test_unknown_type_annotation() {
    let error = error_of("let a: float = 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::UnknownType { type_ } if type_ == "float"));
}

#[test]
fn test_generic_annotations() {
    let program = analyze(
        "let a: array<int> = [1]; let b: int[] = [2]; let c: dict<string, int> = {\"k\": 1}; let d: tuple<int, string> = (1, \"a\");",
    )
    .unwrap();

    assert_eq!(initializer_type(&program, 0), Type::Array(Box::new(Type::Integer)));
    assert_eq!(initializer_type(&program, 1), Type::Array(Box::new(Type::Integer)));
    assert_eq!(
        initializer_type(&program, 2),
        Type::Dict(Box::new(Type::String), Box::new(Type::Integer))
    );
    assert_eq!(
        initializer_type(&program, 3),
        Type::tuple_of([Type::Integer, Type::String])
    );

    let error = error_of("let a: dict<int> = {};");
    assert!(matches!(error.get_impl(), ErrorImpl::GenericArityError { expected: 2, received: 1, .. }));
}

// Assignment

#[test]
fn test_assignment_rules() {
    assert!(analyze("let a = 1; a = 2;").is_ok());
    assert!(analyze("let a, b = 1, \"s\"; a, b = 2, \"t\";").is_ok());

    let error = error_of("let a = 1; a = \"x\";");
    assert!(matches!(error.get_impl(), ErrorImpl::TypeMatchError { .. }));

    let error = error_of("let a, b = 1, 2; a, b = 3;");
    assert!(matches!(error.get_impl(), ErrorImpl::ArityMismatch { targets: 2, values: 1 }));
}

#[test]
fn test_assignment_to_constant_fails() {
    let error = error_of("const a = 1; a = 2;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantAssignment { name } if name == "a"));
    assert_eq!(error.kind(), ErrorKind::Type);

    let error = error_of("fn f() { } f = 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantAssignment { .. }));

    let error = error_of("str = 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantAssignment { .. }));
}

#[test]
fn test_member_assignment_follows_binding_rules() {
    assert!(analyze("class P() { let c: int = 1; } let p = P(); p.c = 5;").is_ok());

    let error = error_of("class P() { const c: int = 1; } let p = P(); p.c = 5;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantAssignment { name } if name == "c"));

    let error = error_of("class P() { fn m() { } } let p = P(); p.m = 5;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConstantAssignment { name } if name == "m"));
}

#[test]
fn test_assignment_to_literal_fails() {
    let error = error_of("1 = 2;");
    assert!(matches!(error.get_impl(), ErrorImpl::InvalidAssignmentTarget { .. }));
}

#[test]
fn test_subscript_assignment() {
    assert!(analyze("let xs: int[] = [1, 2]; xs[0] = 5;").is_ok());
    assert!(analyze("let xs: int[] = [1, 2]; xs[0] = \"a\";").is_err());
}

// Operators

#[test]
fn test_arithmetic_operators_require_integers() {
    for operator in ["^", "-", "*", "%", "/"] {
        let program = analyze(&format!("let a = 6 {} 2;", operator)).unwrap();
        assert_eq!(initializer_type(&program, 0), Type::Integer);

        let error = error_of(&format!("let a = 6 {} \"2\";", operator));
        assert!(matches!(error.get_impl(), ErrorImpl::OperandTypeError { .. }));

        assert!(analyze(&format!("let a = 6n {} 2n;", operator)).is_err());
    }
}

#[test]
fn test_plus_overloads() {
    let program = analyze("let a = 1 + 2; let b = \"a\" + \"b\";").unwrap();
    assert_eq!(initializer_type(&program, 0), Type::Integer);
    assert_eq!(initializer_type(&program, 1), Type::String);

    let error = error_of("let c = \"a\" + 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::ConcatenationTypeError { .. }));
    assert!(analyze("let c = true + true;").is_err());
}

#[test]
fn test_comparison_and_logic() {
    assert!(analyze("let a = 1 < 2; let b = \"a\" >= \"b\"; let c = a && b || !a;").is_ok());
    assert!(analyze("let a = true < false;").is_err());
    assert!(analyze("let a = 1 < \"b\";").is_err());
    assert!(analyze("let a = 1 && true;").is_err());
}

#[test]
fn test_equality_requires_same_type() {
    assert!(analyze("let a = 1 == 2; let b = \"a\" != \"b\"; let c = 1n == 2n;").is_ok());
    assert!(analyze("let a = 1 == \"1\";").is_err());
}

#[test]
fn test_prefix_operators() {
    let program = analyze("let a = -1; let b = +2n; let c = !true;").unwrap();
    assert_eq!(initializer_type(&program, 0), Type::Integer);
    assert_eq!(initializer_type(&program, 1), Type::Long);
    assert_eq!(initializer_type(&program, 2), Type::Boolean);

    assert!(analyze("let a = -\"x\";").is_err());
    assert!(analyze("let a = !1;").is_err());
}

#[test]
fn test_every_expression_is_annotated() {
    let program = analyze("let a = 1; print (a + 2) * 3;").unwrap();

    let Stmt::Print(print) = &program.body[1] else {
        panic!("expected print");
    };
    assert_eq!(print.value.get_type(), Some(&Type::Integer));
    let ExprKind::Binary(binary) = &print.value.kind else {
        panic!("expected binary");
    };
    assert_eq!(binary.left.get_type(), Some(&Type::Integer));
    let ExprKind::Binary(inner) = &binary.left.kind else {
        panic!("expected binary");
    };
    let ExprKind::Symbol(symbol) = &inner.left.kind else {
        panic!("expected symbol");
    };
    assert!(matches!(symbol.resolution, Some(Resolution::Declared(_))));
}

// Functions and calls

#[test]
fn test_function_declaration_and_call() {
    let program = analyze("fn add(a: int, b: int = 1) -> int { return a + b; } let x = add(1); let y = add(1, 2);").unwrap();
    assert_eq!(initializer_type(&program, 1), Type::Integer);
}

#[test]
fn test_functions_are_hoisted() {
    assert!(analyze("let x = later(); fn later() -> int { return 1; }").is_ok());
    assert!(analyze("fn fact(n: int) -> int { if n <= 1 { return 1; } return n * fact(n - 1); }").is_ok());
}

#[test]
fn test_call_arity() {
    let error = error_of("fn f(a: int) { } f();");
    assert!(matches!(error.get_impl(), ErrorImpl::MissingArguments { expected: 1, received: 0 }));

    let error = error_of("fn f(a: int) { } f(1, 2);");
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedArguments { expected: 1, received: 2 }));
}

#[test]
fn test_call_argument_types() {
    let error = error_of("fn f(a: int) { } f(\"x\");");
    assert!(matches!(error.get_impl(), ErrorImpl::ArgumentTypeMatchError { .. }));
}

#[test]
fn test_calling_a_non_function() {
    let error = error_of("let a = 1; a();");
    assert!(matches!(error.get_impl(), ErrorImpl::NotCallable { name } if name == "a"));

    let error = error_of("int(1);");
    assert!(matches!(error.get_impl(), ErrorImpl::NotCallable { .. }));
}

#[test]
fn test_default_must_match_parameter() {
    let error = error_of("fn f(a: int = \"x\") { }");
    assert!(matches!(error.get_impl(), ErrorImpl::TypeMatchError { .. }));
}

#[test]
fn test_parameters_are_scoped_to_the_function() {
    let error = error_of("fn f(a: int) { } print a;");
    assert!(matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { .. }));
}

#[test]
fn test_async_calls_must_be_awaited() {
    assert!(analyze("async fn load() -> int { return 1; } async fn run() { let v: int = await load(); }").is_ok());

    let error = error_of("async fn load() -> int { return 1; } let v = load();");
    assert!(matches!(error.get_impl(), ErrorImpl::AwaitMismatch { is_async: true, .. }));

    let error = error_of("fn sum() -> int { return 1; } let v = await sum();");
    assert!(matches!(error.get_impl(), ErrorImpl::AwaitMismatch { is_async: false, .. }));
}

#[test]
fn test_await_needs_an_async_function() {
    let error = error_of("async fn g() -> int { return 1; } fn f() -> int { return await g(); }");
    assert!(matches!(error.get_impl(), ErrorImpl::AwaitOutsideAsyncFunction));
    assert_eq!(error.kind(), ErrorKind::ControlFlow);

    let error = error_of("async fn g() -> int { return 1; } let v = await g();");
    assert!(matches!(error.get_impl(), ErrorImpl::AwaitOutsideAsyncFunction));

    // Blocks and loops keep the enclosing function's context
    assert!(analyze(
        "async fn g() -> int { return 1; } async fn f() { while true { if true { let v = await g(); } break; } }"
    )
    .is_ok());
}

#[test]
fn test_stdlib_functions() {
    let program = analyze("let s = str(1); let n = parseInt(\"2\"); let l = toLong(3); let i = toInt(l);").unwrap();
    assert_eq!(initializer_type(&program, 0), Type::String);
    assert_eq!(initializer_type(&program, 1), Type::Integer);
    assert_eq!(initializer_type(&program, 2), Type::Long);
    assert_eq!(initializer_type(&program, 3), Type::Integer);
}

// Return

#[test]
fn test_return_rules() {
    let error = error_of("return 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::ReturnOutsideFunction));
    assert_eq!(error.kind(), ErrorKind::ControlFlow);

    let error = error_of("fn f() { return 1; }");
    assert!(matches!(error.get_impl(), ErrorImpl::ReturnValueInVoidFunction));
    assert_eq!(error.kind(), ErrorKind::ControlFlow);

    let error = error_of("fn f() -> none { return 1; }");
    assert!(matches!(error.get_impl(), ErrorImpl::ReturnValueInVoidFunction));

    assert!(analyze("fn f() { return; }").is_ok());

    let error = error_of("fn f() -> int { return \"x\"; }");
    assert!(matches!(error.get_impl(), ErrorImpl::TypeMatchError { .. }));
}

// Control flow

#[test]
fn test_break_and_continue_placement() {
    let error = error_of("break;");
    assert!(matches!(error.get_impl(), ErrorImpl::BreakOutsideLoop));
    assert_eq!(error.kind(), ErrorKind::ControlFlow);

    let error = error_of("if true { continue; }");
    assert!(matches!(error.get_impl(), ErrorImpl::ContinueOutsideLoop));

    assert!(analyze("while true { if true { break; } continue; }").is_ok());
    assert!(analyze("for (0 ... 3) { break; }").is_ok());
}

#[test]
fn test_function_resets_loop_context() {
    let error = error_of("while true { fn f() { break; } }");
    assert!(matches!(error.get_impl(), ErrorImpl::BreakOutsideLoop));
}

#[test]
fn test_break_inside_switch_without_loop_fails() {
    let error = error_of("let x = 1; switch (x) { case x == 1: break; }");
    assert!(matches!(error.get_impl(), ErrorImpl::BreakOutsideLoop));
}

#[test]
fn test_conditions_must_be_boolean() {
    for source in ["if 1 { }", "while \"a\" { }", "let x = 1; switch (x) { case x: }"] {
        let error = error_of(source);
        assert!(
            matches!(error.get_impl(), ErrorImpl::ConditionTypeError { .. }),
            "{}",
            source
        );
    }

    assert!(analyze("if false { } else if true { } else { }").is_ok());
}

#[test]
fn test_classic_for_loop() {
    let program = analyze("for (let i: int = 0; i <= 10; i++) { print i; }").unwrap();

    let Stmt::For(stmt) = &program.body[0] else {
        panic!("expected for");
    };
    assert_eq!(stmt.index.ty, Some(Type::Integer));
    assert_eq!(
        stmt.update.target.resolution,
        stmt.index.id.map(Resolution::Declared)
    );

    assert!(analyze("for (let i: long = 10n; i > 0n; i -= 1n) { }").is_err()); // `>` needs int or string
    assert!(analyze("for (let i = 10n; i == 0n; i -= 1n) { }").is_ok());
}

#[test]
fn test_classic_for_loop_errors() {
    let error = error_of("for (let i: int = \"a\"; true; i++) { }");
    assert!(matches!(error.get_impl(), ErrorImpl::TypeMatchError { .. }));

    let error = error_of("for (let i: int = 0; i; i++) { }");
    assert!(matches!(error.get_impl(), ErrorImpl::ConditionTypeError { .. }));

    let error = error_of("for (let s = \"a\"; true; s++) { }");
    assert!(matches!(error.get_impl(), ErrorImpl::LoopIndexTypeError { .. }));

    let error = error_of("for (let i = 0; true; i += 1n) { }");
    assert!(matches!(error.get_impl(), ErrorImpl::TypeMatchError { .. }));

    let error = error_of("for (let i = 0; true; i++) { } print i;");
    assert!(matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { .. }));
}

#[test]
fn test_range_for_bounds() {
    assert!(analyze("for (0 ... 10) { }").is_ok());
    assert!(analyze("for (0n ... 10n) { }").is_ok());

    let error = error_of("for (0 ... \"x\") { }");
    assert!(matches!(error.get_impl(), ErrorImpl::RangeBoundTypeError { .. }));
}

#[test]
fn test_switch_scrutinee_is_unconstrained() {
    assert!(analyze("let s = \"a\"; switch (s) { case 1 == 1: print s; default: print \"d\"; }").is_ok());
}

// Collections

#[test]
fn test_collection_literals() {
    let program = analyze("let a = [1, 2]; let s = {\"x\", \"y\"}; let d = {\"k\": true}; let t = (1, \"a\", 2);").unwrap();

    assert_eq!(initializer_type(&program, 0), Type::Array(Box::new(Type::Integer)));
    assert_eq!(initializer_type(&program, 1), Type::Set(Box::new(Type::String)));
    assert_eq!(
        initializer_type(&program, 2),
        Type::Dict(Box::new(Type::String), Box::new(Type::Boolean))
    );
    // Duplicate member types collapse
    assert_eq!(
        initializer_type(&program, 3),
        Type::tuple_of([Type::Integer, Type::String])
    );
}

#[test]
fn test_empty_collections() {
    let program = analyze("let a = []; let s = {}; let t = ();").unwrap();
    assert_eq!(initializer_type(&program, 0), Type::Array(Box::new(Type::None)));
    assert_eq!(
        initializer_type(&program, 1),
        Type::Dict(Box::new(Type::None), Box::new(Type::None))
    );
    assert_eq!(initializer_type(&program, 2), Type::Set(Box::new(Type::None)));

    let error = error_of("let a = []; a = [1];");
    assert_eq!(error.kind(), ErrorKind::Type);

    let error = error_of("let a: int[] = [];");
    assert_eq!(error.kind(), ErrorKind::Type);
}

#[test]
fn test_mixed_collection_elements() {
    let error = error_of("let a = [1, \"b\"];");
    assert!(matches!(error.get_impl(), ErrorImpl::ElementTypeError { .. }));

    let error = error_of("let d = {\"a\": 1, \"b\": \"c\"};");
    assert!(matches!(error.get_impl(), ErrorImpl::ElementTypeError { .. }));
}

#[test]
fn test_subscript_rules() {
    let program = analyze("let a = [1]; let x = a[0]; let d = {\"k\": \"v\"}; let y = d[0]; let s = \"abc\"[1];").unwrap();
    assert_eq!(initializer_type(&program, 1), Type::Integer);
    assert_eq!(initializer_type(&program, 3), Type::String);
    assert_eq!(initializer_type(&program, 4), Type::String);

    let error = error_of("let a = 1; let x = a[0];");
    assert!(matches!(error.get_impl(), ErrorImpl::NotSubscriptable { .. }));

    let error = error_of("let a = [1]; let x = a[\"0\"];");
    assert!(matches!(error.get_impl(), ErrorImpl::IndexTypeError { .. }));
}

// Classes

#[test]
fn test_class_declaration_and_construction() {
    let program = analyze("class Point(x: int, y: int) { let origin: int = 0; } let p: Point = Point(1, 2);").unwrap();

    let Stmt::ClassDecl(class) = &program.body[0] else {
        panic!("expected class");
    };
    let id = class.id.unwrap();
    assert!(class.parameters.iter().all(|p| p.id.is_some()));
    assert_eq!(
        initializer_type(&program, 1),
        Type::Class(ClassType {
            id,
            name: String::from("Point")
        })
    );

    let Stmt::VarDecl(decl) = &program.body[1] else {
        panic!("expected declaration");
    };
    let ExprKind::Call(call) = &decl.values[0].kind else {
        panic!("expected call");
    };
    assert!(call.is_constructor);
}

#[test]
fn test_constructor_arguments_are_checked() {
    let error = error_of("class Point(x: int) { } let p = Point(\"a\");");
    assert!(matches!(error.get_impl(), ErrorImpl::ArgumentTypeMatchError { .. }));

    let error = error_of("class Point(x: int) { } let p = await Point(1);");
    assert!(matches!(error.get_impl(), ErrorImpl::AwaitMismatch { .. }));
}

#[test]
fn test_duplicate_class() {
    let error = error_of("class A { } class A { }");
    assert!(matches!(error.get_impl(), ErrorImpl::DuplicateDeclaration { .. }));
}

#[test]
fn test_class_members_bind_in_enclosing_scope() {
    assert!(analyze("class A { let origin: int = 0; } print origin;").is_ok());

    let error = error_of("class A { let origin: int = 0; } let origin = 1;");
    assert!(matches!(error.get_impl(), ErrorImpl::DuplicateDeclaration { .. }));
}

#[test]
fn test_member_access_resolves_ambient_name() {
    let program = analyze("class A { fn norm() -> int { return 0; } } let a = A(); let n = a.norm();").unwrap();
    assert_eq!(initializer_type(&program, 2), Type::Integer);

    let error = error_of("class A { } let a = A(); let n = a.missing;");
    assert!(matches!(error.get_impl(), ErrorImpl::UndeclaredIdentifier { .. }));
}
