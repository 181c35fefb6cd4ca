//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.lang".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.kind(), ErrorKind::Syntax);
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.lang".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().unwrap().0, 42);
}

#[test]
fn test_semantic_error_has_no_position() {
    let error = Error::semantic(ErrorImpl::UndeclaredIdentifier {
        name: "foo".to_string(),
    });

    assert!(error.get_position().is_none());
    assert_eq!(error.get_error_name(), "UndeclaredIdentifier");
    assert_eq!(error.to_string(), "\"foo\" not declared");
}

#[test]
fn test_declaration_error_kinds() {
    for error_impl in [
        ErrorImpl::DuplicateDeclaration { name: "x".to_string() },
        ErrorImpl::UndeclaredIdentifier { name: "x".to_string() },
        ErrorImpl::UnknownType { type_: "Foo".to_string() },
        ErrorImpl::ConstantWithoutValue { name: "x".to_string() },
    ] {
        assert_eq!(error_impl.kind(), ErrorKind::Declaration);
    }
}

#[test]
fn test_type_error_kinds() {
    for error_impl in [
        ErrorImpl::TypeMatchError {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        ErrorImpl::ArityMismatch { targets: 2, values: 1 },
        ErrorImpl::AwaitMismatch {
            function: "load".to_string(),
            is_async: true,
        },
        ErrorImpl::NotSubscriptable {
            received: "int".to_string(),
        },
        ErrorImpl::ConstantAssignment { name: "x".to_string() },
    ] {
        assert_eq!(error_impl.kind(), ErrorKind::Type);
    }
}

#[test]
fn test_control_flow_error_kinds() {
    for error_impl in [
        ErrorImpl::BreakOutsideLoop,
        ErrorImpl::ContinueOutsideLoop,
        ErrorImpl::ReturnOutsideFunction,
        ErrorImpl::ReturnValueInVoidFunction,
        ErrorImpl::AwaitOutsideAsyncFunction,
    ] {
        assert_eq!(error_impl.kind(), ErrorKind::ControlFlow);
    }

    let error = Error::semantic(ErrorImpl::AwaitOutsideAsyncFunction);
    assert_eq!(error.get_error_name(), "AwaitOutsideAsyncFunction");
    assert_eq!(error.to_string(), "await outside of an async function");
}

#[test]
fn test_unsupported_target_is_configuration() {
    let error = Error::semantic(ErrorImpl::UnsupportedTarget {
        target: "lua".to_string(),
    });
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Position(0, Rc::new("test.lang".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_await_mismatch_tip_direction() {
    let missing_await = Error::semantic(ErrorImpl::AwaitMismatch {
        function: "load".to_string(),
        is_async: true,
    });
    assert_eq!(
        missing_await.get_tip().to_string(),
        "`load` is async and must be awaited"
    );

    let extra_await = Error::semantic(ErrorImpl::AwaitMismatch {
        function: "sum".to_string(),
        is_async: false,
    });
    assert_eq!(
        extra_await.get_tip().to_string(),
        "`sum` is not async and cannot be awaited"
    );
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_format_error_with_position() {
    let source = "let a = #;";
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        Position(8, Rc::new("final.lang".to_string())),
    );

    let rendered = crate::format_error(&error, source);
    assert!(rendered.starts_with("Error: UnrecognisedToken\n"));
    assert!(rendered.contains("-> final.lang"));
    assert!(rendered.contains("1 | let a = #;"));
}

#[test]
fn test_format_semantic_error() {
    let error = Error::semantic(ErrorImpl::BreakOutsideLoop);
    let rendered = crate::format_error(&error, "break;");
    assert_eq!(
        rendered,
        "Error: BreakOutsideLoop (`break` is only allowed inside a loop)\n"
    );
}
