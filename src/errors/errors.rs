use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// Creates an error that identifies its construct by name only.
    pub fn semantic(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::ConstantWithoutValue { .. } => "ConstantWithoutValue",
            ErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandTypeError { .. } => "OperandTypeError",
            ErrorImpl::ConcatenationTypeError { .. } => "ConcatenationTypeError",
            ErrorImpl::PrefixOperandError { .. } => "PrefixOperandError",
            ErrorImpl::ConditionTypeError { .. } => "ConditionTypeError",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ConstantAssignment { .. } => "ConstantAssignment",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::AwaitMismatch { .. } => "AwaitMismatch",
            ErrorImpl::NotSubscriptable { .. } => "NotSubscriptable",
            ErrorImpl::IndexTypeError { .. } => "IndexTypeError",
            ErrorImpl::ElementTypeError { .. } => "ElementTypeError",
            ErrorImpl::LoopIndexTypeError { .. } => "LoopIndexTypeError",
            ErrorImpl::RangeBoundTypeError { .. } => "RangeBoundTypeError",
            ErrorImpl::GenericArityError { .. } => "GenericArityError",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::ContinueOutsideLoop => "ContinueOutsideLoop",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ReturnValueInVoidFunction => "ReturnValueInVoidFunction",
            ErrorImpl::AwaitOutsideAsyncFunction => "AwaitOutsideAsyncFunction",
            ErrorImpl::UnsupportedTarget { .. } => "UnsupportedTarget",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit? Use an `n` suffix for long values",
                token
            )),
            ErrorImpl::DuplicateDeclaration { name } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope",
                name
            )),
            ErrorImpl::UndeclaredIdentifier { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", name))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::ConstantWithoutValue { name } => {
                ErrorTip::Suggestion(format!("Constant `{}` needs an initial value", name))
            }
            ErrorImpl::ExpectedExplicitValue { name } => ErrorTip::Suggestion(format!(
                "`{}` needs either a type or an initial value",
                name
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperandTypeError {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::ConcatenationTypeError { left, right } => ErrorTip::Suggestion(format!(
                "`+` needs two ints or two strings, received `{}` and `{}`",
                left, right
            )),
            ErrorImpl::PrefixOperandError { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::ConditionTypeError {
                construct,
                received,
            } => ErrorTip::Suggestion(format!(
                "The {} condition must be `bool`, received `{}`",
                construct, received
            )),
            ErrorImpl::ArityMismatch { targets, values } => ErrorTip::Suggestion(format!(
                "{} targets but {} values",
                targets, values
            )),
            ErrorImpl::ConstantAssignment { name } => {
                ErrorTip::Suggestion(format!("`{}` cannot be reassigned", name))
            }
            ErrorImpl::InvalidAssignmentTarget { target } => {
                ErrorTip::Suggestion(format!("Cannot assign to {}", target))
            }
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function or class", name))
            }
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected at most {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected at least {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::AwaitMismatch { function, is_async } => {
                if *is_async {
                    ErrorTip::Suggestion(format!("`{}` is async and must be awaited", function))
                } else {
                    ErrorTip::Suggestion(format!("`{}` is not async and cannot be awaited", function))
                }
            }
            ErrorImpl::NotSubscriptable { received } => {
                ErrorTip::Suggestion(format!("`{}` cannot be indexed", received))
            }
            ErrorImpl::IndexTypeError { received } => {
                ErrorTip::Suggestion(format!("Index must be `int`, received `{}`", received))
            }
            ErrorImpl::ElementTypeError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected element type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::LoopIndexTypeError { name, received } => ErrorTip::Suggestion(format!(
                "Loop index `{}` must be `int` or `long`, received `{}`",
                name, received
            )),
            ErrorImpl::RangeBoundTypeError { received } => ErrorTip::Suggestion(format!(
                "Range bounds must be `int` or `long`, received `{}`",
                received
            )),
            ErrorImpl::GenericArityError {
                type_,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} type arguments, received {}",
                type_, expected, received
            )),
            ErrorImpl::BreakOutsideLoop => {
                ErrorTip::Suggestion(String::from("`break` is only allowed inside a loop"))
            }
            ErrorImpl::ContinueOutsideLoop => {
                ErrorTip::Suggestion(String::from("`continue` is only allowed inside a loop"))
            }
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("`return` is only allowed inside a function"))
            }
            ErrorImpl::ReturnValueInVoidFunction => ErrorTip::Suggestion(String::from(
                "A function returning `none` cannot return a value",
            )),
            ErrorImpl::AwaitOutsideAsyncFunction => ErrorTip::Suggestion(String::from(
                "`await` is only allowed inside an `async fn`",
            )),
            ErrorImpl::UnsupportedTarget { target } => ErrorTip::Suggestion(format!(
                "Target `{}` is not supported, use `js`",
                target
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Failure families reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Declaration,
    Type,
    ControlFlow,
    Configuration,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    #[error("{name:?} already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("{name:?} not declared")]
    UndeclaredIdentifier { name: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("constant {name:?} declared without a value")]
    ConstantWithoutValue { name: String },
    #[error("expected explicit value for {name:?} when no type is given")]
    ExpectedExplicitValue { name: String },

    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operator {operator} cannot be applied to {left} and {right}")]
    OperandTypeError {
        operator: String,
        left: String,
        right: String,
    },
    #[error("cannot concatenate {left} and {right}")]
    ConcatenationTypeError { left: String, right: String },
    #[error("operator {operator} cannot be applied to {operand}")]
    PrefixOperandError { operator: String, operand: String },
    #[error("{construct} condition must be bool, received {received}")]
    ConditionTypeError { construct: String, received: String },
    #[error("assignment arity mismatch: {targets} targets, {values} values")]
    ArityMismatch { targets: usize, values: usize },
    #[error("cannot assign to constant {name:?}")]
    ConstantAssignment { name: String },
    #[error("cannot assign to {target}")]
    InvalidAssignmentTarget { target: String },
    #[error("{name:?} is not callable")]
    NotCallable { name: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("await mismatch on {function:?} (async: {is_async})")]
    AwaitMismatch { function: String, is_async: bool },
    #[error("{received} is not subscriptable")]
    NotSubscriptable { received: String },
    #[error("index must be int, received {received}")]
    IndexTypeError { received: String },
    #[error("collection element types do not match: expected {expected}, received {received}")]
    ElementTypeError { expected: String, received: String },
    #[error("loop index {name:?} must be int or long, received {received}")]
    LoopIndexTypeError { name: String, received: String },
    #[error("range bound must be int or long, received {received}")]
    RangeBoundTypeError { received: String },
    #[error("{type_} expects {expected} type arguments, received {received}")]
    GenericArityError {
        type_: String,
        expected: usize,
        received: usize,
    },

    #[error("break outside of a loop")]
    BreakOutsideLoop,
    #[error("continue outside of a loop")]
    ContinueOutsideLoop,
    #[error("return outside of a function")]
    ReturnOutsideFunction,
    #[error("return with a value inside a function returning none")]
    ReturnValueInVoidFunction,
    #[error("await outside of an async function")]
    AwaitOutsideAsyncFunction,

    #[error("unsupported target {target:?}")]
    UnsupportedTarget { target: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::DuplicateDeclaration { .. }
            | ErrorImpl::UndeclaredIdentifier { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::ConstantWithoutValue { .. }
            | ErrorImpl::ExpectedExplicitValue { .. } => ErrorKind::Declaration,
            ErrorImpl::BreakOutsideLoop
            | ErrorImpl::ContinueOutsideLoop
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::ReturnValueInVoidFunction
            | ErrorImpl::AwaitOutsideAsyncFunction => ErrorKind::ControlFlow,
            ErrorImpl::UnsupportedTarget { .. } => ErrorKind::Configuration,
            _ => ErrorKind::Type,
        }
    }
}
