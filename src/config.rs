//! Compile options shared by the library entry points and the CLI.

use std::{fmt::Display, str::FromStr};

use crate::errors::errors::{Error, ErrorImpl};

/// Output notation selected for code generation.
///
/// Only JavaScript is generated; the other targets are accepted on the
/// command line and rejected by the compiler with `UnsupportedTarget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    JavaScript,
    Python,
    Lua,
}

impl Target {
    pub fn is_supported(&self) -> bool {
        matches!(self, Target::JavaScript)
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.to_ascii_lowercase() {
            "js" | "javascript" => Ok(Target::JavaScript),
            "py" | "python" => Ok(Target::Python),
            "lua" => Ok(Target::Lua),
            _ => Err(Error::semantic(ErrorImpl::UnsupportedTarget {
                target: s.to_string(),
            })),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::JavaScript => write!(f, "javascript"),
            Target::Python => write!(f, "python"),
            Target::Lua => write!(f, "lua"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub target: Target,
    /// Spaces per nesting level in the generated text
    pub indent_width: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            target: Target::JavaScript,
            indent_width: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("js".parse::<Target>().unwrap(), Target::JavaScript);
        assert_eq!("JavaScript".parse::<Target>().unwrap(), Target::JavaScript);
        assert_eq!("py".parse::<Target>().unwrap(), Target::Python);
        assert_eq!("lua".parse::<Target>().unwrap(), Target::Lua);
        assert!("cobol".parse::<Target>().is_err());
    }

    #[test]
    fn test_only_javascript_supported() {
        assert!(Target::JavaScript.is_supported());
        assert!(!Target::Python.is_supported());
        assert!(!Target::Lua.is_supported());
    }
}
