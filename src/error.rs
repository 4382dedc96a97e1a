/// Parsing errors.
///
/// Defines the error kinds recorded while scanning and parsing source text,
/// such as unexpected tokens, missing operands or an input that ends early.
pub mod parse_error;
/// Compilation errors.
///
/// Contains the errors raised while resolving names against a symbol table:
/// unknown variables, unknown functions and argument count mismatches.
pub mod compile_error;

use thiserror::Error;

pub use compile_error::CompileError;
pub use parse_error::{ParseError, ParseErrorKind, ParseErrorKinds};

/// Any failure of the parse-then-compile pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source text is not a well-formed expression.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The expression refers to something the symbol table cannot resolve.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl Error {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Parse(e) => e.offset,
            Self::Compile(e) => e.offset(),
        }
    }

    /// Length in bytes of the offending source text; zero for parse errors.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Parse(_) => 0,
            Self::Compile(e) => e.size(),
        }
    }

    /// Argument count the called function declares, for arity mismatches.
    #[must_use]
    pub const fn expected_args(&self) -> Option<usize> {
        match self {
            Self::Compile(CompileError::ArgsMismatch { expected, .. }) => Some(*expected),
            _ => None,
        }
    }

    /// Argument count the call supplied, for arity mismatches.
    #[must_use]
    pub const fn got_args(&self) -> Option<usize> {
        match self {
            Self::Compile(CompileError::ArgsMismatch { got, .. }) => Some(*got),
            _ => None,
        }
    }
}
