use thiserror::Error;

use crate::ast::Span;

/// Represents all errors that can occur while compiling an AST.
///
/// Every variant carries the span of the AST node that could not be
/// resolved: the identifier for variables, the callee name for calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Tried to use an undefined variable.
    #[error("Error at offset {}: Unknown variable '{name}'.", .span.offset)]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// Location of the name.
        span: Span,
    },
    /// Called an unknown function.
    #[error("Error at offset {}: Unknown function '{name}'.", .span.offset)]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// Location of the name.
        span: Span,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error at offset {}: Function '{name}' expects {expected} arguments, but got {got}.",
            .span.offset)]
    ArgsMismatch {
        /// The name of the function.
        name:     String,
        /// Arity the function was registered with.
        expected: usize,
        /// Number of arguments at the call site.
        got:      usize,
        /// Location of the callee name.
        span:     Span,
    },
    /// A call supplied more arguments than evaluation can buffer.
    #[error("Error at offset {}: Function '{name}' is called with {got} arguments, at most {max} are \
             supported.",
            .span.offset)]
    TooManyArguments {
        /// The name of the function.
        name: String,
        /// Largest supported argument count.
        max:  usize,
        /// Number of arguments at the call site.
        got:  usize,
        /// Location of the callee name.
        span: Span,
    },
}

impl CompileError {
    /// The span of the offending AST node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnknownVariable { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::ArgsMismatch { span, .. }
            | Self::TooManyArguments { span, .. } => *span,
        }
    }

    /// Byte offset of the offending AST node.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span().offset
    }

    /// Length in bytes of the offending AST node.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.span().len
    }
}
