//! # arithc
//!
//! arithc compiles arithmetic expressions into trees that can be evaluated
//! over and over without re-parsing. Expressions support numbers, variables,
//! function calls, the operators `+ - * / % ^` and parentheses.
//!
//! Variables and functions live in a [`SymbolTable`]. Compiling binds each
//! mutable variable to its cell in the table, so changing the variable and
//! re-evaluating is all a numeric loop needs:
//!
//! ```
//! use arithc::{compile, interpreter::symbols::core::SymbolTable};
//!
//! let mut table = SymbolTable::with_builtins();
//! table.add_variable("x", 0.0, false);
//!
//! let expr = compile("sin(x)^2 + cos(x)^2", &table).unwrap();
//! let x = table.find_variable("x").unwrap();
//!
//! for i in 0..10 {
//!     x.set(f64::from(i) * 0.1);
//!     assert!((expr.evaluate() - 1.0).abs() < 1e-12);
//! }
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Ast,
    diagnostics::{MessageHandler, SilentHandler, StdoutHandler},
    error::{CompileError, Error, ParseError},
    interpreter::{
        compiler::core::Compiler,
        evaluator::core::CompiledExpr,
        parser::core::Parser,
        symbols::core::SymbolTable,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of an expression as a tree. The AST is built by the
/// parser and consumed by the compiler.
///
/// # Responsibilities
/// - Defines expression nodes and operators.
/// - Attaches source spans to nodes for error reporting.
/// - Prints trees for inspection.
pub mod ast;
/// Side-channel reporting of diagnostics.
///
/// Scanning, parsing and compiling describe every problem they find to a
/// [`MessageHandler`](diagnostics::MessageHandler) in addition to returning
/// an error value.
pub mod diagnostics;
/// Provides unified error types for parsing and compilation.
///
/// This module defines all errors that can be raised while scanning, parsing
/// or compiling an expression. Each one carries the byte offset it refers
/// to. Evaluation has no error type: it follows floating-point rules.
pub mod error;
/// Orchestrates the pipeline from source text to value.
///
/// This module ties together scanning, parsing, the symbol table, compilation
/// and evaluation.
pub mod interpreter;
/// General numeric conversion helpers.
pub mod util;

/// Configuration shared by the pipeline entry points.
///
/// A context owns the [`MessageHandler`] that receives diagnostics. The free
/// functions of this crate use [`Context::default`], which reports to
/// standard output.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use arithc::{Context, diagnostics::Severity, interpreter::symbols::core::SymbolTable};
///
/// let messages = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&messages);
/// let context = Context::with_handler(move |_: Severity, message: &str| {
///     sink.borrow_mut().push(message.to_string());
/// });
///
/// let table = SymbolTable::with_builtins();
/// assert!(context.evaluate_source("nope(1)", &table).is_nan());
/// assert_eq!(messages.borrow()[0], "Error at offset 0: Unknown function 'nope'.");
/// ```
pub struct Context {
    handler: Box<dyn MessageHandler>,
}

impl Default for Context {
    fn default() -> Self {
        Self::with_handler(StdoutHandler)
    }
}

impl Context {
    /// Creates a context reporting to `handler`.
    #[must_use]
    pub fn with_handler(handler: impl MessageHandler + 'static) -> Self {
        Self { handler: Box::new(handler) }
    }

    /// Creates a context that discards diagnostics.
    #[must_use]
    pub fn silent() -> Self {
        Self::with_handler(SilentHandler)
    }

    /// The handler diagnostics are sent to.
    #[must_use]
    pub fn handler(&self) -> &dyn MessageHandler {
        self.handler.as_ref()
    }

    /// Parses `source` without compiling it.
    pub fn build_ast<'src>(&self, source: &'src str) -> Result<Ast<'src>, ParseError> {
        Parser::with_handler(source, self.handler()).parse()
    }

    /// Parses and compiles `source` against `symbols`.
    pub fn compile<'t>(&self,
                       source: &str,
                       symbols: &'t SymbolTable)
                       -> Result<CompiledExpr<'t>, Error> {
        let ast = self.build_ast(source)?;
        Ok(self.compile_ast(&ast, symbols)?)
    }

    /// Compiles an already parsed tree against `symbols`.
    pub fn compile_ast<'t>(&self,
                           ast: &Ast<'_>,
                           symbols: &'t SymbolTable)
                           -> Result<CompiledExpr<'t>, CompileError> {
        Compiler::with_handler(symbols, self.handler()).compile(ast)
    }

    /// Compiles and evaluates `source` once; `NaN` when it does not compile.
    #[must_use]
    pub fn evaluate_source(&self, source: &str, symbols: &SymbolTable) -> f64 {
        self.compile(source, symbols)
            .map_or(f64::NAN, |expr| expr.evaluate())
    }
}

/// Parses `source` into an AST for inspection.
///
/// # Errors
/// Returns a [`ParseError`] when `source` is not a well-formed expression.
///
/// # Examples
/// ```
/// use arithc::{build_ast, error::ParseErrorKind};
///
/// let ast = build_ast("-x ^ 2").unwrap();
/// assert_eq!(ast.root().kind_name(), "unary");
///
/// let err = build_ast("(1+2").unwrap_err();
/// assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
/// ```
pub fn build_ast(source: &str) -> Result<Ast<'_>, ParseError> {
    Context::default().build_ast(source)
}

/// Parses and compiles `source` against `symbols`.
///
/// # Errors
/// Returns [`Error::Parse`] for malformed input and [`Error::Compile`] for
/// names `symbols` cannot resolve.
///
/// # Examples
/// ```
/// use arithc::{compile, interpreter::symbols::core::SymbolTable};
///
/// let table = SymbolTable::with_builtins();
///
/// let expr = compile("2 ^ 3 ^ 2", &table).unwrap();
/// assert_eq!(expr.evaluate(), 512.0);
///
/// let err = compile("pow(2)", &table).unwrap_err();
/// assert_eq!(err.expected_args(), Some(2));
/// assert_eq!(err.got_args(), Some(1));
/// ```
pub fn compile<'t>(source: &str, symbols: &'t SymbolTable) -> Result<CompiledExpr<'t>, Error> {
    Context::default().compile(source, symbols)
}

/// Compiles a tree returned by [`build_ast`].
///
/// # Errors
/// Returns the first [`CompileError`] met.
pub fn compile_ast<'t>(ast: &Ast<'_>,
                       symbols: &'t SymbolTable)
                       -> Result<CompiledExpr<'t>, CompileError> {
    Context::default().compile_ast(ast, symbols)
}

/// Evaluates a compiled expression.
#[must_use]
pub fn evaluate(expr: &CompiledExpr<'_>) -> f64 {
    expr.evaluate()
}

/// Compiles and evaluates `source` once, returning `NaN` on any failure.
///
/// # Examples
/// ```
/// use arithc::{evaluate_source, interpreter::symbols::core::SymbolTable};
///
/// let table = SymbolTable::with_builtins();
///
/// assert_eq!(evaluate_source("ncr(5, 2) % 4", &table), 2.0);
/// assert!(evaluate_source("1 +", &table).is_nan());
/// ```
#[must_use]
pub fn evaluate_source(source: &str, symbols: &SymbolTable) -> f64 {
    Context::default().evaluate_source(source, symbols)
}
