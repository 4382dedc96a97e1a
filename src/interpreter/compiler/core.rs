use crate::{
    ast::{Ast, Expr, Span},
    diagnostics::{MessageHandler, Severity, SilentHandler},
    error::CompileError,
    interpreter::{
        evaluator::core::{CompiledExpr, Node},
        parser::core::MAX_CALL_ARGUMENTS,
        symbols::core::SymbolTable,
    },
};

pub type CompileResult<T> = Result<T, CompileError>;

/// Turns ASTs into compiled expressions bound to one symbol table.
///
/// Compilation is a single bottom-up pass. Identifiers naming constant
/// variables are replaced by the value the variable holds at compile time;
/// mutable ones become references to the variable's cell. Subtrees whose
/// operands are all constant are folded as they are built.
///
/// The first unresolved name, in depth-first left-to-right order, aborts the
/// compilation; its message is also sent to the handler.
///
/// # Example
/// ```
/// use arithc::{
///     build_ast,
///     error::CompileError,
///     interpreter::{compiler::core::Compiler, symbols::core::SymbolTable},
/// };
///
/// let table = SymbolTable::with_builtins();
/// let compiler = Compiler::new(&table);
///
/// let expr = compiler.compile(&build_ast("sqrt(16) + 1").unwrap()).unwrap();
/// assert_eq!(expr.constant_value(), Some(5.0));
///
/// let err = compiler.compile(&build_ast("1 + y").unwrap()).unwrap_err();
/// assert!(matches!(err, CompileError::UnknownVariable { ref name, .. } if name == "y"));
/// assert_eq!(err.offset(), 4);
/// ```
pub struct Compiler<'t, 'h> {
    symbols: &'t SymbolTable,
    handler: &'h dyn MessageHandler,
}

impl<'t> Compiler<'t, 'static> {
    /// Creates a compiler that reports nothing.
    #[must_use]
    pub fn new(symbols: &'t SymbolTable) -> Self {
        Compiler::with_handler(symbols, &SilentHandler)
    }
}

impl<'t, 'h> Compiler<'t, 'h> {
    /// Creates a compiler that reports failures to `handler`.
    #[must_use]
    pub fn with_handler(symbols: &'t SymbolTable, handler: &'h dyn MessageHandler) -> Self {
        Self { symbols, handler }
    }

    /// Compiles a whole tree.
    ///
    /// # Errors
    /// Returns the first [`CompileError`] met.
    pub fn compile(&self, ast: &Ast<'_>) -> CompileResult<CompiledExpr<'t>> {
        self.compile_expr(ast.root())
            .map(CompiledExpr::new)
            .inspect_err(|e| self.handler.handle(Severity::Error, &e.to_string()))
    }

    /// Compiles one subtree.
    ///
    /// # Errors
    /// Returns the first [`CompileError`] met in the subtree.
    pub fn compile_expr(&self, expr: &Expr<'_>) -> CompileResult<Node<'t>> {
        match expr {
            Expr::Number { value, .. } => Ok(Node::Number(*value)),
            Expr::Identifier { name, span } => self.compile_identifier(name, *span),
            Expr::UnaryOp { op, expr, .. } => Ok(Node::unary(*op, self.compile_expr(expr)?)),
            Expr::BinaryOp { left, op, right, .. } => {
                let left = self.compile_expr(left)?;
                let right = self.compile_expr(right)?;
                Ok(Node::binary(*op, left, right))
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 span, } => self.compile_call(name, arguments, *span),
        }
    }

    fn compile_identifier(&self, name: &str, span: Span) -> CompileResult<Node<'t>> {
        let Some(variable) = self.symbols.find_variable(name) else {
            return Err(CompileError::UnknownVariable { name: name.to_string(),
                                                       span });
        };

        if variable.is_constant() {
            return Ok(Node::Number(variable.get()));
        }
        Ok(Node::Variable(variable.cell()))
    }

    fn compile_call(&self,
                    name: &str,
                    arguments: &[Expr<'_>],
                    span: Span)
                    -> CompileResult<Node<'t>> {
        let Some(function) = self.symbols.find_function(name) else {
            return Err(CompileError::UnknownFunction { name: name.to_string(),
                                                       span });
        };

        let got = arguments.len();
        if got != function.arity() {
            return Err(CompileError::ArgsMismatch { name: name.to_string(),
                                                    expected: function.arity(),
                                                    got,
                                                    span });
        }
        if got > MAX_CALL_ARGUMENTS {
            return Err(CompileError::TooManyArguments { name: name.to_string(),
                                                        max: MAX_CALL_ARGUMENTS,
                                                        got,
                                                        span });
        }

        let args = arguments.iter()
                            .map(|argument| self.compile_expr(argument))
                            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Node::call(function.native(), args))
    }
}
