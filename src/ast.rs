use std::fmt;

/// A byte range inside the source text.
///
/// Spans are attached to tokens, AST nodes and compile errors so that
/// diagnostics can point back at the offending part of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Length in bytes.
    pub len:    usize,
}

impl Span {
    /// Creates a span starting at `offset` covering `len` bytes.
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Byte offset one past the last byte of the span.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns the text covered by this span, or an empty string when the
    /// span does not fit `source`.
    ///
    /// # Example
    /// ```
    /// use arithc::ast::Span;
    ///
    /// assert_eq!(Span::new(4, 3).slice("1 + sin(x)"), "sin");
    /// assert_eq!(Span::new(40, 3).slice("1 + sin(x)"), "");
    /// ```
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.offset..self.end()).unwrap_or("")
    }
}

/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// Identifier and function names borrow from the source text the tree was
/// parsed from. Every node keeps the span of the token that defined it; for
/// operators that is the operator itself, for calls the callee name.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'src> {
    /// A numeric literal.
    Number {
        /// The literal's value.
        value: f64,
        /// Location of the literal.
        span:  Span,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: &'src str,
        /// Location of the name.
        span: Span,
    },
    /// A prefix sign applied to an operand.
    UnaryOp {
        /// The sign.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Location of the sign token.
        span: Span,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Location of the operator token.
        span:  Span,
    },
    /// Function call expression (e.g. `sin(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      &'src str,
        /// Arguments to the function, in source order.
        arguments: Vec<Self>,
        /// Location of the callee name.
        span:      Span,
    },
}

impl Expr<'_> {
    /// Gets the span of the token that defined `self`.
    ///
    /// ## Example
    /// ```
    /// use arithc::ast::{Expr, Span};
    ///
    /// let expr = Expr::Identifier { name: "x",
    ///                               span: Span::new(5, 1), };
    ///
    /// assert_eq!(expr.span().offset, 5);
    /// ```
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Number { span, .. }
            | Self::Identifier { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::FunctionCall { span, .. } => *span,
        }
    }

    /// Short lowercase name of the node variant, used by the tree printer.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Identifier { .. } => "identifier",
            Self::UnaryOp { .. } => "unary",
            Self::BinaryOp { .. } => "binary",
            Self::FunctionCall { .. } => "call",
        }
    }
}

/// A successfully parsed expression together with the source it borrows
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast<'src> {
    source: &'src str,
    root:   Expr<'src>,
}

impl<'src> Ast<'src> {
    /// Wraps a root node and the source text it was parsed from.
    #[must_use]
    pub const fn new(source: &'src str, root: Expr<'src>) -> Self {
        Self { source, root }
    }

    /// The source text the tree was parsed from.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// The root expression.
    #[must_use]
    pub const fn root(&self) -> &Expr<'src> {
        &self.root
    }

    /// Consumes the tree and returns the root expression.
    #[must_use]
    pub fn into_root(self) -> Expr<'src> {
        self.root
    }
}

/// Prints the tree one field per line, children indented below their parent.
///
/// ```text
/// type: 'binary'
/// value: '+'
/// left:
///   type: 'number'
///   value: '1'
/// ```
impl fmt::Display for Ast<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, &self.root, self.source, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, expr: &Expr, source: &str, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(f, "{indent}type: '{}'", expr.kind_name())?;
    writeln!(f, "{indent}value: '{}'", expr.span().slice(source))?;

    match expr {
        Expr::BinaryOp { left, right, .. } => {
            writeln!(f, "{indent}left:")?;
            write_node(f, left, source, depth + 1)?;
            writeln!(f, "{indent}right:")?;
            write_node(f, right, source, depth + 1)
        },
        Expr::UnaryOp { expr, .. } => {
            writeln!(f, "{indent}arg:")?;
            write_node(f, expr, source, depth + 1)
        },
        Expr::FunctionCall { arguments, .. } => {
            for (i, argument) in arguments.iter().enumerate() {
                writeln!(f, "{indent}args[{i}]:")?;
                write_node(f, argument, source, depth + 1)?;
            }
            Ok(())
        },
        Expr::Number { .. } | Expr::Identifier { .. } => Ok(()),
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floating-point remainder (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
}

/// Represents a prefix sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Identity (e.g. `+x`).
    Plus,
}

impl UnaryOperator {
    /// Combines two stacked signs: `-(-x)` is `+x`, `-(+x)` is `-x`.
    ///
    /// # Example
    /// ```
    /// use arithc::ast::UnaryOperator::{Negate, Plus};
    ///
    /// assert_eq!(Negate.combine(Negate), Plus);
    /// assert_eq!(Negate.combine(Plus), Negate);
    /// assert_eq!(Plus.combine(Negate), Negate);
    /// ```
    #[must_use]
    pub const fn combine(self, inner: Self) -> Self {
        match (self, inner) {
            (Self::Negate, Self::Negate) | (Self::Plus, Self::Plus) => Self::Plus,
            (Self::Negate, Self::Plus) | (Self::Plus, Self::Negate) => Self::Negate,
        }
    }

    /// Applies the sign to a value.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Negate => -value,
            Self::Plus => value,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Plus => write!(f, "+"),
        }
    }
}
