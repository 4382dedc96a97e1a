use std::cell::Cell;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::{parser::core::MAX_CALL_ARGUMENTS, symbols::core::NativeFn},
};

/// A node of a compiled expression.
///
/// Names are already resolved: variables are references to symbol table
/// cells and calls hold the native function pointer. Constant subtrees have
/// been folded into [`Node::Number`] by the compiler.
#[derive(Debug, Clone)]
pub enum Node<'t> {
    /// A constant value.
    Number(f64),
    /// A mutable variable, read on every evaluation.
    Variable(&'t Cell<f64>),
    /// A sign applied to a non-constant operand.
    Unary {
        /// The sign.
        sign:    UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// A binary operation with at least one non-constant operand.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A native function call with at least one non-constant argument.
    Call {
        /// The function to invoke.
        function: NativeFn,
        /// Compiled arguments, at most [`MAX_CALL_ARGUMENTS`] of them.
        args:     Box<[Self]>,
    },
}

impl Node<'_> {
    /// Computes the value of the subtree.
    ///
    /// Never fails and never allocates; call arguments are evaluated left to
    /// right into a stack buffer.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Variable(cell) => cell.get(),
            Self::Unary { sign, operand } => sign.apply(operand.evaluate()),
            Self::Binary { op, left, right } => op.apply(left.evaluate(), right.evaluate()),
            Self::Call { function, args } => {
                let mut buffer = [0.0; MAX_CALL_ARGUMENTS];
                let len = args.len().min(MAX_CALL_ARGUMENTS);
                for (slot, arg) in buffer.iter_mut().zip(args.iter()) {
                    *slot = arg.evaluate();
                }
                function(&buffer[..len])
            },
        }
    }

    /// The value of a constant node.
    #[must_use]
    pub const fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Number of nodes in the subtree, `self` included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + match self {
            Self::Number(_) | Self::Variable(_) => 0,
            Self::Unary { operand, .. } => operand.node_count(),
            Self::Binary { left, right, .. } => left.node_count() + right.node_count(),
            Self::Call { args, .. } => args.iter().map(Self::node_count).sum(),
        }
    }
}

/// An expression ready for repeated evaluation.
///
/// Borrows the [`SymbolTable`](crate::interpreter::symbols::core::SymbolTable)
/// it was compiled against for `'t`, so the table outlives it. Evaluating
/// reads mutable variables through their cells, so changes made with
/// [`Variable::set`](crate::interpreter::symbols::core::Variable::set) are
/// picked up without recompiling.
///
/// # Example
/// ```
/// use arithc::{compile, interpreter::symbols::core::SymbolTable};
///
/// let table = SymbolTable::with_builtins();
/// let expr = compile("2 + 2 * 2", &table).unwrap();
///
/// assert!(expr.is_constant());
/// assert_eq!(expr.node_count(), 1);
/// assert_eq!(expr.evaluate(), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct CompiledExpr<'t> {
    root: Node<'t>,
}

impl<'t> CompiledExpr<'t> {
    /// Wraps a compiled root node.
    #[must_use]
    pub const fn new(root: Node<'t>) -> Self {
        Self { root }
    }

    /// Computes the current value of the expression.
    #[must_use]
    pub fn evaluate(&self) -> f64 {
        self.root.evaluate()
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &Node<'t> {
        &self.root
    }

    /// Whether the whole expression folded to a single constant.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.root.as_constant().is_some()
    }

    /// The folded value, if the whole expression is constant.
    #[must_use]
    pub const fn constant_value(&self) -> Option<f64> {
        self.root.as_constant()
    }

    /// Number of nodes in the compiled tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
