use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::{evaluator::core::Node, symbols::core::NativeFn},
};

impl<'t> Node<'t> {
    /// Builds a signed node.
    ///
    /// A constant operand absorbs the sign, and a sign applied to an
    /// existing unary node is merged into it, so `--x` stays one node.
    ///
    /// # Example
    /// ```
    /// use arithc::{ast::UnaryOperator, interpreter::evaluator::core::Node};
    ///
    /// let folded = Node::unary(UnaryOperator::Negate, Node::Number(5.0));
    /// assert_eq!(folded.as_constant(), Some(-5.0));
    /// ```
    #[must_use]
    pub fn unary(sign: UnaryOperator, operand: Self) -> Self {
        match operand {
            Self::Number(value) => Self::Number(sign.apply(value)),
            Self::Unary { sign: inner, operand } => Self::Unary { sign: sign.combine(inner),
                                                                  operand },
            operand => Self::Unary { sign,
                                     operand: Box::new(operand) },
        }
    }

    /// Builds a binary node, computing it right away when both operands are
    /// constant.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        if let (Some(l), Some(r)) = (left.as_constant(), right.as_constant()) {
            return Self::Number(op.apply(l, r));
        }
        Self::Binary { op,
                       left: Box::new(left),
                       right: Box::new(right) }
    }

    /// Builds a call node, invoking `function` right away when every argument
    /// is constant.
    ///
    /// A call without arguments counts as constant.
    #[must_use]
    pub fn call(function: NativeFn, args: Vec<Self>) -> Self {
        let constants = args.iter().map(Self::as_constant).collect::<Option<Vec<_>>>();
        if let Some(values) = constants {
            return Self::Number(function(&values));
        }
        Self::Call { function,
                     args: args.into_boxed_slice() }
    }
}
