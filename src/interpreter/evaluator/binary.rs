use crate::ast::BinaryOperator;

impl BinaryOperator {
    /// Applies the operator to two operands.
    ///
    /// Follows ordinary floating-point rules: division by zero yields an
    /// infinity or NaN, `%` is the truncated remainder with the sign of the
    /// dividend, and `^` is [`f64::powf`].
    ///
    /// # Example
    /// ```
    /// use arithc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Sub.apply(10.0, 3.0), 7.0);
    /// assert_eq!(BinaryOperator::Mod.apply(-7.0, 3.0), -1.0);
    /// assert_eq!(BinaryOperator::Pow.apply(2.0, 10.0), 1024.0);
    /// assert!(BinaryOperator::Div.apply(1.0, 0.0).is_infinite());
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        match self {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div => left / right,
            Mod => left % right,
            Pow => left.powf(right),
        }
    }
}
