use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Token, TokenKind, TokenSet},
        parser::core::Parser,
    },
};

const ADDITIVE: TokenSet = TokenSet::of(&[TokenKind::Plus, TokenKind::Minus]);
const MULTIPLICATIVE: TokenSet =
    TokenSet::of(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]);
const POWER: TokenSet = TokenSet::of(&[TokenKind::Caret]);

impl<'src> Parser<'src, '_> {
    /// Parses addition and subtraction expressions.
    ///
    /// Handles left-associative binary operators: `+` and `-`.
    ///
    /// The rule is: `addition := multiplication (("+" | "-") multiplication)*`
    pub(in crate::interpreter::parser) fn parse_addition(&mut self) -> Option<Expr<'src>> {
        let mut left = self.parse_multiplication();
        let mut chain = 0;
        while self.at(ADDITIVE) {
            chain += 1;
            if !self.within_depth(chain) {
                return None;
            }
            let operator = self.advance();
            let right = self.parse_multiplication();
            left = binary(left, operator, right);
        }
        left
    }

    /// Parses multiplication-level expressions.
    ///
    /// Handles left-associative operators: `*`, `/` and `%`.
    ///
    /// The rule is: `multiplication := unary (("*" | "/" | "%") unary)*`
    pub(in crate::interpreter::parser) fn parse_multiplication(&mut self) -> Option<Expr<'src>> {
        let mut left = self.parse_unary();
        let mut chain = 0;
        while self.at(MULTIPLICATIVE) {
            chain += 1;
            if !self.within_depth(chain) {
                return None;
            }
            let operator = self.advance();
            let right = self.parse_unary();
            left = binary(left, operator, right);
        }
        left
    }

    /// Parses exponentiation expressions.
    ///
    /// The exponent is parsed at unary level, which loops back here, so
    /// `a ^ b ^ c` parses as `a ^ (b ^ c)` and `2 ^ -1` is accepted.
    ///
    /// The rule is: `power := call ("^" unary)?`
    pub(in crate::interpreter::parser) fn parse_power(&mut self) -> Option<Expr<'src>> {
        let base = self.parse_call();
        if !self.at(POWER) {
            return base;
        }
        let operator = self.advance();
        let exponent = self.parse_unary();
        binary(base, operator, exponent)
    }
}

/// Joins two operands with the operator in `token`, if both are present.
fn binary<'src>(left: Option<Expr<'src>>,
                token: Token,
                right: Option<Expr<'src>>)
                -> Option<Expr<'src>> {
    Some(Expr::BinaryOp { left:  Box::new(left?),
                          op:    token_to_binary_operator(token.kind)?,
                          right: Box::new(right?),
                          span:  token.span(), })
}

/// Maps a token kind to its corresponding binary operator.
///
/// # Example
/// ```
/// use arithc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Percent),
///            Some(BinaryOperator::Mod));
/// assert_eq!(token_to_binary_operator(TokenKind::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
