use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseErrorKind,
    interpreter::{
        lexer::{TokenKind, TokenSet},
        parser::core::{MAX_CALL_ARGUMENTS, Parser},
    },
};

const SIGN: TokenSet = TokenSet::of(&[TokenKind::Minus, TokenKind::Plus]);
const IDENTIFIER: TokenSet = TokenSet::of(&[TokenKind::Identifier]);
const OPEN: TokenSet = TokenSet::of(&[TokenKind::LParen]);
const CLOSE: TokenSet = TokenSet::of(&[TokenKind::RParen]);
const COMMA: TokenSet = TokenSet::of(&[TokenKind::Comma]);

impl<'src> Parser<'src, '_> {
    /// Parses a unary expression.
    ///
    /// Supports prefix signs `-` and `+`. Signs are right-associative, so an
    /// input like `-+x` is parsed as `-(+x)`. A sign binds looser than `^`:
    /// `-2^2` is `-(2^2)`.
    ///
    /// Every nested expression passes through here, so this is where the
    /// nesting depth is tracked.
    ///
    /// Grammar:
    /// ```text
    ///     unary := ("-" | "+") unary
    ///            | power
    /// ```
    pub(in crate::interpreter::parser) fn parse_unary(&mut self) -> Option<Expr<'src>> {
        self.nested(Self::parse_signed)
    }

    fn parse_signed(&mut self) -> Option<Expr<'src>> {
        if !self.at(SIGN) {
            return self.parse_power();
        }

        let sign = self.advance();
        let op = match sign.kind {
            TokenKind::Minus => UnaryOperator::Negate,
            _ => UnaryOperator::Plus,
        };
        let operand = self.parse_unary();
        Some(Expr::UnaryOp { op,
                             expr: Box::new(operand?),
                             span: sign.span() })
    }

    /// Parses a function call or falls through to an atom.
    ///
    /// An identifier immediately followed by `(` is a call, whether or not a
    /// function of that name exists; names are resolved when compiling.
    ///
    /// Grammar:
    /// ```text
    ///     call := identifier "(" (expression ("," expression)*)? ")"
    ///           | basic
    /// ```
    pub(in crate::interpreter::parser) fn parse_call(&mut self) -> Option<Expr<'src>> {
        if !self.at(IDENTIFIER) {
            return self.parse_basic();
        }

        let callee = self.advance();
        let name = self.lexeme(callee);
        if !self.at(OPEN) {
            return Some(Expr::Identifier { name,
                                           span: callee.span() });
        }

        let arguments = self.parse_arguments()?;
        Some(Expr::FunctionCall { name,
                                  arguments,
                                  span: callee.span() })
    }

    /// Parses a parenthesised, comma-separated argument list.
    ///
    /// An immediately encountered `)` produces an empty list. Arguments past
    /// [`MAX_CALL_ARGUMENTS`] record a `TooManyArguments` error at the comma
    /// that introduced the first of them; they are still parsed, then
    /// dropped.
    fn parse_arguments(&mut self) -> Option<Vec<Expr<'src>>> {
        self.eat(OPEN)?;
        if self.at(CLOSE) {
            self.advance();
            return Some(Vec::new());
        }

        let mut arguments = vec![self.parse_expression()];
        let mut overflowed = false;
        while self.at(COMMA) {
            let comma = self.advance();
            let argument = self.parse_expression();
            if arguments.len() < MAX_CALL_ARGUMENTS {
                arguments.push(argument);
            } else if !overflowed {
                overflowed = true;
                self.report(&format!("Function call takes at most {MAX_CALL_ARGUMENTS} arguments"));
                self.record(ParseErrorKind::TooManyArguments, comma.offset);
            }
        }
        self.eat(CLOSE)?;

        arguments.into_iter().collect()
    }

    /// Parses an atom: a number, a variable name, or a parenthesised
    /// expression (returned as-is, no wrapper node).
    ///
    /// Grammar:
    /// ```text
    ///     basic := number
    ///            | identifier
    ///            | "(" expression ")"
    /// ```
    fn parse_basic(&mut self) -> Option<Expr<'src>> {
        let token = self.peek();
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression();
                self.eat(CLOSE)?;
                expr
            },
            TokenKind::Number => {
                self.advance();
                // `number_length` only accepts literals `f64::from_str` reads.
                let value = self.lexeme(token).parse().unwrap_or(f64::NAN);
                Some(Expr::Number { value,
                                    span: token.span() })
            },
            TokenKind::Identifier => {
                self.advance();
                Some(Expr::Identifier { name: self.lexeme(token),
                                        span: token.span() })
            },
            _ => {
                self.report(&format!("Expected expression but got: '{}'.", token.kind));
                self.record(Self::mismatch_kind(token, ParseErrorKind::ExpectedExpression),
                            token.offset);
                None
            },
        }
    }
}
