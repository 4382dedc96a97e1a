use crate::{
    ast::{Ast, Expr},
    diagnostics::{MessageHandler, Severity, SilentHandler},
    error::{ParseError, ParseErrorKind},
    interpreter::lexer::{Scanner, Token, TokenKind, TokenSet},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Largest number of arguments a call may supply.
pub const MAX_CALL_ARGUMENTS: usize = 256;

/// Deepest nesting the parser accepts.
///
/// Parentheses, signs, `^` exponents and call arguments each nest one level,
/// and every further operator in a `+ -` or `* / %` chain adds one more.
/// Deeper input fails with [`ParseErrorKind::NestingTooDeep`] instead of
/// exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Recursive-descent parser with one token of lookahead.
///
/// Grammar, in order of increasing precedence:
/// ```text
///     expression     := addition
///     addition       := multiplication (("+" | "-") multiplication)*
///     multiplication := unary (("*" | "/" | "%") unary)*
///     unary          := ("-" | "+") unary | power
///     power          := call ("^" unary)?
///     call           := identifier "(" (expression ("," expression)*)? ")" | basic
///     basic          := number | identifier | "(" expression ")"
/// ```
///
/// The parser does not stop at the first problem. It records the first error
/// and its offset, keeps collecting the kinds of any later errors, and parses
/// on so that all of them are reported together. A parse that recorded
/// anything fails as a whole.
pub struct Parser<'src, 'h> {
    scanner:   Scanner<'src, 'h>,
    handler:   &'h dyn MessageHandler,
    lookahead: Token,
    depth:     usize,
    error:     Option<ParseError>,
}

impl<'src> Parser<'src, 'static> {
    /// Creates a parser that reports nothing.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Parser::with_handler(source, &SilentHandler)
    }
}

impl<'src, 'h> Parser<'src, 'h> {
    /// Creates a parser that reports diagnostics to `handler`.
    #[must_use]
    pub fn with_handler(source: &'src str, handler: &'h dyn MessageHandler) -> Self {
        let mut scanner = Scanner::with_handler(source, handler);
        let lookahead = scanner.next_token();
        Self { scanner,
               handler,
               lookahead,
               depth: 0,
               error: None }
    }

    /// Parses the whole input as one expression.
    ///
    /// # Errors
    /// Returns the first recorded [`ParseError`], with every other recorded
    /// kind in its `kinds` set.
    ///
    /// # Example
    /// ```
    /// use arithc::{error::ParseErrorKind, interpreter::parser::core::Parser};
    ///
    /// let ast = Parser::new("2 * (x + 1)").parse().unwrap();
    /// assert_eq!(ast.root().kind_name(), "binary");
    ///
    /// let err = Parser::new("(1 + 2").parse().unwrap_err();
    /// assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    /// assert_eq!(err.offset, 6);
    /// ```
    pub fn parse(mut self) -> ParseResult<Ast<'src>> {
        let root = self.parse_expression();
        self.eat(TokenKind::EndOfInput.into());

        match (self.error, root) {
            (Some(error), _) => Err(error),
            (None, Some(root)) => Ok(Ast::new(self.scanner.source(), root)),
            (None, None) => Err(ParseError::new(ParseErrorKind::ExpectedExpression, 0)),
        }
    }

    /// Parses a full expression.
    ///
    /// Grammar: `expression := addition`
    ///
    /// Returns `None` when a required part is missing; the reason has been
    /// recorded by then.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self) -> Option<Expr<'src>> {
        self.parse_addition()
    }

    /// Tests whether the lookahead belongs to `expected`.
    pub(in crate::interpreter::parser) const fn at(&self, expected: TokenSet) -> bool {
        expected.contains(self.lookahead.kind)
    }

    /// The lookahead token.
    pub(in crate::interpreter::parser) const fn peek(&self) -> Token {
        self.lookahead
    }

    /// Consumes the lookahead unconditionally and returns it.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Token {
        let token = self.lookahead;
        self.lookahead = self.scanner.next_token();
        token
    }

    /// Consumes the lookahead if it belongs to `expected`.
    ///
    /// Otherwise records an unexpected-token (or unexpected-end-of-input)
    /// error at the lookahead, leaves it in place and returns `None`.
    pub(in crate::interpreter::parser) fn eat(&mut self, expected: TokenSet) -> Option<Token> {
        if self.at(expected) {
            return Some(self.advance());
        }

        let found = self.lookahead;
        self.report(&format!("Expected '{expected}', but got '{}'", found.kind));
        self.record(Self::mismatch_kind(found, ParseErrorKind::UnexpectedToken),
                    found.offset);
        None
    }

    /// Picks `otherwise`, or `UnexpectedEndOfInput` when `found` marks the end
    /// of the input.
    pub(in crate::interpreter::parser) const fn mismatch_kind(found: Token,
                                                              otherwise: ParseErrorKind)
                                                              -> ParseErrorKind {
        match found.kind {
            TokenKind::EndOfInput => ParseErrorKind::UnexpectedEndOfInput,
            _ => otherwise,
        }
    }

    /// Tests whether a subtree `extra` levels below the current one stays
    /// within [`MAX_NESTING_DEPTH`], recording an error at the lookahead if
    /// it does not.
    pub(in crate::interpreter::parser) fn within_depth(&mut self, extra: usize) -> bool {
        if self.depth + extra <= MAX_NESTING_DEPTH {
            return true;
        }

        let found = self.lookahead;
        self.report(&format!("Expression nests deeper than {MAX_NESTING_DEPTH} levels"));
        self.record(ParseErrorKind::NestingTooDeep, found.offset);
        false
    }

    /// Runs `parse` one nesting level deeper, or returns `None` at the limit.
    pub(in crate::interpreter::parser) fn nested(&mut self,
                                                 parse: impl FnOnce(&mut Self) -> Option<Expr<'src>>)
                                                 -> Option<Expr<'src>> {
        if !self.within_depth(1) {
            return None;
        }
        self.depth += 1;
        let expr = parse(self);
        self.depth -= 1;
        expr
    }

    /// Records an error; the first one decides the reported offset.
    pub(in crate::interpreter::parser) fn record(&mut self, kind: ParseErrorKind, offset: usize) {
        if let Some(error) = self.error.as_mut() {
            error.kinds.insert(kind);
            return;
        }
        self.error = Some(ParseError::new(kind, offset));
    }

    /// Sends an error message to the handler.
    pub(in crate::interpreter::parser) fn report(&self, message: &str) {
        self.handler.handle(Severity::Error, message);
    }

    /// The text of `token`.
    pub(in crate::interpreter::parser) fn lexeme(&self, token: Token) -> &'src str {
        token.lexeme(self.scanner.source())
    }
}
