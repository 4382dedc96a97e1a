use std::fmt;

use logos::Logos;

use crate::{
    ast::Span,
    diagnostics::{MessageHandler, Severity, SilentHandler},
};

/// The kind of a lexical token.
///
/// Kinds carry no payload; the text of a token is recovered from the source
/// through its span. Each kind owns one bit of a [`TokenSet`], which the
/// parser uses to expect "one of" several kinds at once.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9.]", scan_number)]
    Number,
    /// Identifier tokens; variable or function names such as `x` or `sqrt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Produced once the input is exhausted.
    EndOfInput,
    /// Input that matches no token.
    Invalid,
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\n\r\x0B\x0C]+", logos::skip)]
    Ignored,
}

impl TokenKind {
    /// Every kind the scanner can hand to the parser.
    pub const ALL: [Self; 13] = [Self::Number,
                                 Self::Identifier,
                                 Self::Plus,
                                 Self::Minus,
                                 Self::Star,
                                 Self::Slash,
                                 Self::Percent,
                                 Self::Caret,
                                 Self::LParen,
                                 Self::RParen,
                                 Self::Comma,
                                 Self::EndOfInput,
                                 Self::Invalid];

    /// The bit this kind occupies in a [`TokenSet`].
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// How the kind is spelled in diagnostics.
    ///
    /// # Example
    /// ```
    /// use arithc::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::Caret.describe(), "^");
    /// assert_eq!(TokenKind::EndOfInput.describe(), "end of input");
    /// ```
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
            Self::EndOfInput => "end of input",
            Self::Invalid => "invalid",
            Self::Ignored => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A set of token kinds backed by a bit mask.
///
/// # Example
/// ```
/// use arithc::interpreter::lexer::{TokenKind, TokenSet};
///
/// const ADDITIVE: TokenSet = TokenSet::of(&[TokenKind::Plus, TokenKind::Minus]);
///
/// assert!(ADDITIVE.contains(TokenKind::Minus));
/// assert!(!ADDITIVE.contains(TokenKind::Star));
/// assert_eq!(ADDITIVE.to_string(), "+ or -");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u16);

impl TokenSet {
    /// Builds a set from a list of kinds.
    #[must_use]
    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Tests whether `kind` is a member.
    #[must_use]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Iterates over the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl From<TokenKind> for TokenSet {
    fn from(kind: TokenKind) -> Self {
        Self(kind.bit())
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// A token: its kind and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// What was recognised.
    pub kind:   TokenKind,
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Length in bytes; zero for end of input and invalid tokens.
    pub len:    usize,
}

impl Token {
    /// The span covered by the token.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.len)
    }

    /// The token's text within `source`.
    #[must_use]
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        self.span().slice(source)
    }
}

/// Lazily turns source text into tokens, one [`Scanner::next_token`] call at
/// a time.
///
/// Once the input is exhausted every further call returns an end-of-input
/// token at `source.len()`. Input matching no token produces an invalid token
/// of length zero; the scanner does not recover and keeps returning that same
/// token.
///
/// # Example
/// ```
/// use arithc::interpreter::lexer::{Scanner, TokenKind};
///
/// let kinds = Scanner::new("2 * (x + .5e1)").map(|t| t.kind)
///                                           .collect::<Vec<_>>();
///
/// assert_eq!(kinds,
///            [TokenKind::Number,
///             TokenKind::Star,
///             TokenKind::LParen,
///             TokenKind::Identifier,
///             TokenKind::Plus,
///             TokenKind::Number,
///             TokenKind::RParen,
///             TokenKind::EndOfInput]);
/// ```
pub struct Scanner<'src, 'h> {
    lexer:    logos::Lexer<'src, TokenKind>,
    handler:  &'h dyn MessageHandler,
    invalid:  Option<Token>,
    finished: bool,
}

impl<'src> Scanner<'src, 'static> {
    /// Creates a scanner that reports nothing.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Scanner::with_handler(source, &SilentHandler)
    }
}

impl<'src, 'h> Scanner<'src, 'h> {
    /// Creates a scanner that reports invalid input to `handler`.
    #[must_use]
    pub fn with_handler(source: &'src str, handler: &'h dyn MessageHandler) -> Self {
        Self { lexer: TokenKind::lexer(source),
               handler,
               invalid: None,
               finished: false }
    }

    /// The text being scanned.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.invalid {
            return token;
        }

        match self.lexer.next() {
            Some(Ok(kind)) => {
                let span = self.lexer.span();
                Token { kind,
                        offset: span.start,
                        len: span.len() }
            },
            Some(Err(())) => {
                let offset = self.lexer.span().start;
                self.handler.handle(Severity::Error,
                                    &format!("Invalid syntax: {}", &self.source()[offset..]));
                let token = Token { kind: TokenKind::Invalid,
                                    offset,
                                    len: 0 };
                self.invalid = Some(token);
                token
            },
            None => Token { kind:   TokenKind::EndOfInput,
                            offset: self.source().len(),
                            len:    0, },
        }
    }
}

/// Yields every token up to and including the first end-of-input or invalid
/// token.
impl Iterator for Scanner<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, TokenKind::EndOfInput | TokenKind::Invalid) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Extends a number token that starts with a digit or `.` to its full length.
///
/// Returns `false`, turning the token into a lexer error, when the literal is
/// malformed.
fn scan_number(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let start = lex.span().start;
    let len = number_length(&lex.source()[start..]);
    if len == 0 {
        return false;
    }
    lex.bump(len - 1);
    true
}

/// Measures the numeric literal at the start of `text`.
///
/// A literal is a run of digits with at most one `.`, optionally followed by
/// `e`/`E`, an optional sign and more digits. The `.` may not appear after
/// the exponent marker, the marker needs a digit before it, and both the
/// mantissa and the exponent need at least one digit. Returns `0` when the
/// prefix is not a valid literal.
///
/// # Example
/// ```
/// use arithc::interpreter::lexer::number_length;
///
/// assert_eq!(number_length("12.5e-3+x"), 7);
/// assert_eq!(number_length("5."), 2);
/// assert_eq!(number_length("."), 0);
/// assert_eq!(number_length("1e"), 0);
/// assert_eq!(number_length("1.2.3"), 0);
/// ```
#[must_use]
pub fn number_length(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut saw_digit = false;
    let mut saw_dot = false;
    let mut saw_exp = false;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => saw_digit = true,
            b'.' => {
                if saw_dot || saw_exp {
                    return 0;
                }
                saw_dot = true;
            },
            b'e' | b'E' => {
                if !saw_digit || saw_exp {
                    return 0;
                }
                if matches!(bytes.get(i + 1), Some(b'+' | b'-')) {
                    i += 1;
                }
                saw_digit = false;
                saw_exp = true;
            },
            _ => break,
        }
        i += 1;
    }

    if saw_digit { i } else { 0 }
}
