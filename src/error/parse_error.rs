use std::fmt;

use thiserror::Error;

/// A single reason a parse can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A token appeared where a different one was required.
    UnexpectedToken,
    /// An operand was required but the next token cannot start one.
    ExpectedExpression,
    /// The input ended while more tokens were required.
    UnexpectedEndOfInput,
    /// A call supplied more arguments than the fixed maximum.
    TooManyArguments,
    /// Parentheses, signs or operator chains nest deeper than the parser's
    /// limit.
    NestingTooDeep,
}

impl ParseErrorKind {
    const ALL: [Self; 5] = [Self::UnexpectedToken,
                            Self::ExpectedExpression,
                            Self::UnexpectedEndOfInput,
                            Self::TooManyArguments,
                            Self::NestingTooDeep];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken => write!(f, "Unexpected token"),
            Self::ExpectedExpression => write!(f, "Expected expression"),
            Self::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            Self::TooManyArguments => write!(f, "Too many arguments"),
            Self::NestingTooDeep => write!(f, "Expression nested too deeply"),
        }
    }
}

/// The set of error kinds recorded during one parse.
///
/// # Example
/// ```
/// use arithc::error::{ParseErrorKind, ParseErrorKinds};
///
/// let mut kinds = ParseErrorKinds::default();
/// kinds.insert(ParseErrorKind::ExpectedExpression);
/// kinds.insert(ParseErrorKind::UnexpectedToken);
///
/// assert!(kinds.contains(ParseErrorKind::UnexpectedToken));
/// assert!(!kinds.contains(ParseErrorKind::TooManyArguments));
/// assert_eq!(kinds.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseErrorKinds(u8);

impl ParseErrorKinds {
    /// Adds a kind to the set.
    pub const fn insert(&mut self, kind: ParseErrorKind) {
        self.0 |= kind.bit();
    }

    /// Tests whether `kind` was recorded.
    #[must_use]
    pub const fn contains(self, kind: ParseErrorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Tests whether nothing was recorded.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of distinct kinds recorded.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the recorded kinds.
    pub fn iter(self) -> impl Iterator<Item = ParseErrorKind> {
        ParseErrorKind::ALL.into_iter()
                           .filter(move |kind| self.contains(*kind))
    }
}

impl From<ParseErrorKind> for ParseErrorKinds {
    fn from(kind: ParseErrorKind) -> Self {
        Self(kind.bit())
    }
}

impl fmt::Display for ParseErrorKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Represents a failed parse.
///
/// `kind` and `offset` describe the first problem found; `kinds` holds every
/// kind recorded while the parser kept going after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error at offset {offset}: {kind}.")]
pub struct ParseError {
    /// The first recorded kind.
    pub kind:   ParseErrorKind,
    /// Every recorded kind, `kind` included.
    pub kinds:  ParseErrorKinds,
    /// Byte offset of the token where the first problem was found.
    pub offset: usize,
}

impl ParseError {
    /// Creates an error holding a single kind.
    #[must_use]
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind,
               kinds: kind.into(),
               offset }
    }
}
