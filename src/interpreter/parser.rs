/// Parser state, token matching and error recording.
///
/// Holds the one-token lookahead, records the first error together with
/// every later error kind, and exposes the parse entry points.
pub mod core;

/// Binary operator parsing.
///
/// Implements the left-associative `+ -` and `* / %` levels and the
/// right-associative `^` level.
pub mod binary;

/// Prefix signs, calls and atoms.
///
/// Handles `-x`/`+x`, `name(args...)`, numbers, identifiers and
/// parenthesised groups.
pub mod unary;
