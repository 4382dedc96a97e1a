/// The symbol table and its entry types.
///
/// Maps names to variable cells and to fixed-arity native functions.
pub mod core;

/// Built-in functions and constants.
///
/// Contains the mathematical functions and constants every table can be
/// seeded with.
pub mod builtin;
