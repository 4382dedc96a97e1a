/// Name resolution and the compile entry points.
///
/// Walks an AST bottom-up, resolves identifiers and calls against a symbol
/// table and reports the first failure.
pub mod core;

/// Constant folding.
///
/// Node constructors that collapse compile-time-constant subtrees into a
/// single value as the tree is built.
pub mod fold;
