/// Compiled expression trees and their evaluation.
///
/// Contains the resolved node type produced by the compiler and the
/// structural walk that turns it into a value.
pub mod core;

/// Binary operator arithmetic.
///
/// Maps each operator to its IEEE-754 operation; shared by evaluation and
/// constant folding.
pub mod binary;
