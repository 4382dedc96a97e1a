/// Numeric conversion and formatting helpers.
///
/// This module provides the conversions between integer and floating-point
/// types that builtins need, with the lossy cases spelled out (truncation
/// toward zero saturates and wide integers round to the nearest `f64`), and
/// the C-style significant-digit formatting used by the command line.
pub mod num;
