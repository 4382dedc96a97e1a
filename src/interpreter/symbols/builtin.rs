use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, PI};

use crate::{
    interpreter::symbols::core::{NativeFn, SymbolTable},
    util::num::{i128_to_f64, i64_to_f64, truncate_to_i64},
};

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - the exact number of arguments,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used to seed symbol tables).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  NativeFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "min"   => { arity: 2, func: |args| args[0].min(args[1]) },
    "max"   => { arity: 2, func: |args| args[0].max(args[1]) },
    "log"   => { arity: 1, func: log },
    "logn"  => { arity: 2, func: logn },
    "ceil"  => { arity: 1, func: ceil },
    "floor" => { arity: 1, func: floor },
    "abs"   => { arity: 1, func: abs },
    "cos"   => { arity: 1, func: cos },
    "sin"   => { arity: 1, func: sin },
    "tan"   => { arity: 1, func: tan },
    "exp"   => { arity: 1, func: exp },
    "round" => { arity: 1, func: round },
    "pow"   => { arity: 2, func: |args| args[0].powf(args[1]) },
    "sqrt"  => { arity: 1, func: sqrt },
    "ncr"   => { arity: 2, func: ncr },
}

/// Built-in constants; all are registered as constant variables.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] =
    &[("pi", PI), ("e", E), ("pi_2", FRAC_PI_2), ("pi_4", FRAC_PI_4)];

/// Defines a one-argument builtin that applies an `f64` method to `args[0]`.
///
/// # Example
/// ```
/// use arithc::interpreter::symbols::builtin::sin;
///
/// let r = sin(&[std::f64::consts::FRAC_PI_2]);
///
/// assert_eq!(r, 1.0);
/// ```
macro_rules! unary_builtin {
    ($fname:ident, $real_fn:ident) => {
        #[doc = concat!("Applies [`f64::", stringify!($real_fn), "`] to the first argument.")]
        #[doc = ""]
        #[doc = "# Panics"]
        #[doc = "If `args` is empty. Registered with arity 1, so compiled calls always pass one value."]
        #[must_use]
        pub fn $fname(args: &[f64]) -> f64 {
            args[0].$real_fn()
        }
    };
}

unary_builtin!(log, ln);
unary_builtin!(ceil, ceil);
unary_builtin!(floor, floor);
unary_builtin!(abs, abs);
unary_builtin!(cos, cos);
unary_builtin!(sin, sin);
unary_builtin!(tan, tan);
unary_builtin!(exp, exp);
unary_builtin!(round, round);
unary_builtin!(sqrt, sqrt);

/// Logarithm of `x` to an arbitrary base: `logn(base, x) = ln(x) / ln(base)`.
///
/// # Panics
/// If `args` holds fewer than two values.
///
/// # Example
/// ```
/// use arithc::interpreter::symbols::builtin::logn;
///
/// assert!((logn(&[2.0, 1024.0]) - 10.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn logn(args: &[f64]) -> f64 {
    args[1].ln() / args[0].ln()
}

/// Calculates the binomial coefficient of `n` and `r`.
///
/// Both arguments are truncated toward zero. The result is `0` when `r > n`
/// or `r < 0`. It is exact while it fits a 128-bit integer; past that the
/// product continues in `f64` and is `+inf` only when `f64` overflows.
///
/// # Panics
/// If `args` holds fewer than two values.
///
/// # Example
/// ```
/// use arithc::interpreter::symbols::builtin::ncr;
///
/// assert_eq!(ncr(&[5.0, 2.0]), 10.0);
/// assert_eq!(ncr(&[5.9, 2.2]), 10.0);
/// assert_eq!(ncr(&[2.0, 5.0]), 0.0);
/// assert_eq!(ncr(&[7.0, 0.0]), 1.0);
/// assert!((ncr(&[1000.0, 500.0]) / 2.702_882_409_454_365_6e299 - 1.0).abs() < 1e-12);
/// assert!(ncr(&[2000.0, 1000.0]).is_infinite());
/// ```
#[must_use]
pub fn ncr(args: &[f64]) -> f64 {
    let n = truncate_to_i64(args[0]);
    let r = truncate_to_i64(args[1]);

    if r < 0 || r > n {
        return 0.0;
    }

    let r = r.min(n - r);
    let mut exact: i128 = 1;
    let mut i = 1;
    while i <= r {
        match exact.checked_mul(i128::from(n - r + i)) {
            Some(product) => exact = product / i128::from(i),
            None => break,
        }
        i += 1;
    }

    // Partial products are binomial coefficients; the ratio form only
    // overflows once the result does.
    let mut approx = i128_to_f64(exact);
    while i <= r && approx.is_finite() {
        approx *= i64_to_f64(n - r + i) / i64_to_f64(i);
        i += 1;
    }

    approx
}

impl SymbolTable {
    /// Registers every built-in function and constant, replacing entries
    /// with the same names.
    ///
    /// Functions: `min/2`, `max/2`, `log/1` (natural), `logn/2`, `ceil/1`,
    /// `floor/1`, `abs/1`, `cos/1`, `sin/1`, `tan/1`, `exp/1`, `round/1`,
    /// `pow/2`, `sqrt/1`, `ncr/2`. Constants: `pi`, `e`, `pi_2`, `pi_4`.
    pub fn add_builtins(&mut self) {
        for builtin in BUILTIN_TABLE {
            self.add_function(builtin.name, builtin.func, builtin.arity);
        }
        for (name, value) in BUILTIN_CONSTANTS {
            self.add_variable(*name, *value, true);
        }
    }
}
