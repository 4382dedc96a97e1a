use std::{cell::Cell, collections::HashMap};

/// Signature of a native function.
///
/// The slice always holds exactly as many values as the function's declared
/// arity.
pub type NativeFn = fn(&[f64]) -> f64;

/// A named value owned by a [`SymbolTable`].
///
/// The value lives in a [`Cell`], so it can be changed through a shared
/// reference while compiled expressions that read it are alive.
#[derive(Debug)]
pub struct Variable {
    value:    Cell<f64>,
    constant: bool,
}

impl Variable {
    /// Creates a variable holding `value`.
    #[must_use]
    pub const fn new(value: f64, constant: bool) -> Self {
        Self { value: Cell::new(value),
               constant }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Replaces the current value.
    ///
    /// Expressions compiled while the variable was constant captured its
    /// value at that time and do not see the change.
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }

    /// Whether compiled expressions snapshot this variable instead of
    /// reading it on every evaluation.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.constant
    }

    /// The storage cell compiled expressions read from.
    pub(crate) const fn cell(&self) -> &Cell<f64> {
        &self.value
    }
}

/// A native function together with the number of arguments it takes.
#[derive(Debug, Clone, Copy)]
pub struct Function {
    native: NativeFn,
    arity:  usize,
}

impl Function {
    /// Wraps `native`, which takes exactly `arity` arguments.
    #[must_use]
    pub const fn new(native: NativeFn, arity: usize) -> Self {
        Self { native, arity }
    }

    /// The declared number of arguments.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The underlying function pointer.
    #[must_use]
    pub const fn native(&self) -> NativeFn {
        self.native
    }
}

/// Stores the variables and functions expressions are compiled against.
///
/// Names are case-sensitive and unique per kind; adding a name again
/// replaces the previous entry. Compiled expressions borrow the table, so it
/// cannot be changed structurally or dropped while any of them is alive.
/// Variable values can still be changed through [`Variable::set`].
///
/// ## Usage
/// ```
/// use arithc::{compile, interpreter::symbols::core::SymbolTable};
///
/// let mut table = SymbolTable::with_builtins();
/// table.add_variable("a", 1.0, false);
///
/// let expr = compile("a * 2 + pi_2 * 0", &table).unwrap();
/// let a = table.find_variable("a").unwrap();
///
/// for i in 0..3 {
///     a.set(f64::from(i));
///     assert_eq!(expr.evaluate(), f64::from(i) * 2.0);
/// }
/// ```
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: HashMap<String, Variable>,
    functions: HashMap<String, Function>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table seeded with the built-in functions and constants.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.add_builtins();
        table
    }

    /// Adds or replaces a variable.
    pub fn add_variable(&mut self, name: impl Into<String>, value: f64, constant: bool) {
        self.variables.insert(name.into(), Variable::new(value, constant));
    }

    /// Adds or replaces a function taking exactly `arity` arguments.
    pub fn add_function(&mut self, name: impl Into<String>, native: NativeFn, arity: usize) {
        self.functions.insert(name.into(), Function::new(native, arity));
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn find_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Iterates over all variables in unspecified order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Iterates over all functions in unspecified order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.functions.iter().map(|(name, f)| (name.as_str(), f))
    }
}
