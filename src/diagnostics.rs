use std::fmt;

/// Severity attached to every diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational output.
    Info,
    /// Something suspicious that did not stop the pipeline.
    Warn,
    /// A failure reported alongside a returned error value.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// Receives formatted diagnostics produced while scanning, parsing and
/// compiling.
///
/// Handlers are a side channel only: whatever a handler does, the pipeline
/// returns the same values. Any `Fn(Severity, &str)` closure is a handler.
///
/// # Example
/// ```
/// use std::cell::RefCell;
///
/// use arithc::diagnostics::{MessageHandler, Severity};
///
/// let seen = RefCell::new(Vec::new());
/// let handler = |severity: Severity, message: &str| {
///     seen.borrow_mut().push((severity, message.to_string()));
/// };
///
/// handler.handle(Severity::Warn, "careful");
/// assert_eq!(seen.borrow()[0].0, Severity::Warn);
/// ```
pub trait MessageHandler {
    /// Handles one formatted message.
    fn handle(&self, severity: Severity, message: &str);
}

impl<F> MessageHandler for F where F: Fn(Severity, &str)
{
    fn handle(&self, severity: Severity, message: &str) {
        self(severity, message);
    }
}

/// Default handler: writes `[severity] message` lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutHandler;

impl MessageHandler for StdoutHandler {
    fn handle(&self, severity: Severity, message: &str) {
        println!("[{severity}] {message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentHandler;

impl MessageHandler for SilentHandler {
    fn handle(&self, _severity: Severity, _message: &str) {}
}
