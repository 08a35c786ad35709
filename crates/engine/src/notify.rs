//! User-facing notification sink.
//!
//! The engine reports progress and validation failures through a `Notifier`
//! so the host decides how messages surface (toast, terminal, log line).

/// Receives the short status messages the engine emits while a session runs.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Drops every message. Useful for headless callers and tests that only
/// care about state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}

    fn info(&self, _message: &str) {}
}
