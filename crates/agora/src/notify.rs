/// Boundary for transient, user-facing notifications.
///
/// The pipeline reports progress and per-item failures through this trait;
/// how they render (console lines, log events, toasts) is up to the
/// presentation layer that injects the implementation.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards every notification to `tracing`. Default sink for headless
/// callers such as the server.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
