use agora::notify::Notifier;
use console::style;

/// Renders pipeline notifications as styled console lines, the terminal
/// analogue of the marketplace's transient toasts.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{} {}", style("•").blue().bold(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", style("✓").green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }
}
