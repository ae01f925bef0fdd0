//! Transient user notifications.

use parking_lot::Mutex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Error => "error",
        })
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: Level, message: &str);

    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn info(&self, message: &str) {
        self.notify(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// Prints to the terminal. Errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Error => eprintln!("✗ {}", message),
            Level::Success => println!("✓ {}", message),
            Level::Info => println!("{}", message),
        }
    }
}

/// Keeps notifications in memory.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.lock().iter().filter(|(l, _)| *l == level).count()
    }

    pub fn last(&self) -> Option<(Level, String)> {
        self.entries.lock().last().cloned()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, level: Level, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_levels() {
        let log = NotificationLog::new();
        log.success("Saved");
        log.error("Nope");
        log.error("Still nope");

        assert_eq!(log.count(Level::Error), 2);
        assert_eq!(log.count(Level::Success), 1);
        assert_eq!(log.last(), Some((Level::Error, "Still nope".to_string())));
    }
}
