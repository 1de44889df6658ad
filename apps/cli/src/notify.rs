//! # Notifications
//!
//! Every action outcome is reported as one short message. The console
//! notifier prints successes to stdout and failures to stderr; tests record
//! them instead.

use std::io::Write;
use tracing::warn;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Side channel for action outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: String) {
        self.notify(Notification::success(message));
    }

    /// Reports a failed action: `context` says what was attempted.
    fn failure(&self, context: &str, err: &CliError) {
        warn!(code = ?err.code, "{}: {}", context, err.message);
        self.notify(Notification::error(format!("{}: {}", context, err)));
    }
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        // Ignore a closed pipe
        let _ = match notification.level {
            Level::Success => writeln!(std::io::stdout(), "✔ {}", notification.message),
            Level::Error => writeln!(std::io::stderr(), "✖ {}", notification.message),
        };
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every notification for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn all(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.messages(Level::Error)
        }

        pub fn successes(&self) -> Vec<String> {
            self.messages(Level::Success)
        }

        fn messages(&self, level: Level) -> Vec<String> {
            self.all()
                .into_iter()
                .filter(|n| n.level == level)
                .map(|n| n.message)
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }
}
