//! Confirmation prompt shown before every delete.

use std::io::{self, BufRead, Write};

pub trait Confirm: Send + Sync {
    /// Asks `prompt`; true means go ahead.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Asks on the terminal. Anything but "y"/"yes" declines, as does a
/// closed stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{} [y/N] ", prompt).and_then(|_| stdout.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

/// Answers every prompt the same way (`--yes`).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
