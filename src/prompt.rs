use std::io::{self, BufRead, Write};

/// Seam for the delete confirmation dialog.
///
/// The list view-model only ever asks a yes/no question; injecting the
/// prompt keeps destructive flows scriptable in tests.
pub trait ConfirmationPrompt: Send + Sync {
    /// Shows `message` and returns whether the operator confirmed.
    fn confirm(&self, message: &str) -> bool;
}

/// Prompt backed by the controlling terminal. Answers other than
/// `y`/`yes` (any case) decline.
pub struct StdinPrompt;

impl ConfirmationPrompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[cfg(test)]
mockall::mock! {
    pub Prompt {}

    impl ConfirmationPrompt for Prompt {
        fn confirm(&self, message: &str) -> bool;
    }
}
