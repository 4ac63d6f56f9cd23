//! Operator interaction.

use std::io;

/// Asks the operator questions.
pub trait Prompter {
    /// Ask a yes/no question. `Ok(true)` only on an explicit yes.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read; callers treat that as no.
    fn confirm(&self, prompt: &str) -> io::Result<bool>;

    /// Ask the operator to type `phrase` and return what they typed.
    ///
    /// The caller does the comparison.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read; callers treat that as a
    /// mismatch.
    fn read_phrase(&self, prompt: &str, phrase: &str) -> io::Result<String>;
}

/// Prompter for non-interactive use: refuses everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyPrompter;

impl Prompter for DenyPrompter {
    fn confirm(&self, _prompt: &str) -> io::Result<bool> {
        Ok(false)
    }

    fn read_phrase(&self, _prompt: &str, _phrase: &str) -> io::Result<String> {
        Ok(String::new())
    }
}
