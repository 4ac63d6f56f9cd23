//! Terminal prompts.

use std::io;

use clash_runtime::Prompter;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::theme::Theme;

/// Asks on the terminal. Both prompts default to refusal.
pub(crate) struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub(crate) fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(io::Error::other)
    }

    fn read_phrase(&self, prompt: &str, phrase: &str) -> io::Result<String> {
        eprintln!("{}", Theme::warning(prompt));
        Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Type \"{phrase}\" to continue"))
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}
