//! Interactive terminal prompts.
//!
//! The selection workflow only ever talks to the `Prompter` trait, so tests
//! can script the interaction; the terminal implementation below is built on
//! dialoguer.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Password};
use thiserror::Error;

/// Errors that can occur while prompting for input.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading from the terminal failed
    #[error("Failed to read input: {0}")]
    Input(#[from] dialoguer::Error),
}

/// Trait for the interactive parts of the workflow.
///
/// Every method blocks until the user answered. Implementors decide how the
/// question is rendered; callers own validation of the answer.
pub trait Prompter {
    /// Asks for one line of input, echoed back to the user. Empty input is
    /// allowed; validation is the caller's concern.
    fn input(&self, prompt: &str) -> Result<String, PromptError>;

    /// Asks for one line of input without echoing it (passwords).
    fn secret(&self, prompt: &str) -> Result<String, PromptError>;

    /// Shows a heading and a 1-based enumerated list of options, then reads
    /// one raw line. The caller parses and validates the selection.
    fn choose_one(&self, heading: &str, options: &[String]) -> Result<String, PromptError>;

    /// Shows a multi-selection over the given options and returns the chosen
    /// indices in ascending order. Choosing nothing is allowed.
    fn choose_many(&self, heading: &str, options: &[String]) -> Result<Vec<usize>, PromptError>;
}

/// Prompter implementation for an interactive terminal session.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String, PromptError> {
        let line: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn secret(&self, prompt: &str) -> Result<String, PromptError> {
        let line = Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(line)
    }

    fn choose_one(&self, heading: &str, options: &[String]) -> Result<String, PromptError> {
        println!("{heading}");
        for (index, option) in options.iter().enumerate() {
            println!("{}", format!("  {}. {}", index + 1, option).cyan());
        }

        let line: String = Input::with_theme(&self.theme)
            .with_prompt("==>")
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn choose_many(&self, heading: &str, options: &[String]) -> Result<Vec<usize>, PromptError> {
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt(heading)
            .items(options)
            .interact()?;
        Ok(chosen)
    }
}
