//! Terminal prompting for values not given as flags

use dialoguer::{theme::ColorfulTheme, Input};
use folio::{FolioError, InputProvider, NonInteractive};
use is_terminal::IsTerminal;
use std::io;

/// Prompts on the terminal with dialoguer
#[derive(Default)]
pub struct TerminalInput {
    theme: ColorfulTheme,
}

impl InputProvider for TerminalInput {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&self, question: &str, default: &str) -> folio::Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string()).show_default(true);
        }

        let answer = input
            .interact_text()
            .map_err(|e| FolioError::Io(io::Error::other(e.to_string())))?;
        Ok(answer.trim().to_string())
    }
}

/// Whether stdin is attached to a terminal
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Prompt on the terminal when stdin is one, answer with defaults otherwise
pub fn input_provider() -> Box<dyn InputProvider> {
    if stdin_is_terminal() {
        Box::new(TerminalInput::default())
    } else {
        Box::new(NonInteractive)
    }
}
