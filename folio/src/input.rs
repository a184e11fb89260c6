//! Sources of answers for values the caller did not supply
//!
//! Commands ask an [`InputProvider`] for every missing value. The CLI plugs in
//! a terminal prompt when stdin is interactive; everything else, including
//! piped invocations and tests, uses a provider that answers immediately.

use crate::error::{FolioError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers questions for missing input
pub trait InputProvider {
    /// Whether answers come from a person. Non-interactive providers never
    /// block and never retry.
    fn is_interactive(&self) -> bool;

    /// Ask `question`; a blank answer yields `default`. The result is trimmed.
    fn ask(&self, question: &str, default: &str) -> Result<String>;

    /// Ask until a non-blank answer arrives.
    ///
    /// Non-interactive providers answer once, so the result may still be
    /// empty and the caller decides which error that is.
    fn ask_required(&self, question: &str, default: &str) -> Result<String> {
        loop {
            let answer = self.ask(question, default)?;
            if !answer.is_empty() || !self.is_interactive() {
                return Ok(answer);
            }
        }
    }
}

/// Provider for piped and scripted runs: every question gets its default
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl InputProvider for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(&self, _question: &str, default: &str) -> Result<String> {
        Ok(default.trim().to_string())
    }
}

/// Interactive provider that replays a fixed list of answers.
///
/// Running out of answers is an error, like end of input on a terminal.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedInput {
    /// Provider that answers with `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order
    pub fn questions(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl InputProvider for ScriptedInput {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&self, question: &str, default: &str) -> Result<String> {
        self.asked.borrow_mut().push(question.to_string());
        let answer = self.answers.borrow_mut().pop_front().ok_or_else(|| {
            FolioError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("No answer left for '{question}'"),
            ))
        })?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.trim().to_string()
        } else {
            answer.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_returns_default() {
        let input = NonInteractive;
        assert_eq!(input.ask("Status", " draft ").unwrap(), "draft");
        assert_eq!(input.ask_required("Title", "").unwrap(), "");
    }

    #[test]
    fn test_scripted_blank_answer_uses_default() {
        let input = ScriptedInput::new(["", "custom"]);
        assert_eq!(input.ask("Status", "draft").unwrap(), "draft");
        assert_eq!(input.ask("Status", "draft").unwrap(), "custom");
        assert_eq!(input.questions(), vec!["Status", "Status"]);
    }

    #[test]
    fn test_ask_required_repeats_until_answered() {
        let input = ScriptedInput::new(["", "  ", "Hello"]);
        assert_eq!(input.ask_required("Title", "").unwrap(), "Hello");
        assert_eq!(input.questions().len(), 3);
    }

    #[test]
    fn test_scripted_exhaustion_is_an_error() {
        let input = ScriptedInput::new(Vec::<String>::new());
        assert!(input.ask_required("Title", "").is_err());
    }
}
