//! Single-line prompt shown in the message line.

use crate::input::{ctrl, Key};

/// What a keypress did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing.
    Pending,
    /// Enter on a non-empty input.
    Accepted(String),
    /// Escape.
    Cancelled,
}

/// An input line with a label before it and a hint after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    label: &'static str,
    hint: &'static str,
    input: String,
}

impl Prompt {
    /// Create an empty prompt.
    pub const fn new(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            input: String::new(),
        }
    }

    /// The text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The message-line text: label, input, hint.
    pub fn message(&self) -> String {
        format!("{}{}{}", self.label, self.input, self.hint)
    }

    /// Feed one key.
    pub fn handle(&mut self, key: Key) -> PromptOutcome {
        match key {
            Key::Escape => PromptOutcome::Cancelled,
            Key::Control(b'\r') if !self.input.is_empty() => {
                PromptOutcome::Accepted(self.input.clone())
            }
            Key::Backspace | Key::Delete => {
                self.input.pop();
                PromptOutcome::Pending
            }
            Key::Control(b) if b == ctrl(b'h') => {
                self.input.pop();
                PromptOutcome::Pending
            }
            Key::Char(b) if b.is_ascii() => {
                self.input.push(char::from(b));
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }
}
