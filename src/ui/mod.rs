//! Operator interaction - confirmation prompts and step reporting.
//!
//! Both concerns are capability traits injected into the runner so the
//! release sequence can run headlessly in tests (or with `--yes`) and so step
//! outcomes stay observable independent of terminal rendering.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};

use crate::error::Result;

pub mod formatter;

/// Asks the operator yes/no questions.
pub trait Prompt {
    /// Returns true only for an explicit affirmative answer.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        (**self).confirm(prompt)
    }
}

/// Reads confirmations from the terminal.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation; anything else,
/// including a bare Enter, declines.
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("\n{} (y/N): ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let response = input.trim().to_lowercase();
        Ok(response == "y" || response == "yes")
    }
}

/// Answers every confirmation affirmatively. Backs the `--yes` flag.
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Replays a fixed sequence of answers; declines once the sequence runs out.
/// For headless tests of the confirmation flow.
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        ScriptedPrompt {
            answers: RefCell::new(answers.iter().copied().collect()),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
    }
}

/// Step outcome reporting, separated from the orchestration logic.
pub trait Reporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Reports through the colored console formatter.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        formatter::display_status(message);
    }

    fn success(&self, message: &str) {
        formatter::display_success(message);
    }

    fn warning(&self, message: &str) {
        formatter::display_warning(message);
    }

    fn error(&self, message: &str) {
        formatter::display_error(message);
    }
}
