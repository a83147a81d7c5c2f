//! Yes/no confirmation prompts.
//!
//! Every prompt defaults to "no". Without an interactive terminal the
//! default is taken without asking, so piping input can never confirm a
//! deletion.

use anyhow::{Context, Result};
use console::Term;
use dialoguer::Confirm;
use std::io::IsTerminal;
use tracing::debug;

/// Source of yes/no answers.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term() && std::io::stdin().is_terminal()
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !self.is_interactive() {
            debug!(question, "non-interactive, answering no");
            return Ok(false);
        }

        let answer = Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact_on_opt(&self.term)
            .context("failed to read confirmation")?;
        // Esc / q resolves to the default.
        Ok(answer.unwrap_or(false))
    }
}

/// Answers from a fixed script, recording each question. Runs out as "no".
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<bool>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
