// src/prompt.rs

//! Sources of operator answers.
//!
//! The selector asks its questions through the [`Prompt`] trait, so the same
//! flow runs against a real terminal, piped stdin, or a scripted buffer in tests.

use anyhow::{anyhow, Context};
use std::io::{BufRead, Write};

/// Asks the operator a question and waits for a line of text.
pub trait Prompt {
    /// Shows `question` and blocks until the operator answers.
    ///
    /// The answer is returned without its line terminator but otherwise
    /// untouched; callers decide how to trim and validate it.
    fn ask(&mut self, question: &str) -> anyhow::Result<String>;
}

/// Reads answers line by line from any `BufRead`, echoing questions to a writer.
///
/// Used for piped stdin and for scripted input in tests.
///
/// # Examples
/// ```
/// use repo_slice::prompt::{LinePrompt, Prompt};
/// use std::io::Cursor;
///
/// let mut prompt = LinePrompt::new(Cursor::new("equinox\ndemo\n"), Vec::new());
/// assert_eq!(prompt.ask("Project? ").unwrap(), "equinox");
/// assert_eq!(prompt.ask("Name? ").unwrap(), "demo");
/// assert!(prompt.ask("Branch? ").is_err());
/// ```
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt and returns the writer the questions went to.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        self.output
            .write_all(question.as_bytes())
            .and_then(|_| self.output.flush())
            .context("Failed to write prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read operator input")?;
        if read == 0 {
            return Err(anyhow!("Input ended before '{}' was answered", question.trim()));
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

/// Asks questions on an interactive terminal using `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(question.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read operator input from the terminal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompt_echoes_questions() -> anyhow::Result<()> {
        let mut prompt = LinePrompt::new(Cursor::new("  spaced  \r\n\n"), Vec::new());
        assert_eq!(prompt.ask("First: ")?, "  spaced  ");
        assert_eq!(prompt.ask("Second: ")?, "");
        let echoed = String::from_utf8(prompt.into_output())?;
        assert_eq!(echoed, "First: Second: ");
        Ok(())
    }

    #[test]
    fn test_line_prompt_last_line_without_newline() -> anyhow::Result<()> {
        let mut prompt = LinePrompt::new(Cursor::new("main"), std::io::sink());
        assert_eq!(prompt.ask("Branch: ")?, "main");
        Ok(())
    }

    #[test]
    fn test_line_prompt_eof_is_error() {
        let mut prompt = LinePrompt::new(Cursor::new(""), std::io::sink());
        let err = prompt.ask("Branch: ").unwrap_err();
        assert!(err.to_string().contains("Branch:"));
    }
}
