//! Interactive prompts for values not given on the command line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::adapters::ProviderKind;

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a question and read one trimmed line
    ///
    /// End of input is an error, so re-asking loops always terminate.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            anyhow::bail!("Input closed while waiting for: {}", question.trim());
        }

        Ok(line.trim().to_string())
    }

    /// Ask until a non-empty answer is given
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "A value is required.").context("Failed to write prompt")?;
        }
    }

    /// Ask for an optional value; empty means `None`
    pub fn ask_optional(&mut self, question: &str) -> Result<Option<String>> {
        let answer = self.ask(question)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Provider menu; empty selects Anthropic
    pub fn ask_provider(&mut self) -> Result<ProviderKind> {
        loop {
            let answer = self.ask("Select API provider (1: Anthropic, 2: OpenAI-compatible) [1]: ")?;
            if answer.is_empty() {
                return Ok(ProviderKind::Anthropic);
            }
            match answer.parse() {
                Ok(kind) => return Ok(kind),
                Err(_) => writeln!(self.output, "Please enter 1 or 2.")
                    .context("Failed to write prompt")?,
            }
        }
    }

    /// Positive document count; empty selects `default`
    pub fn ask_count(&mut self, default: usize) -> Result<usize> {
        let question = format!("Number of documents to generate [{}]: ", default);
        loop {
            let answer = self.ask(&question)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<usize>() {
                Ok(count) if count > 0 => return Ok(count),
                _ => writeln!(self.output, "Please enter a positive whole number.")
                    .context("Failed to write prompt")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
