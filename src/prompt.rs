//! Interactive question loops.
//!
//! A [`Prompter`] reads answers from any [`BufRead`] and writes questions
//! to any [`Write`], so the whole conversation can be driven from tests.
//! Every question repeats until it gets a valid answer; running out of
//! input is an error.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::duplicates::SortOrder;
use crate::scanner::ExtensionFilter;

/// Errors while prompting.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing a question failed.
    #[error("prompt I/O failed")]
    Io(#[from] io::Error),

    /// Input ended before a valid answer was given.
    #[error("input ended while waiting for an answer")]
    Eof,
}

/// Question-and-answer driver over a reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for questions (and, by the app, for listings).
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter and return its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for the file extension to filter on. Any answer is valid.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] on I/O failure or end of input.
    pub fn ask_extension(&mut self) -> Result<ExtensionFilter, PromptError> {
        write!(self.output, "Enter file format: ")?;
        let answer = self.read_answer()?;
        Ok(ExtensionFilter::new(&answer))
    }

    /// Ask for the size ordering until `1` or `2` is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] on I/O failure or end of input.
    pub fn ask_sort_order(&mut self) -> Result<SortOrder, PromptError> {
        loop {
            writeln!(self.output, "Size sorting options:")?;
            writeln!(self.output, "1. Descending")?;
            writeln!(self.output, "2. Ascending")?;
            write!(self.output, "Enter a sorting option: ")?;
            match self.read_answer()?.trim() {
                "1" => return Ok(SortOrder::Descending),
                "2" => return Ok(SortOrder::Ascending),
                _ => writeln!(self.output, "Wrong option")?,
            }
        }
    }

    /// Ask a yes/no question until `yes` or `no` is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] on I/O failure or end of input.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, PromptError> {
        loop {
            write!(self.output, "{question} ")?;
            match parse_yes_no(&self.read_answer()?) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Wrong option")?,
            }
        }
    }

    /// Ask for file numbers until a non-empty list of integers is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] on I/O failure or end of input.
    pub fn ask_numbers(&mut self) -> Result<Vec<i64>, PromptError> {
        loop {
            write!(self.output, "Enter file numbers to delete: ")?;
            match parse_numbers(&self.read_answer()?) {
                Some(numbers) => return Ok(numbers),
                None => writeln!(self.output, "Wrong format")?,
            }
        }
    }

    /// Read one line, without its line ending.
    fn read_answer(&mut self) -> Result<String, PromptError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Eof);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Parse a yes/no answer. Only `yes` and `no` (any case) are accepted.
#[must_use]
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if answer.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Parse whitespace-separated integers.
///
/// Returns `None` for empty input or if any token isn't an integer.
/// Range checking is left to the deleter.
#[must_use]
pub fn parse_numbers(answer: &str) -> Option<Vec<i64>> {
    let numbers = answer
        .split_whitespace()
        .map(str::parse::<i64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if numbers.is_empty() {
        None
    } else {
        Some(numbers)
    }
}
