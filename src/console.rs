//! Line-oriented terminal I/O.
//!
//! Everything the user sees goes through [`Console`], which wraps any
//! `BufRead`/`Write` pair. The binary hands it stdin/stdout; tests hand it an
//! in-memory script and a byte buffer.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Width of the dash rule separating output blocks.
pub const RULE_WIDTH: usize = 40;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` without a newline and reads one line.
    ///
    /// Returns `None` once the input is exhausted. The returned line has its
    /// trailing newline removed but is otherwise untouched.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if bytes == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write output")?;
        Ok(())
    }

    /// Prints the 40-character separator line.
    pub fn rule(&mut self) -> Result<()> {
        self.say(&"-".repeat(RULE_WIDTH))
    }

    /// Direct access to the output sink for multi-line reports.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
