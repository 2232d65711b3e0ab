//! Terminal rendering for model pulls

use std::io::{self, Write};

use uacheck_ollama::ProgressUpdate;

/// Writes pull progress as carriage-return-updated lines, one line per blob.
pub struct ProgressPrinter<W: Write> {
    out: W,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn start(&mut self, model: &str) -> io::Result<()> {
        write!(self.out, "Pulling the selected model: {}", model)?;
        self.out.flush()
    }

    pub fn update(&mut self, update: &ProgressUpdate) -> io::Result<()> {
        if update.new_line {
            writeln!(self.out)?;
        }
        write!(self.out, "\r{}", update)?;
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        write!(self.out, "\n\n")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// Message shown before exiting when the model could not be pulled.
pub fn report_pull_failure<W: Write>(
    out: &mut W,
    model: &str,
    error: &uacheck_ollama::Error,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Failed to pull the model: {}", model)?;
    writeln!(out, "Error: {}", error)?;
    writeln!(out, "Is the ollama instance running?")?;
    out.flush()
}
