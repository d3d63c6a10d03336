//! Strict-mode delegation to an external structural checker.
//!
//! The checker writes its findings to a scratch file owned by a
//! [`NamedTempFile`]; the file is removed when the guard drops, on success
//! and on every error path alike.

use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use podnits_core::errors::{ErrorInfo, NitsError};
use regex::Regex;
use tempfile::NamedTempFile;
use tracing::debug;

/// A program that validates one page and reports to a file.
pub trait ExternalChecker {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Checks `page`, writing its report to the file at `output`.
    fn run(&self, page: &Path, output: &Path) -> Result<(), NitsError>;
}

fn external_error(code: &str, program: &str, err: impl ToString) -> NitsError {
    NitsError::External(ErrorInfo::new(code, err.to_string()).with_context("program", program))
}

/// Runs a command with the page path as its final argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandChecker {
    program: String,
    args: Vec<String>,
}

impl CommandChecker {
    /// Creates a checker invoking `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl ExternalChecker for CommandChecker {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, page: &Path, output: &Path) -> Result<(), NitsError> {
        let open = || {
            OpenOptions::new()
                .append(true)
                .open(output)
                .map_err(|err| NitsError::io("external_output", output, err))
        };
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(page)
            .stdin(Stdio::null())
            .stdout(open()?)
            .stderr(open()?)
            .status()
            .map_err(|err| external_error("external_spawn", &self.program, err))?;
        // A non-zero status only means findings were written.
        debug!(program = %self.program, page = %page.display(), %status, "external checker finished");
        Ok(())
    }
}

/// Drops checker output lines known to be acceptable.
#[derive(Debug, Clone)]
pub struct OutputFilter {
    ignore: Vec<Regex>,
}

impl OutputFilter {
    /// Compiles the ignore patterns.
    pub fn new(patterns: &[String]) -> Result<Self, NitsError> {
        let ignore = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| {
                    NitsError::Config(
                        ErrorInfo::new("external_ignore", err.to_string())
                            .with_context("pattern", pattern.as_str()),
                    )
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { ignore })
    }

    /// Returns whether `line` should be reported.
    pub fn keeps(&self, line: &str) -> bool {
        !line.trim().is_empty() && !self.ignore.iter().any(|re| re.is_match(line))
    }
}

/// Runs `checker` over `page` and returns the output lines worth reporting.
pub fn run_checker(
    checker: &dyn ExternalChecker,
    page: &Path,
    filter: &OutputFilter,
) -> Result<Vec<String>, NitsError> {
    let scratch = NamedTempFile::new()
        .map_err(|err| external_error("external_scratch", checker.name(), err))?;
    checker.run(page, scratch.path())?;
    let mut output = String::new();
    scratch
        .reopen()
        .and_then(|mut file| file.read_to_string(&mut output))
        .map_err(|err| NitsError::io("external_output", scratch.path(), err))?;
    Ok(output
        .lines()
        .filter(|line| filter.keeps(line))
        .map(str::to_string)
        .collect())
}
