//! Structured error types shared across podnits crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`NitsError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, library names, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the offending path under the `path` context key.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for podnits.
///
/// Only conditions that abort a run are errors. Rule violations found in a
/// page are reported as diagnostics and never surface through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum NitsError {
    /// A named input file could not be read.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// An export manifest could not be opened or parsed.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// The configuration file or glob patterns are invalid.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// The external structural checker could not be run.
    #[error("external checker error: {0}")]
    External(ErrorInfo),
    /// Serialization of a report failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl NitsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            NitsError::Io(info)
            | NitsError::Parse(info)
            | NitsError::Config(info)
            | NitsError::External(info)
            | NitsError::Serde(info) => info,
        }
    }

    /// Builds an [`NitsError::Io`] for a file that could not be read.
    pub fn io(code: &str, path: &Path, err: impl ToString) -> Self {
        NitsError::Io(
            ErrorInfo::new(code, format!("couldn't open {}: {}", path.display(), err.to_string()))
                .with_path(path),
        )
    }

    /// Builds an [`NitsError::Parse`] for a manifest that could not be read.
    pub fn parse(code: &str, path: &Path, err: impl ToString) -> Self {
        NitsError::Parse(
            ErrorInfo::new(code, format!("can't open {}: {}", path.display(), err.to_string()))
                .with_path(path),
        )
    }
}
