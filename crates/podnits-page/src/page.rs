use std::fs;
use std::path::{Path, PathBuf};

use podnits_core::errors::NitsError;

/// Title of the section listing the documented names.
pub const NAME: &str = "NAME";
/// Title of the section holding the prototypes.
pub const SYNOPSIS: &str = "SYNOPSIS";
/// Title of the section following the synopsis.
pub const DESCRIPTION: &str = "DESCRIPTION";
/// Title of the section holding the copyright notice.
pub const COPYRIGHT: &str = "COPYRIGHT";

const HEAD1: &str = "=head1";

/// A `=head1` heading located inside a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head1 {
    /// Heading text with surrounding whitespace removed.
    pub title: String,
    /// Byte offset of the `=head1` marker.
    pub start: usize,
    /// Byte offset just past the heading line.
    pub body_start: usize,
}

/// One manual page: its path and raw text.
///
/// Sections are derived on demand from the text, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    path: PathBuf,
    text: String,
}

impl Page {
    /// Reads the page at `path`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected; only
    /// a failure to read the file is an error.
    pub fn load(path: &Path) -> Result<Self, NitsError> {
        let bytes = fs::read(path).map_err(|err| NitsError::io("page_read", path, err))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::from_text(path, text))
    }

    /// Builds a page from text already in memory.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Path the page was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw page text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Base filename without its extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    /// Directory containing the page; empty for a bare filename.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Top-level headings in document order.
    pub fn headings(&self) -> Vec<Head1> {
        let mut headings = Vec::new();
        let mut offset = 0;
        for line in self.text.split_inclusive('\n') {
            let start = offset;
            offset += line.len();
            let Some(rest) = line.strip_prefix(HEAD1) else {
                continue;
            };
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            headings.push(Head1 {
                title: rest.trim().to_string(),
                start,
                body_start: offset,
            });
        }
        headings
    }

    /// Body of the first section titled `name`, up to the next `=head1`.
    pub fn section(&self, name: &str) -> Option<&str> {
        let headings = self.headings();
        let idx = headings.iter().position(|head| head.title == name)?;
        let end = headings
            .get(idx + 1)
            .map_or(self.text.len(), |next| next.start);
        Some(&self.text[headings[idx].body_start..end])
    }

    /// Text after the first `from` heading up to the next `to` heading.
    ///
    /// Returns `None` unless both headings exist in that order.
    pub fn span(&self, from: &str, to: &str) -> Option<&str> {
        let headings = self.headings();
        let idx = headings.iter().position(|head| head.title == from)?;
        let end = headings[idx + 1..].iter().find(|head| head.title == to)?;
        Some(&self.text[headings[idx].body_start..end.start])
    }

    /// Returns whether the page carries a `=for comment <marker>` line.
    pub fn has_marker(&self, marker: &str) -> bool {
        self.text.lines().any(|line| {
            line.strip_prefix("=for comment")
                .is_some_and(|rest| rest.trim_start().starts_with(marker))
        })
    }
}
