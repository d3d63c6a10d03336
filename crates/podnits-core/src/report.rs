//! Diagnostic records and the ordered report that collects them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::NitsError;
use crate::serde::to_canonical_json_bytes;

/// Line every per-page diagnostic is anchored to.
///
/// Downstream tooling parses `<path>:1:` so the anchor stays fixed even though
/// most rules know which line offended.
pub const ANCHOR_LINE: u32 = 1;

/// Location identifier attached to a page diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Page path as given on the command line or found by enumeration.
    pub path: String,
    /// Line anchor inside the page.
    pub line: u32,
}

impl Location {
    /// Creates a location anchored to [`ANCHOR_LINE`].
    pub fn page(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            line: ANCHOR_LINE,
        }
    }
}

/// One finding about one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Where the finding was made.
    pub location: Location,
    /// Human readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic for the page at `path`.
    pub fn at(path: &Path, message: impl Into<String>) -> Self {
        Self {
            location: Location::page(path),
            message: message.into(),
        }
    }

    /// Renders the diagnostic as `<path>:<line>: <message>`.
    pub fn render(&self) -> String {
        format!(
            "{}:{}: {}",
            self.location.path, self.location.line, self.message
        )
    }
}

/// Entry of a [`Report`] in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// Per-page structural or consistency finding.
    Page(Diagnostic),
    /// Exported symbol without a documenting page.
    Undocumented {
        /// Logical library name of the manifest.
        library: String,
        /// Exported symbol name.
        symbol: String,
    },
    /// Informational or summary line.
    Note {
        /// Text rendered after the `# ` prefix.
        text: String,
    },
}

impl Entry {
    /// Renders the entry as a single output line.
    pub fn render(&self) -> String {
        match self {
            Entry::Page(diagnostic) => diagnostic.render(),
            Entry::Undocumented { library, symbol } => format!("{library}:{symbol}"),
            Entry::Note { text } => format!("# {text}"),
        }
    }
}

/// Write-once, ordered collection of everything a run found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(Entry::Page(diagnostic));
    }

    /// Appends every diagnostic in order.
    pub fn extend<I>(&mut self, diagnostics: I)
    where
        I: IntoIterator<Item = Diagnostic>,
    {
        self.entries
            .extend(diagnostics.into_iter().map(Entry::Page));
    }

    /// Appends an undocumented-symbol record.
    pub fn undocumented(&mut self, library: impl Into<String>, symbol: impl Into<String>) {
        self.entries.push(Entry::Undocumented {
            library: library.into(),
            symbol: symbol.into(),
        });
    }

    /// Appends an informational note.
    pub fn note(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Note { text: text.into() });
    }

    /// Returns the entries in emission order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over page diagnostics only.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Page(diagnostic) => Some(diagnostic),
            _ => None,
        })
    }

    /// Iterates over undocumented `(library, symbol)` records.
    pub fn undocumented_symbols(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Undocumented { library, symbol } => Some((library.as_str(), symbol.as_str())),
            _ => None,
        })
    }

    /// Renders every entry as one output line.
    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(Entry::render).collect()
    }

    /// Serializes the report as canonical JSON.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, NitsError> {
        to_canonical_json_bytes(self)
    }
}
