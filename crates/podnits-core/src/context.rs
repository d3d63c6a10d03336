//! Per-run mutable state threaded through the checkers.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A symbol claimed by two distinct pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duplicate {
    /// Symbol name found twice.
    pub name: String,
    /// Page seen last, which now owns the symbol.
    pub page: PathBuf,
    /// Page that previously owned the symbol.
    pub previous: PathBuf,
}

impl Duplicate {
    /// Renders the informational note text for this duplicate.
    pub fn note(&self) -> String {
        format!(
            "Duplicate {} in {} and {}",
            self.name,
            self.page.display(),
            self.previous.display()
        )
    }
}

/// Mapping from documented symbol name to the page that documents it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentedSymbolIndex {
    entries: BTreeMap<String, PathBuf>,
    duplicates: Vec<Duplicate>,
}

impl DocumentedSymbolIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `page` documents `name`.
    ///
    /// The last page seen wins the lookup; a name moving between two distinct
    /// pages is remembered and returned as a [`Duplicate`].
    pub fn record(&mut self, name: impl Into<String>, page: &Path) -> Option<Duplicate> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), page.to_path_buf());
        match previous {
            Some(previous) if previous != page => {
                let duplicate = Duplicate {
                    name,
                    page: page.to_path_buf(),
                    previous,
                };
                self.duplicates.push(duplicate.clone());
                Some(duplicate)
            }
            _ => None,
        }
    }

    /// Returns whether some page documents `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the page documenting `name`, if any.
    pub fn page_for(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Number of distinct documented names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Duplicates recorded so far, in discovery order.
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }
}

/// Explicit run context handed to the cross-checker and coverage checker.
///
/// Built fresh for every run and never shared between runs.
#[derive(Debug, Default)]
pub struct CheckContext {
    /// Symbols documented across the scanned manual directory.
    pub documented: DocumentedSymbolIndex,
    siblings: BTreeMap<PathBuf, BTreeSet<String>>,
}

impl CheckContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the page stems living in `dir`, replacing any cached listing.
    pub fn register_siblings<I, S>(&mut self, dir: &Path, stems: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.siblings
            .insert(dir.to_path_buf(), stems.into_iter().map(Into::into).collect());
    }

    /// Returns the cached page stems of `dir`, listing it with `list` on first use.
    pub fn siblings_with<F>(&mut self, dir: &Path, list: F) -> &BTreeSet<String>
    where
        F: FnOnce(&Path) -> BTreeSet<String>,
    {
        self.siblings
            .entry(dir.to_path_buf())
            .or_insert_with(|| list(dir))
    }
}
