use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use podnits_core::errors::NitsError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Markers of manifest lines that do not name a real export.
pub const SKIP_MARKERS: &[&str] = &["NOEXIST", "EXPORT_VAR_AS_FUNC"];

/// Symbols exported by one library, sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    path: PathBuf,
    symbols: Vec<String>,
}

impl ExportManifest {
    /// Parses manifest text read from `path`.
    ///
    /// Each line is `<symbol> <number> <version> <EXIST|NOEXIST>::<kind>:<conditions>`;
    /// only the first column is kept.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let symbols: BTreeSet<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter(|line| !SKIP_MARKERS.iter().any(|marker| line.contains(marker)))
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        Self {
            path: path.into(),
            symbols: symbols.into_iter().map(str::to_string).collect(),
        }
    }

    /// File the manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exported symbols in lexicographic order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of exported symbols.
    pub fn count(&self) -> usize {
        self.symbols.len()
    }

    /// Summary note text: `Found <n> in <file>`.
    pub fn found_note(&self) -> String {
        format!("Found {} in {}", self.count(), self.path.display())
    }
}

/// Reads and parses the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<ExportManifest, NitsError> {
    let text = fs::read_to_string(path).map_err(|err| NitsError::parse("manifest_read", path, err))?;
    let manifest = ExportManifest::parse(path, &text);
    debug!(manifest = %path.display(), count = manifest.count(), "loaded export manifest");
    Ok(manifest)
}
