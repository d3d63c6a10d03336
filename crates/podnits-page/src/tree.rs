use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use podnits_core::errors::{ErrorInfo, NitsError};
use tracing::debug;
use walkdir::WalkDir;

fn glob_error(pattern: &str, err: impl ToString) -> NitsError {
    NitsError::Config(ErrorInfo::new("page_glob", err.to_string()).with_context("pattern", pattern))
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher, NitsError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| glob_error(pattern, err))
}

fn normalise(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(extension)
}

/// Lists the pages under `root` whose relative path matches `pattern`, sorted.
///
/// With `root` equal to `.` the returned paths are relative, as a shell glob
/// would print them.
pub fn enumerate_pages(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, NitsError> {
    let matcher = build_matcher(pattern)?;
    let bare = root == Path::new(".");
    let mut pages = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !matcher.is_match(normalise(rel)) {
            continue;
        }
        pages.push(if bare {
            rel.to_path_buf()
        } else {
            entry.path().to_path_buf()
        });
    }
    pages.sort();
    debug!(root = %root.display(), pattern, count = pages.len(), "enumerated manual pages");
    Ok(pages)
}

/// Pages sitting directly inside `dir`, sorted; empty if `dir` is missing.
pub fn pages_in(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extension))
        .map(|entry| entry.into_path())
        .collect();
    pages.sort();
    pages
}

/// Base names of the pages sitting directly inside `dir`.
pub fn page_stems(dir: &Path, extension: &str) -> BTreeSet<String> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    pages_in(dir, extension)
        .iter()
        .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()))
        .map(str::to_string)
        .collect()
}
