use std::path::{Path, PathBuf};

use podnits_core::errors::NitsError;
use podnits_core::{DocumentedSymbolIndex, Report};
use podnits_page::{documented_names, pages_in, Page};
use tracing::debug;

/// Adds the names documented by each of `pages` to `index`.
///
/// A name moving between pages is noted in `report` as a duplicate.
pub fn index_pages(
    index: &mut DocumentedSymbolIndex,
    pages: &[PathBuf],
    report: &mut Report,
) -> Result<(), NitsError> {
    for path in pages {
        let page = Page::load(path)?;
        for name in documented_names(&page) {
            if let Some(duplicate) = index.record(name, path) {
                report.note(duplicate.note());
            }
        }
    }
    Ok(())
}

/// Indexes every page sitting directly inside `manual_dir`.
///
/// Returns the number of pages read.
pub fn index_manual_dir(
    index: &mut DocumentedSymbolIndex,
    manual_dir: &Path,
    extension: &str,
    report: &mut Report,
) -> Result<usize, NitsError> {
    let pages = pages_in(manual_dir, extension);
    index_pages(index, &pages, report)?;
    debug!(
        dir = %manual_dir.display(),
        pages = pages.len(),
        names = index.len(),
        "built documented-symbol index"
    );
    Ok(pages.len())
}
