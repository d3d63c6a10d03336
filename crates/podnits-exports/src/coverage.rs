use podnits_core::{CheckContext, Report};

use crate::manifest::ExportManifest;

/// Returns whether `symbol` needs no page because of its prefix.
pub fn is_exempt(symbol: &str, exempt_prefixes: &[String]) -> bool {
    exempt_prefixes
        .iter()
        .any(|prefix| symbol.starts_with(prefix.as_str()))
}

/// Exported symbols of `manifest` that no page documents, in manifest order.
pub fn undocumented<'a>(
    manifest: &'a ExportManifest,
    context: &CheckContext,
    exempt_prefixes: &[String],
) -> Vec<&'a str> {
    manifest
        .symbols()
        .iter()
        .map(String::as_str)
        .filter(|symbol| !context.documented.contains(symbol))
        .filter(|symbol| !is_exempt(symbol, exempt_prefixes))
        .collect()
}

/// Reports the undocumented exports of `library`, then a summary note.
///
/// Returns how many symbols were reported.
pub fn check_coverage(
    manifest: &ExportManifest,
    library: &str,
    context: &CheckContext,
    exempt_prefixes: &[String],
    report: &mut Report,
) -> usize {
    let missing = undocumented(manifest, context, exempt_prefixes);
    for symbol in &missing {
        report.undocumented(library, *symbol);
    }
    report.note(format!(
        "Found {} missing from {}",
        missing.len(),
        manifest.path().display()
    ));
    missing.len()
}
