#![deny(missing_docs)]
#![doc = "Export manifests, the documented-symbol index and coverage reporting."]

/// Undocumented-export detection.
pub mod coverage;
/// Documented-symbol index built from the manual directory.
pub mod docindex;
/// Export manifest parsing.
pub mod manifest;

use podnits_core::{CheckContext, Config, NitsError, Report};

pub use coverage::{check_coverage, is_exempt, undocumented};
pub use docindex::{index_manual_dir, index_pages};
pub use manifest::{load_manifest, ExportManifest, SKIP_MARKERS};

/// Runs the whole coverage pass described by `config`.
///
/// The manual directory is indexed into `context` first; each configured
/// manifest is then loaded and checked in order. An unreadable manifest
/// aborts the pass.
pub fn report_undocumented(
    config: &Config,
    context: &mut CheckContext,
    report: &mut Report,
) -> Result<(), NitsError> {
    index_manual_dir(
        &mut context.documented,
        &config.resolve(&config.manual_dir),
        &config.page_extension,
        report,
    )?;
    for spec in &config.manifests {
        let manifest = load_manifest(&config.resolve(&spec.path))?;
        report.note(manifest.found_note());
        check_coverage(
            &manifest,
            &spec.library,
            context,
            &config.exempt_prefixes,
            report,
        );
    }
    Ok(())
}
