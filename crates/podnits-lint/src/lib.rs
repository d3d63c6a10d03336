#![deny(missing_docs)]
#![doc = "Per-page nit rules: structure, mandatory sections, NAME/SYNOPSIS agreement."]

/// NAME versus SYNOPSIS cross-checking.
pub mod crosscheck;
pub mod external;
/// Mandatory top-level sections per manual section.
pub mod mandatory;
pub mod structure;

use podnits_core::{CheckContext, CheckOptions, Config, Diagnostic, NitsError};
use podnits_page::Page;
use tracing::{debug, warn};

pub use crosscheck::{applies_to, cross_check, GENERIC_MARKER};
pub use external::{run_checker, CommandChecker, ExternalChecker, OutputFilter};
pub use mandatory::{mandatory_sections, missing_sections};
pub use structure::{StructureRules, MULTIPLE_INCLUDES_MARKER};

/// Runs every enabled per-page rule.
pub struct Linter {
    rules: StructureRules,
    extension: String,
    strict: Option<Strict>,
}

struct Strict {
    checker: Box<dyn ExternalChecker>,
    filter: OutputFilter,
}

impl Linter {
    /// Builds a linter from the project configuration.
    ///
    /// The configured external checker is only prepared when `options`
    /// request missing-section reporting.
    pub fn from_config(config: &Config, options: &CheckOptions) -> Result<Self, NitsError> {
        let strict = if options.report_missing_sections {
            let external = &config.external_checker;
            Some(Strict {
                checker: Box::new(CommandChecker::new(
                    external.program.clone(),
                    external.args.clone(),
                )),
                filter: OutputFilter::new(&external.ignore)?,
            })
        } else {
            None
        };
        Ok(Self {
            rules: StructureRules::new(
                config.copyright_holder.clone(),
                config.include_namespace.clone(),
            ),
            extension: config.page_extension.clone(),
            strict,
        })
    }

    /// Replaces the external checker used in strict mode.
    ///
    /// Has no effect unless the linter was built with strict mode enabled.
    pub fn with_checker(mut self, checker: Box<dyn ExternalChecker>) -> Self {
        if let Some(strict) = self.strict.as_mut() {
            strict.checker = checker;
        }
        self
    }

    /// Returns whether mandatory sections and the external checker run.
    pub fn is_strict(&self) -> bool {
        self.strict.is_some()
    }

    /// Checks one page, in report order: cross-check, structure, then the
    /// strict-mode rules.
    pub fn lint(&self, page: &Page, context: &mut CheckContext) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        if applies_to(page) {
            found.extend(cross_check(page, context, &self.extension));
        }
        found.extend(self.rules.check(page));
        if let Some(strict) = &self.strict {
            found.extend(missing_sections(page));
            match run_checker(strict.checker.as_ref(), page.path(), &strict.filter) {
                Ok(lines) => found.extend(
                    lines
                        .into_iter()
                        .map(|line| Diagnostic::at(page.path(), line)),
                ),
                Err(err) => warn!(
                    checker = strict.checker.name(),
                    page = %page.path().display(),
                    error = %err,
                    "external checker failed; continuing without it"
                ),
            }
        }
        debug!(page = %page.path().display(), count = found.len(), "linted page");
        found
    }
}
