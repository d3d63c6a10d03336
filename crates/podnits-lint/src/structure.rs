//! Structural rules applied to every page regardless of section.
//!
//! Each rule is a small function returning the message it would report, so
//! rules can be tested one at a time; [`StructureRules::check`] runs them all
//! in a fixed order.

use podnits_core::Diagnostic;
use podnits_page::{Page, COPYRIGHT, DESCRIPTION, NAME, SYNOPSIS};

/// Marker (`=for comment multiple includes`) allowing consecutive includes.
pub const MULTIPLE_INCLUDES_MARKER: &str = "multiple includes";

/// Page must open with `=pod`.
pub fn starts_with_pod(text: &str) -> Option<&'static str> {
    (!text.starts_with("=pod")).then_some("doesn't start with =pod")
}

/// Page must close with `=cut`; one trailing blank line is tolerated.
pub fn ends_with_cut(text: &str) -> Option<&'static str> {
    let ok = text.ends_with("=cut\n") || text.ends_with("=cut\n\n");
    (!ok).then_some("doesn't end with =cut")
}

/// At most one line may start with `=cut`.
pub fn single_cut(text: &str) -> Option<&'static str> {
    let cuts = text.lines().filter(|line| line.starts_with("=cut")).count();
    (cuts > 1).then_some("more than one cut line.")
}

/// Some line must read `Copyright <years> <holder>`.
pub fn has_copyright(text: &str, holder: &str) -> Option<&'static str> {
    let needle = format!(" {holder}");
    let found = text.lines().any(|line| {
        line.split_once("Copyright ")
            .is_some_and(|(_, rest)| rest.contains(&needle))
    });
    (!found).then_some("missing copyright")
}

/// When present, COPYRIGHT must be the final top-level section.
pub fn copyright_is_last(page: &Page) -> Option<&'static str> {
    let headings = page.headings();
    let idx = headings.iter().position(|head| head.title == COPYRIGHT)?;
    (idx + 1 < headings.len()).then_some("copyright not last")
}

/// Flags `=head2` headings written entirely in capitals.
pub fn head2_not_uppercase(text: &str) -> Option<&'static str> {
    let shouting = text.lines().any(|line| {
        let Some(rest) = line.strip_prefix("=head2") else {
            return false;
        };
        let title = rest.trim_start();
        title.len() < rest.len()
            && !title.is_empty()
            && title.chars().all(|ch| ch.is_ascii_uppercase() || ch == ' ')
    });
    shouting.then_some("head2 in All uppercase")
}

/// Flags `=headN` followed by more than one whitespace character.
pub fn head_spacing(text: &str) -> Option<&'static str> {
    let spaced = text.lines().any(|line| {
        let Some(rest) = line.strip_prefix("=head") else {
            return false;
        };
        let mut chars = rest.chars();
        if !chars.next().is_some_and(|ch| ch.is_ascii_digit()) {
            return false;
        }
        chars.take_while(|ch| *ch == ' ' || *ch == '\t').count() >= 2
    });
    spaced.then_some("extra space after head")
}

/// NAME lines must not end with a period.
pub fn name_without_period(page: &Page) -> Option<&'static str> {
    let span = page.span(NAME, SYNOPSIS)?;
    span.lines()
        .any(|line| line.ends_with('.'))
        .then_some("period in NAME section")
}

/// NAME must be plain text.
pub fn name_without_markup(page: &Page) -> Option<&'static str> {
    let span = page.span(NAME, SYNOPSIS)?;
    span.contains(['<', '>']).then_some("POD markup in NAME section")
}

/// Counts runs of two or more consecutive `#include <NS/...>` synopsis lines.
///
/// Each run is one finding. Blank lines neither count nor break a run.
pub fn include_runs(page: &Page, namespace: &str) -> usize {
    if page.has_marker(MULTIPLE_INCLUDES_MARKER) {
        return 0;
    }
    let Some(span) = page.span(SYNOPSIS, DESCRIPTION) else {
        return 0;
    };
    let needle = format!("include <{namespace}/");
    let mut runs = 0;
    let mut run = 0;
    for line in span.lines().filter(|line| !line.trim().is_empty()) {
        if line.contains(&needle) {
            run += 1;
            if run == 2 {
                runs += 1;
            }
        } else {
            run = 0;
        }
    }
    runs
}

/// Project parameters for the structural rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRules {
    /// Holder the copyright line must credit.
    pub copyright_holder: String,
    /// Header directory of the library's own includes.
    pub include_namespace: String,
}

impl StructureRules {
    /// Creates a rule set.
    pub fn new(copyright_holder: impl Into<String>, include_namespace: impl Into<String>) -> Self {
        Self {
            copyright_holder: copyright_holder.into(),
            include_namespace: include_namespace.into(),
        }
    }

    /// Runs every structural rule over `page`.
    pub fn check(&self, page: &Page) -> Vec<Diagnostic> {
        let text = page.text();
        let includes = include_runs(page, &self.include_namespace);
        [
            starts_with_pod(text),
            ends_with_cut(text),
            single_cut(text),
            has_copyright(text, &self.copyright_holder),
            copyright_is_last(page),
            head2_not_uppercase(text),
            head_spacing(text),
            name_without_period(page),
            name_without_markup(page),
        ]
        .into_iter()
        .flatten()
        .chain(std::iter::repeat("has multiple includes").take(includes))
        .map(|message| Diagnostic::at(page.path(), message))
        .collect()
    }
}
