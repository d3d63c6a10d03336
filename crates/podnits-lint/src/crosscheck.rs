use std::collections::BTreeSet;

use podnits_core::{CheckContext, Diagnostic};
use podnits_page::{
    is_non_api_section, manual_section, page_name_tokens, page_stems, scan_synopsis, Page,
    DESCRIPTION, SYNOPSIS,
};

/// Marker (`=for comment generic`) exempting a page from the cross-check.
pub const GENERIC_MARKER: &str = "generic";

/// Returns whether NAME and SYNOPSIS of `page` should be compared at all.
pub fn applies_to(page: &Page) -> bool {
    !page.has_marker(GENERIC_MARKER) && !is_non_api_section(manual_section(page.path()))
}

/// Compares the NAME tokens of a page with the symbols its SYNOPSIS declares.
///
/// Sibling pages are looked up through `context`, listing each directory once.
pub fn cross_check(page: &Page, context: &mut CheckContext, extension: &str) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let Some(tokens) = page_name_tokens(page) else {
        return found;
    };
    let path = page.path();
    let stem = page.stem();

    let siblings = context.siblings_with(page.directory(), |dir| page_stems(dir, extension));
    let other_pages: BTreeSet<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|token| *token != stem && siblings.contains(*token))
        .collect();
    if !other_pages.is_empty() {
        found.push(Diagnostic::at(
            path,
            format!(
                "the following exist as other .{extension} files: {}",
                other_pages.iter().copied().collect::<Vec<_>>().join(" ")
            ),
        ));
    }
    if !tokens.iter().any(|token| token == stem) {
        found.push(Diagnostic::at(
            path,
            format!("{stem} (filename) missing from NAME section"),
        ));
    }

    let Some(span) = page.span(SYNOPSIS, DESCRIPTION) else {
        return found;
    };
    let synopsis = scan_synopsis(span);
    for decl in &synopsis.declarations {
        if !tokens.contains(&decl.name) {
            found.push(Diagnostic::at(
                path,
                format!("{} missing from NAME section", decl.name),
            ));
        }
    }
    for line in &synopsis.comma_spacing {
        found.push(Diagnostic::at(
            path,
            format!("prototype missing spaces around commas: {line}"),
        ));
    }
    for token in &tokens {
        if other_pages.contains(token.as_str()) || synopsis.declares(token) {
            continue;
        }
        found.push(Diagnostic::at(
            path,
            format!("{token} missing from SYNOPSIS"),
        ));
    }
    found
}
