use podnits_core::Diagnostic;
use podnits_page::{manual_section, Page, COPYRIGHT, DESCRIPTION, NAME, SYNOPSIS};

/// Sections every page must carry.
pub const UNIVERSAL_SECTIONS: &[&str] = &[NAME, DESCRIPTION, COPYRIGHT];

/// Additional sections required by command pages.
pub const COMMAND_SECTIONS: &[&str] = &[SYNOPSIS, "OPTIONS"];

/// Additional sections required by library API pages.
pub const API_SECTIONS: &[&str] = &[SYNOPSIS, "RETURN VALUES"];

/// Top-level sections a page in manual `section` must contain, in report order.
pub fn mandatory_sections(section: u8) -> Vec<&'static str> {
    let extra: &[&str] = match section {
        1 => COMMAND_SECTIONS,
        3 => API_SECTIONS,
        _ => &[],
    };
    UNIVERSAL_SECTIONS.iter().chain(extra).copied().collect()
}

/// Reports each mandatory section missing from `page`.
pub fn missing_sections(page: &Page) -> Vec<Diagnostic> {
    let headings = page.headings();
    mandatory_sections(manual_section(page.path()))
        .into_iter()
        .filter(|name| !headings.iter().any(|head| head.title == *name))
        .map(|name| Diagnostic::at(page.path(), format!("missing {name} head1 section")))
        .collect()
}
