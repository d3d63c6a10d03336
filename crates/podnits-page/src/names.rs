use crate::page::{Page, NAME, SYNOPSIS};

/// Text of a NAME body before the first `-`, on one line.
fn symbol_list(body: &str) -> String {
    let flat = body.replace('\n', " ");
    match flat.find('-') {
        Some(idx) => flat[..idx].to_string(),
        None => flat,
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !name.is_empty() && !names.iter().any(|known| known == name) {
        names.push(name.to_string());
    }
}

/// Words of a NAME span, in order of first appearance.
///
/// Everything from the first `-` on is dropped, commas are removed and the
/// rest is split on whitespace.
pub fn name_tokens(body: &str) -> Vec<String> {
    let list = symbol_list(body).replace(',', "");
    let mut names = Vec::new();
    for word in list.split_whitespace() {
        push_unique(&mut names, word);
    }
    names
}

/// NAME tokens of a page, taken from the NAME to SYNOPSIS span.
///
/// Returns `None` when the page has no such span.
pub fn page_name_tokens(page: &Page) -> Option<Vec<String>> {
    page.span(NAME, SYNOPSIS).map(name_tokens)
}

/// Comma separated names a page documents, for the documented-symbol index.
///
/// Reads the NAME section up to the next heading, whatever it is.
pub fn documented_names(page: &Page) -> Vec<String> {
    let Some(body) = page.section(NAME) else {
        return Vec::new();
    };
    let mut names = Vec::new();
    for name in symbol_list(body).split(',') {
        push_unique(&mut names, name.trim());
    }
    names
}
