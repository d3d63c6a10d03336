use std::path::Path;

/// Manual section assumed when the directory name carries no hint.
pub const DEFAULT_SECTION: u8 = 3;

/// Manual sections holding command or overview pages, without prototypes.
pub const NON_API_SECTIONS: [u8; 3] = [1, 5, 7];

/// Infers the manual section from the name of the directory holding `path`.
///
/// `doc/man1/openssl.pod` is in section 1; a directory without a `man<N>`
/// hint yields [`DEFAULT_SECTION`].
pub fn manual_section(path: &Path) -> u8 {
    let dirname = path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    dirname
        .match_indices("man")
        .filter_map(|(idx, _)| dirname[idx + 3..].chars().next())
        .find_map(|ch| match ch {
            '1'..='9' => ch.to_digit(10).map(|digit| digit as u8),
            _ => None,
        })
        .unwrap_or(DEFAULT_SECTION)
}

/// Returns whether pages of `section` are exempt from prototype checks.
pub fn is_non_api_section(section: u8) -> bool {
    NON_API_SECTIONS.contains(&section)
}
