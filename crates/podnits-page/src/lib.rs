#![deny(missing_docs)]
#![doc = "Manual page model, NAME and SYNOPSIS extraction, and page tree enumeration."]

/// NAME section tokenization.
pub mod names;
/// Raw page text and its `=head1` sections.
pub mod page;
/// Manual section inference from directory names.
pub mod section;
pub mod synopsis;
/// Enumeration of pages on disk.
pub mod tree;

pub use names::{documented_names, name_tokens, page_name_tokens};
pub use page::{Head1, Page, COPYRIGHT, DESCRIPTION, NAME, SYNOPSIS};
pub use section::{is_non_api_section, manual_section, DEFAULT_SECTION};
pub use synopsis::{scan as scan_synopsis, DeclarationKind, SymbolDeclaration, SynopsisScan};
pub use tree::{enumerate_pages, page_stems, pages_in};
