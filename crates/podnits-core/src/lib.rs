#![deny(missing_docs)]
#![doc = "Core types, errors, configuration and run context shared by the podnits checkers."]

/// Run options and project layout.
pub mod config;
/// Per-run context: documented-symbol index and sibling cache.
pub mod context;
/// Structured error types.
pub mod errors;
/// Diagnostics and the ordered run report.
pub mod report;
/// Canonical JSON and YAML helpers.
pub mod serde;

pub use config::{CheckOptions, Config, ExternalCheckerConfig, ManifestSpec};
pub use context::{CheckContext, DocumentedSymbolIndex, Duplicate};
pub use errors::{ErrorInfo, NitsError};
pub use report::{Diagnostic, Entry, Location, Report, ANCHOR_LINE};
pub use crate::serde::{from_yaml_slice, to_canonical_json_bytes};
