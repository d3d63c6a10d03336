//! Run options and the YAML-configurable project layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::NitsError;
use crate::serde::from_yaml_slice;

/// Which families of checks a run performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// Per-page structural and consistency diagnostics.
    pub report_style_nits: bool,
    /// Mandatory-section checks and the external structural checker.
    pub report_missing_sections: bool,
    /// Export-manifest coverage checking.
    pub report_undocumented: bool,
}

impl CheckOptions {
    /// Builds options from the individual flags; strict mode implies style nits.
    pub fn new(style_nits: bool, missing_sections: bool, undocumented: bool) -> Self {
        Self {
            report_style_nits: style_nits || missing_sections,
            report_missing_sections: missing_sections,
            report_undocumented: undocumented,
        }
    }

    /// Returns whether no check family is enabled.
    pub fn is_idle(&self) -> bool {
        !self.report_style_nits && !self.report_undocumented
    }
}

/// One export manifest and the logical library it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSpec {
    /// Library name used to tag undocumented-symbol records.
    pub library: String,
    /// Manifest path relative to the project root.
    pub path: PathBuf,
}

impl ManifestSpec {
    /// Creates a manifest entry.
    pub fn new(library: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            library: library.into(),
            path: path.into(),
        }
    }
}

/// External structural checker invoked in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCheckerConfig {
    /// Program to run; the page path is appended to `args`.
    #[serde(default = "ExternalCheckerConfig::default_program")]
    pub program: String,
    /// Extra arguments placed before the page path.
    #[serde(default)]
    pub args: Vec<String>,
    /// Regular expressions for output lines that are known to be acceptable.
    #[serde(default = "ExternalCheckerConfig::default_ignore")]
    pub ignore: Vec<String>,
}

impl ExternalCheckerConfig {
    fn default_program() -> String {
        "podchecker".to_string()
    }

    fn default_ignore() -> Vec<String> {
        vec![r"\(section\) in.*deprecated".to_string()]
    }
}

impl Default for ExternalCheckerConfig {
    fn default() -> Self {
        Self {
            program: Self::default_program(),
            args: Vec::new(),
            ignore: Self::default_ignore(),
        }
    }
}

/// Project layout and rule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory every relative path below is resolved against.
    #[serde(default = "Config::default_root")]
    pub root: PathBuf,
    /// Glob selecting manual pages when no explicit list is given.
    #[serde(default = "Config::default_page_glob")]
    pub page_glob: String,
    /// File extension of manual pages, without the dot.
    #[serde(default = "Config::default_page_extension")]
    pub page_extension: String,
    /// Directory whose pages form the documented-symbol index.
    #[serde(default = "Config::default_manual_dir")]
    pub manual_dir: PathBuf,
    /// Export manifests checked for coverage, in order.
    #[serde(default = "Config::default_manifests")]
    pub manifests: Vec<ManifestSpec>,
    /// Exported symbols starting with one of these prefixes need no page.
    #[serde(default = "Config::default_exempt_prefixes")]
    pub exempt_prefixes: Vec<String>,
    /// Copyright holder every page must credit.
    #[serde(default = "Config::default_copyright_holder")]
    pub copyright_holder: String,
    /// Header directory of the library's own includes (`#include <NS/...>`).
    #[serde(default = "Config::default_include_namespace")]
    pub include_namespace: String,
    /// External structural checker settings.
    #[serde(default)]
    pub external_checker: ExternalCheckerConfig,
}

impl Config {
    fn default_root() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_page_glob() -> String {
        "doc/*/*.pod".to_string()
    }

    fn default_page_extension() -> String {
        "pod".to_string()
    }

    fn default_manual_dir() -> PathBuf {
        PathBuf::from("doc/man3")
    }

    fn default_manifests() -> Vec<ManifestSpec> {
        vec![
            ManifestSpec::new("crypto", "util/libcrypto.num"),
            ManifestSpec::new("ssl", "util/libssl.num"),
        ]
    }

    fn default_exempt_prefixes() -> Vec<String> {
        vec!["ASN1_".to_string()]
    }

    fn default_copyright_holder() -> String {
        "The OpenSSL Project Authors".to_string()
    }

    fn default_include_namespace() -> String {
        "openssl".to_string()
    }

    /// Loads a configuration from the provided YAML path.
    pub fn load(path: &Path) -> Result<Self, NitsError> {
        let bytes = fs::read(path).map_err(|err| NitsError::io("config_read", path, err))?;
        from_yaml_slice(&bytes)
    }

    /// Resolves `path` against the configured root unless it is absolute.
    ///
    /// With the default root `.` the path is returned unchanged, so reports
    /// show paths the way they were configured.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.root == Path::new(".") {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            page_glob: Self::default_page_glob(),
            page_extension: Self::default_page_extension(),
            manual_dir: Self::default_manual_dir(),
            manifests: Self::default_manifests(),
            exempt_prefixes: Self::default_exempt_prefixes(),
            copyright_holder: Self::default_copyright_holder(),
            include_namespace: Self::default_include_namespace(),
            external_checker: ExternalCheckerConfig::default(),
        }
    }
}
