//! Symbol extraction from SYNOPSIS lines.
//!
//! Each line is normalized first, then offered to [`RULES`] in order; the first
//! rule that recognizes the line names its symbol. Extraction is purely
//! textual and makes no attempt to understand C declarations.

use std::sync::OnceLock;

use regex::Regex;

/// Generic container macro replaced by [`PLACEHOLDER_TYPE`] before matching.
pub const WRAPPER_MACRO: &str = "STACK_OF";
/// Scalar type token standing in for a wrapper macro.
pub const PLACEHOLDER_TYPE: &str = "int";
/// Calling-convention annotation stripped before matching.
pub const ATTRIBUTE_MACRO: &str = "__declspec";

/// What kind of declaration a rule recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `typedef ... NAME;`
    TypeAlias,
    /// `#define NAME`
    Macro,
    /// `NAME(`
    FunctionLike,
}

/// Symbol declared by one synopsis line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDeclaration {
    /// Declared symbol name.
    pub name: String,
    /// Rule that matched.
    pub kind: DeclarationKind,
    /// The synopsis line as written in the page.
    pub origin_line: String,
}

/// Classification rule: a pure function from a normalized line to a symbol.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Kind reported when the rule matches.
    pub kind: DeclarationKind,
    /// Extracts the symbol, if the line has this shape.
    pub classify: fn(&str) -> Option<String>,
}

/// Classification rules in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        kind: DeclarationKind::TypeAlias,
        classify: type_alias,
    },
    Rule {
        kind: DeclarationKind::Macro,
        classify: macro_definition,
    },
    Rule {
        kind: DeclarationKind::FunctionLike,
        classify: function_like,
    },
];

/// Result of scanning a whole SYNOPSIS span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynopsisScan {
    /// Declarations in line order, at most one per line.
    pub declarations: Vec<SymbolDeclaration>,
    /// Original lines with a comma not followed by a space.
    pub comma_spacing: Vec<String>,
}

impl SynopsisScan {
    /// Returns whether some line declared `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.declarations.iter().any(|decl| decl.name == name)
    }
}

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("synopsis pattern is a valid regex")
}

fn wrapper_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(&format!(r"{WRAPPER_MACRO}\([^)]+\)")))
}

fn attribute_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(&format!(r"{ATTRIBUTE_MACRO}\([^)]+\)")))
}

fn typedef_fn_ptr_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(r"\btypedef\b.*\(\s*\*\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)\s*\("))
}

fn typedef_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(r"\btypedef\b.*\s\**([A-Za-z_][A-Za-z0-9_]*)\s*;"))
}

fn define_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(r"^\s*#\s*define\s+([A-Za-z0-9_]+)"))
}

fn call_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(r"([A-Za-z0-9_]+)\("))
}

fn comma_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| build(r"[a-z0-9],[^ ]"))
}

fn first_capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Rewrites wrapper macros to the placeholder type and drops attributes.
pub fn normalize(line: &str) -> String {
    let line = wrapper_re().replace_all(line, PLACEHOLDER_TYPE);
    attribute_re().replace_all(&line, "").into_owned()
}

/// `typedef ... NAME;` and `typedef R (*NAME)(...);`
pub fn type_alias(line: &str) -> Option<String> {
    first_capture(typedef_fn_ptr_re(), line).or_else(|| first_capture(typedef_re(), line))
}

/// `#define NAME ...`
pub fn macro_definition(line: &str) -> Option<String> {
    first_capture(define_re(), line)
}

/// First `identifier(` in the line.
pub fn function_like(line: &str) -> Option<String> {
    first_capture(call_re(), line)
}

/// Runs [`RULES`] in order over an already normalized line.
pub fn classify(normalized: &str) -> Option<(DeclarationKind, String)> {
    RULES
        .iter()
        .find_map(|rule| (rule.classify)(normalized).map(|name| (rule.kind, name)))
}

/// Normalizes and classifies a raw synopsis line.
pub fn extract(line: &str) -> Option<SymbolDeclaration> {
    classify(&normalize(line)).map(|(kind, name)| SymbolDeclaration {
        name,
        kind,
        origin_line: line.to_string(),
    })
}

/// Returns whether a normalized line has a comma without a following space.
pub fn missing_comma_space(normalized: &str) -> bool {
    comma_re().is_match(normalized)
}

/// Scans every non-empty line of a SYNOPSIS span.
pub fn scan(span: &str) -> SynopsisScan {
    let mut scan = SynopsisScan::default();
    for line in span.lines().filter(|line| !line.trim().is_empty()) {
        let normalized = normalize(line);
        if missing_comma_space(&normalized) {
            scan.comma_spacing.push(line.to_string());
        }
        if let Some((kind, name)) = classify(&normalized) {
            scan.declarations.push(SymbolDeclaration {
                name,
                kind,
                origin_line: line.to_string(),
            });
        }
    }
    scan
}
