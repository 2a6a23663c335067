use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

/// Used when a key has no alphanumeric characters at all (`"--"`, `"@"`).
pub const FALLBACK_NAME: &str = "Field";

/// Root name used when the caller doesn't pick one.
pub const DEFAULT_ROOT_NAME: &str = "RootType";

static SAFE_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static regex"));

static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("static regex"));

/// Can `s` appear as a bare property key?
pub fn is_safe_identifier(s: &str) -> bool {
    SAFE_IDENT.is_match(s)
}

pub fn is_valid_type_name(s: &str) -> bool {
    TYPE_NAME.is_match(s)
}

/// Property key → candidate type name: drop everything outside `[A-Za-z0-9]`
/// and uppercase the first character. Never returns an empty string and never
/// returns a name that starts with a digit.
pub fn capitalize(key: &str) -> String {
    let stripped = key.chars().filter(char::is_ascii_alphanumeric).collect::<String>();
    let mut chars = stripped.chars();
    match chars.next() {
        None => FALLBACK_NAME.to_string(),
        Some(first) if first.is_ascii_digit() => format!("T{stripped}"),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

// ------------------------------ Singular --------------------------------- //

const UNCOUNTABLE: &[&str] = &[
    "advice", "data", "deer", "equipment", "feedback", "fish", "information", "info",
    "media", "metadata", "money", "news", "series", "sheep", "software", "species",
    "status",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("cookies", "cookie"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

const SUFFIXES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("zzes", "zz"),
    ("xes", "x"),
    ("lves", "lf"),
    ("ies", "y"),
];

const KEEP: &[&str] = &["ss", "us", "is"];

/// Case-preserving English singular of a type name (`Users` → `User`,
/// `Categories` → `Category`, `People` → `Person`). Uncountables and words
/// that don't look plural come back unchanged.
pub fn singular(name: &str) -> String {
    if name.is_empty() || !name.is_ascii() {
        return name.to_string();
    }
    let lower = name.to_ascii_lowercase();

    if UNCOUNTABLE.iter().any(|u| ends_with_word(name, &lower, u)) {
        return name.to_string();
    }
    for (plural, single) in IRREGULAR {
        if ends_with_word(name, &lower, plural) {
            return replace_suffix(name, plural.len(), single);
        }
    }
    for (suffix, replacement) in SUFFIXES {
        if lower.len() > suffix.len() && lower.ends_with(suffix) {
            return replace_suffix(name, suffix.len(), replacement);
        }
    }
    if KEEP.iter().any(|k| lower.ends_with(k)) {
        return name.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        return replace_suffix(name, 1, "");
    }
    name.to_string()
}

/// `word` ends with `w` as a whole word or as the last camel-case segment.
fn ends_with_word(name: &str, lower: &str, w: &str) -> bool {
    if !lower.ends_with(w) {
        return false;
    }
    let start = lower.len() - w.len();
    start == 0 || name.as_bytes()[start].is_ascii_uppercase()
}

fn replace_suffix(name: &str, suffix_len: usize, replacement: &str) -> String {
    let (stem, tail) = name.split_at(name.len() - suffix_len);
    let shouting = name.len() > 1 && !name.bytes().any(|b| b.is_ascii_lowercase());
    let mut out = stem.to_string();
    if shouting {
        out.push_str(&replacement.to_ascii_uppercase());
    } else if tail.starts_with(|c: char| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(replacement);
    }
    out
}

// ------------------------------ TypeName --------------------------------- //

/// A root type name checked against `^[A-Z][A-Za-z0-9]*$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName(String);

impl TypeName {
    pub fn parse(s: &str) -> Result<Self, Error> {
        if is_valid_type_name(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidTypeName { name: s.to_string() })
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TypeName {
    fn default() -> Self {
        Self(DEFAULT_ROOT_NAME.to_string())
    }
}

impl FromStr for TypeName {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
