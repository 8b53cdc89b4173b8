//! Syntactic classification of user-supplied colors.
//!
//! Patterns are checked in a fixed priority order and the first match wins.
//! Only the shape is checked, numeric ranges are left to the color API.

use std::sync::LazyLock;

use regex::Regex;

use crate::services::named_colors::NamedColorTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Hex,
    Rgb,
    Hsl,
    Cmyk,
    Named,
    Invalid,
}

impl Notation {
    /// Query parameter carrying a color in this notation
    pub fn query_key(&self) -> Option<&'static str> {
        match self {
            Notation::Hex | Notation::Named => Some("hex"),
            Notation::Rgb => Some("rgb"),
            Notation::Hsl => Some("hsl"),
            Notation::Cmyk => Some("cmyk"),
            Notation::Invalid => None,
        }
    }
}

static CMYK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:cmyk)\((\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3})\)$")
        .expect("valid regex")
});
static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsl\((\d{1,3}),\s*(\d{1,3})%,\s*(\d{1,3})%\)$").expect("valid regex")
});
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\((\d{1,3}),\s*(\d{1,3}),\s*(\d{1,3})\)$").expect("valid regex")
});
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

type Predicate = fn(&str, &NamedColorTable) -> bool;

fn is_cmyk(input: &str, _: &NamedColorTable) -> bool {
    CMYK_RE.is_match(input)
}

fn is_hsl(input: &str, _: &NamedColorTable) -> bool {
    HSL_RE.is_match(input)
}

fn is_rgb(input: &str, _: &NamedColorTable) -> bool {
    RGB_RE.is_match(input)
}

fn is_hex(input: &str, _: &NamedColorTable) -> bool {
    HEX_RE.is_match(input)
}

fn is_named(input: &str, table: &NamedColorTable) -> bool {
    table.contains(input)
}

/// Checked top to bottom. A bare numeric run like `123` is hex before it is
/// ever a name, and names are the last resort.
const RULES: [(Predicate, Notation); 5] = [
    (is_cmyk, Notation::Cmyk),
    (is_hsl, Notation::Hsl),
    (is_rgb, Notation::Rgb),
    (is_hex, Notation::Hex),
    (is_named, Notation::Named),
];

pub fn classify(input: &str, table: &NamedColorTable) -> Notation {
    RULES
        .iter()
        .find(|(matches, _)| matches(input, table))
        .map(|&(_, notation)| notation)
        .unwrap_or(Notation::Invalid)
}
