//! Indentation of generated wrappers

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indentation style for one nesting level of wrapper code
///
/// Serialized through its string form (`"auto"`, `"tab"`, `"2"`); a bare
/// width such as `2` is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum IndentStyle {
    /// Reuse the indentation found in the module body, falling back to a tab
    #[default]
    Auto,
    /// Tabs
    Tabs,
    /// Spaces with specified width
    Spaces(u8),
}

impl IndentStyle {
    /// Resolve the indent unit, consulting `lines` when the style is `Auto`
    pub fn unit<'s>(self, lines: impl IntoIterator<Item = &'s str>) -> String {
        match self {
            IndentStyle::Tabs => "\t".to_string(),
            IndentStyle::Spaces(width) => " ".repeat(width as usize),
            IndentStyle::Auto => guess_indent(lines).unwrap_or_else(|| "\t".to_string()),
        }
    }
}

impl FromStr for IndentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(IndentStyle::Auto),
            "tab" | "tabs" => Ok(IndentStyle::Tabs),
            other => other
                .parse::<u8>()
                .map(IndentStyle::Spaces)
                .map_err(|_| format!("Invalid indent: {} (expected auto, tab or a width)", s)),
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentStyle::Auto => write!(f, "auto"),
            IndentStyle::Tabs => write!(f, "tab"),
            IndentStyle::Spaces(width) => write!(f, "{}", width),
        }
    }
}

impl<'de> Deserialize<'de> for IndentStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Width(u8),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Width(width) => Ok(IndentStyle::Spaces(width)),
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

impl From<IndentStyle> for String {
    fn from(style: IndentStyle) -> Self {
        style.to_string()
    }
}

/// Guess the indent unit of existing code.
///
/// Tabs win ties. For space-indented code the narrowest indentation is the unit.
/// Returns `None` when no line is indented.
fn guess_indent<'s>(lines: impl IntoIterator<Item = &'s str>) -> Option<String> {
    let mut tabbed = 0usize;
    let mut spaced = 0usize;
    let mut min_spaces = usize::MAX;

    for line in lines {
        if line.starts_with('\t') {
            tabbed += 1;
        } else if line.starts_with("  ") {
            spaced += 1;
            let width = line.len() - line.trim_start_matches(' ').len();
            min_spaces = min_spaces.min(width);
        }
    }

    if tabbed == 0 && spaced == 0 {
        None
    } else if tabbed >= spaced {
        Some("\t".to_string())
    } else {
        Some(" ".repeat(min_spaces))
    }
}
