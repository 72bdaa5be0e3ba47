use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a target's content is presented and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Free text, edited inline
    String,
    /// Base-10 counter, adjusted with +/- steps
    Integer,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::String => "string",
            TargetKind::Integer => "integer",
        }
    }

    /// The other kind (used by the form's kind toggle)
    pub fn toggled(self) -> Self {
        match self {
            TargetKind::String => TargetKind::Integer,
            TargetKind::Integer => TargetKind::String,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(TargetKind::String),
            "integer" | "int" | "counter" => Ok(TargetKind::Integer),
            other => Err(format!(
                "unknown target type \"{}\" (expected string or integer)",
                other
            )),
        }
    }
}

/// One managed file: where it lives, what to call it, and its current value.
///
/// Field names on disk match the persisted record: `path`, `displayName`,
/// `type`, `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub path: PathBuf,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub content: String,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>, kind: TargetKind) -> Self {
        Target {
            path: path.into(),
            display_name: display_name.into(),
            kind,
            content: String::new(),
        }
    }

    /// Current numeric value, treating unparseable content as 0
    pub fn value(&self) -> i64 {
        parse_integer(&self.content).unwrap_or(0)
    }

    pub fn is_integer(&self) -> bool {
        self.kind == TargetKind::Integer
    }
}

/// Parse a leading base-10 integer: optional whitespace, optional sign, then
/// at least one ASCII digit. Anything after the digits is ignored, so
/// `"12 points"` is 12. Out-of-range digit runs clamp to the `i64` bounds.
pub fn parse_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in rest[..digits].bytes() {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    Some(value)
}

/// Returns the content an integer target should hold: the text itself when
/// it parses, otherwise `"0"`. The bool is true when coercion happened.
pub fn coerce_integer(text: &str) -> (String, bool) {
    if parse_integer(text).is_some() {
        (text.to_string(), false)
    } else {
        ("0".to_string(), true)
    }
}
