//! Canonical display form for attribute values.

use crate::plan::AttrValue;

/// Default maximum length of a displayed scalar string, in characters.
pub const DEFAULT_MAX_VALUE_CHARS: usize = 100;

/// Appended to strings cut at the length limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Converts attribute values into printable strings.
#[derive(Debug, Clone, Copy)]
pub struct ValueNormalizer {
    /// Strings longer than this are truncated.
    max_chars: usize,
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueNormalizer {
    /// Creates a normalizer with the default length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_chars: DEFAULT_MAX_VALUE_CHARS,
        }
    }

    /// Sets the maximum displayed string length.
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Renders a value as a display string.
    ///
    /// Strings holding a JSON object or array are pretty-printed in full;
    /// other strings are truncated. Numbers are printed without a fractional
    /// part. Lists and maps are pretty-printed, falling back to a count when
    /// they cannot be serialized.
    #[must_use]
    pub fn normalize(&self, value: &AttrValue) -> String {
        match value {
            AttrValue::Null => String::from("null"),
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Number(n) => format!("{n:.0}"),
            AttrValue::String(s) => self.normalize_string(s),
            AttrValue::List(items) if items.is_empty() => String::from("[]"),
            AttrValue::List(items) => {
                to_pretty_json(value).unwrap_or_else(|| format!("[{} items]", items.len()))
            }
            AttrValue::Map(fields) => {
                to_pretty_json(value).unwrap_or_else(|| format!("{{{} fields}}", fields.len()))
            }
        }
    }

    fn normalize_string(&self, s: &str) -> String {
        if looks_like_json(s) {
            if let Some(pretty) = reformat_json(s) {
                return pretty;
            }
        }
        self.truncate(s)
    }

    fn truncate(&self, s: &str) -> String {
        match s.char_indices().nth(self.max_chars) {
            Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &s[..cut]),
            None => s.to_string(),
        }
    }
}

/// Returns true if the trimmed text is wrapped in `{}` or `[]`.
fn looks_like_json(s: &str) -> bool {
    let trimmed = s.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

fn reformat_json(s: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(s).ok()?;
    to_pretty_json(&AttrValue::from(parsed))
}

fn to_pretty_json(value: &AttrValue) -> Option<String> {
    serde_json::to_string_pretty(&value.to_json()?).ok()
}
