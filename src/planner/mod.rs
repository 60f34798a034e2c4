//! Change classification and attribute diffing.
//!
//! This module compares resource states field by field and renders the
//! detail fragment of each classified change.

mod compare;
mod diff;
mod formatter;
mod normalize;

pub use compare::values_equal;
pub use diff::{DiffEngine, FieldChange, FieldChangeKind, FieldDiff};
pub use formatter::{ChangeFormatter, DEFAULT_UNKNOWN_PLACEHOLDER, html_escape};
pub use normalize::{DEFAULT_MAX_VALUE_CHARS, TRUNCATION_MARKER, ValueNormalizer};
