//! Attribute values carried by plan documents.
//!
//! Resource attributes in a plan are arbitrary JSON. They are modelled as a
//! closed set of variants so that equality and display are plain matches.
//! Numbers are held as `f64`, matching how the plan format encodes them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A keyed structure of attribute values, such as a resource's `before` state.
pub type Attributes = BTreeMap<String, AttrValue>;

/// 2^63: integral values below this (and at or above its negation) fit an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
/// 2^64: non-negative integral values below this fit a `u64`.
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// A single untyped attribute value.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list.
    List(Vec<AttrValue>),
    /// A keyed structure; key order carries no meaning.
    Map(Attributes),
}

impl AttrValue {
    /// Converts back into a JSON tree for serialization.
    ///
    /// Integral numbers within the `i64`/`u64` range are emitted as plain
    /// integers, never in exponent form. Returns `None` when a number is not
    /// representable in JSON (NaN or infinite).
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        Some(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n)?,
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(
                items.iter().map(Self::to_json).collect::<Option<Vec<_>>>()?,
            ),
            Self::Map(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn number_to_json(n: f64) -> Option<serde_json::Value> {
    if n.is_finite() && n.fract() == 0.0 {
        if (-I64_BOUND..I64_BOUND).contains(&n) {
            return Some(serde_json::Value::from(n as i64));
        }
        if (0.0..U64_BOUND).contains(&n) {
            return Some(serde_json::Value::from(n as u64));
        }
    }
    serde_json::Number::from_f64(n).map(serde_json::Value::Number)
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for AttrValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        crate::planner::values_equal(self, other)
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .ok_or_else(|| serde::ser::Error::custom("number is not representable in JSON"))?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested() {
        let value = AttrValue::from(json!({"tags": {"env": "prod"}, "ports": [80, 443]}));
        let AttrValue::Map(map) = value else {
            panic!("object should convert to map");
        };

        assert_eq!(map.len(), 2);
        assert_eq!(
            map["ports"],
            AttrValue::List(vec![AttrValue::Number(80.0), AttrValue::Number(443.0)])
        );
        assert!(matches!(map["tags"], AttrValue::Map(_)));
    }

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        let json = AttrValue::Number(3.0).to_json().expect("finite number");
        assert_eq!(json.to_string(), "3");

        let json = AttrValue::Number(0.25).to_json().expect("finite number");
        assert_eq!(json.to_string(), "0.25");
    }

    #[test]
    fn test_large_integers_serialize_without_exponent() {
        let json = AttrValue::Number(1e18).to_json().expect("finite number");
        assert_eq!(json.to_string(), "1000000000000000000");

        let json = AttrValue::Number(-4e18).to_json().expect("finite number");
        assert_eq!(json.to_string(), "-4000000000000000000");

        let json = AttrValue::Number(1e19).to_json().expect("finite number");
        assert_eq!(json.to_string(), "10000000000000000000");
    }

    #[test]
    fn test_non_finite_number_has_no_json_form() {
        let list = AttrValue::List(vec![AttrValue::Number(f64::NAN)]);
        assert!(list.to_json().is_none());
        assert!(serde_json::to_string(&list).is_err());
    }

    #[test]
    fn test_deserialize_from_document() {
        let value: AttrValue = serde_json::from_str(r#"{"a": [true, null, "x"]}"#)
            .expect("valid JSON");
        assert_eq!(
            value,
            AttrValue::Map(Attributes::from([(
                String::from("a"),
                AttrValue::List(vec![
                    AttrValue::Bool(true),
                    AttrValue::Null,
                    AttrValue::String(String::from("x")),
                ]),
            )]))
        );
    }
}
