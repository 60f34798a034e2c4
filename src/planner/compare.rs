//! Structural equality for attribute values.

use crate::plan::AttrValue;

/// Returns true when two values are semantically identical.
///
/// The comparison is deep and order-sensitive. Values of different kinds are
/// never equal, so the string `"1"` differs from the number `1`. Two maps are
/// equal only if they have the same size and every key of `a` is present in
/// `b` with an equal value.
#[must_use]
pub fn values_equal(a: &AttrValue, b: &AttrValue) -> bool {
    match (a, b) {
        (AttrValue::Null, AttrValue::Null) => true,
        (AttrValue::Bool(x), AttrValue::Bool(y)) => x == y,
        #[allow(clippy::float_cmp)]
        (AttrValue::Number(x), AttrValue::Number(y)) => x == y,
        (AttrValue::String(x), AttrValue::String(y)) => x == y,
        (AttrValue::List(xs), AttrValue::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (AttrValue::Map(xs), AttrValue::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}
