//! Strict value and record types.
//!
//! Records are plain string-keyed maps with validated lookup. Values are a
//! closed set of JSON-like variants that can be hashed and compared, so
//! records themselves can be used as hash keys.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single field value inside a [`Record`].
///
/// `Int` and `Float` are distinct: `Int(1)` does not equal `Float(1.0)`.
/// Integers above `i64::MAX` are kept exactly as `UInt`.
/// Floats compare by bit pattern after folding `-0.0` into `0.0` and every
/// NaN into one canonical NaN, which makes `Eq` and `Hash` lawful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON `null`
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Ordered list of values
    List(Vec<Value>),
    /// Nested mapping
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Borrow the string contents if this is a `Text` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::UInt(_) => 3,
            Self::Float(_) => 4,
            Self::Text(_) => 5,
            Self::List(_) => 6,
            Self::Map(_) => 7,
        }
    }
}

fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::UInt(u) => u.hash(state),
            Self::Float(f) => float_bits(*f).hash(state),
            Self::Text(s) => s.hash(state),
            Self::List(l) => l.hash(state),
            Self::Map(m) => m.hash(state),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::UInt(a), Self::UInt(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => {
                f64::from_bits(float_bits(*a)).total_cmp(&f64::from_bits(float_bits(*b)))
            }
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            other => write!(f, "{}", serde_json::Value::from(other.clone())),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(i) => Self::from(i),
            Value::UInt(u) => Self::from(u),
            // Non-finite floats have no JSON form.
            Value::Float(f) => serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::Text(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Map(map) => Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::UInt(u), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A string-keyed mapping with validated lookup.
///
/// Keys are stored sorted, so two records with the same entries are equal
/// and hash the same no matter the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a field that must be present.
    pub fn require(&self, key: &str) -> Result<&Value, ValidationError> {
        self.0.get(key).ok_or_else(|| ValidationError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Check if a field is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert a JSON object into a record.
    ///
    /// `index` is the element's position in its enclosing list and is only
    /// used for the error message.
    pub fn from_json(value: serde_json::Value, index: usize) -> Result<Self, ValidationError> {
        match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect()),
            other => Err(ValidationError::NotARecord {
                index,
                kind: json_kind(&other),
            }),
        }
    }

    /// Convert the record back into a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Validate that `value` is a list of mappings and convert it.
///
/// Fails on the first element that is not a mapping, naming its index.
pub fn records_from_json(value: &serde_json::Value) -> Result<Vec<Record>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::NotAList(json_kind(value)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| Record::from_json(item.clone(), index))
        .collect()
}

/// Short name of a JSON value's type, used in error messages.
#[must_use]
pub const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_record_equality_ignores_insertion_order() {
        let a = Record::new().with("x", 1).with("y", "two");
        let b = Record::new().with("y", "two").with("x", 1);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn test_float_zero_and_nan_normalised() {
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(-f64::NAN));
    }

    #[test]
    fn test_float_ordering_agrees_with_equality() {
        let neg_nan = Value::Float(-f64::NAN);
        let nan = Value::Float(f64::NAN);
        let one = Value::Float(1.0);

        assert_eq!(neg_nan.cmp(&nan), Ordering::Equal);
        assert_eq!(neg_nan.cmp(&one), nan.cmp(&one));
        assert_eq!(Value::Float(-0.0).cmp(&Value::Float(0.0)), Ordering::Equal);

        let mut values = vec![nan.clone(), one.clone(), neg_nan, Value::Float(-2.0)];
        values.sort();
        assert_eq!(values[0], Value::Float(-2.0));
        assert_eq!(values[1], one);
        assert_eq!(values[2], nan);
        assert_eq!(values[3], nan);
    }

    #[test]
    fn test_large_integers_kept_exact() {
        let max = Value::from(json!(18_446_744_073_709_551_615_u64));
        let below = Value::from(json!(18_446_744_073_709_551_614_u64));
        assert_eq!(max, Value::UInt(u64::MAX));
        assert_ne!(max, below);
        assert!(below < max);
        assert!(Value::from(i64::MAX) < max);

        assert_eq!(serde_json::Value::from(max), json!(u64::MAX));
        assert_eq!(Value::from(7_u64), Value::Int(7));
    }

    #[test]
    fn test_json_numbers_keep_their_kind() {
        assert_eq!(Value::from(json!(1)), Value::Int(1));
        assert_eq!(Value::from(json!(1.0)), Value::Float(1.0));
        assert_eq!(Value::from(json!(-5)), Value::Int(-5));
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        assert_eq!(serde_json::Value::from(Value::Float(f64::NAN)), json!(null));
        assert_eq!(serde_json::Value::from(Value::Float(f64::INFINITY)), json!(null));
        assert_eq!(serde_json::Value::from(Value::Float(2.5)), json!(2.5));
    }

    #[test]
    fn test_large_integer_deserializes_untagged() {
        let value: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(value, Value::UInt(u64::MAX));
        assert_eq!(serde_json::to_string(&value).unwrap(), "18446744073709551615");
    }

    #[test]
    fn test_require_missing_key() {
        let record = Record::new().with("id", 1);
        assert_eq!(record.require("id").unwrap(), &Value::Int(1));
        assert_eq!(
            record.require("name").unwrap_err(),
            ValidationError::MissingKey {
                key: "name".to_string()
            }
        );
    }

    #[test]
    fn test_records_from_json() {
        let records = records_from_json(&json!([{"a": 1}, {"b": [true, null]}])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("a"), Some(&Value::Int(1)));
        assert_eq!(
            records[1].get("b"),
            Some(&Value::List(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn test_records_from_json_rejects_non_list() {
        let err = records_from_json(&json!({"a": 1})).unwrap_err();
        assert_eq!(err, ValidationError::NotAList("mapping"));
    }

    #[test]
    fn test_records_from_json_rejects_non_mapping_element() {
        let err = records_from_json(&json!([{"a": 1}, "nope"])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotARecord {
                index: 1,
                kind: "string"
            }
        );
    }

    #[test]
    fn test_json_conversion_preserves_fields() {
        let source = json!({"id": 7, "name": "x", "score": 1.5, "tags": ["a"]});
        let record = Record::from_json(source.clone(), 0).unwrap();
        assert_eq!(record.to_json(), source);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_value_ordering_across_kinds() {
        let mut values = vec![Value::from("b"), Value::from(2), Value::Null, Value::from(1)];
        values.sort();
        assert_eq!(
            values,
            vec![Value::Null, Value::from(1), Value::from(2), Value::from("b")]
        );
    }
}
