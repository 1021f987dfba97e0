//! Property values carried by head elements

use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;

/// A property value on a head element
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (f64)
    Number(f64),
    /// String value
    String(String),
    /// Ordered sequence of values, e.g. text fragments
    Array(Vec<Value>),
    /// Nested property bag
    Object(Props),
}

impl Value {
    /// Returns true if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string value if this is a string, None otherwise
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the sequence if this is an array, None otherwise
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Whether a script host would treat this value as set.
    ///
    /// Empty strings, zero, NaN, `false` and null are unset; every array and
    /// object is set, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// String form of the value the way a script host stringifies it.
    ///
    /// Whole numbers drop the fractional part, magnitudes from `1e21` up or
    /// below `1e-6` use exponent form (`1e+21`), nested arrays are joined
    /// with commas (null items become empty) and objects collapse to
    /// `[object Object]`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_to_text(*n),
            Self::String(s) => s.clone(),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => "[object Object]".to_owned(),
        }
    }
}

fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_text(n)
    } else if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// `1e+21` / `1.5e-7`: positive exponents carry an explicit sign
fn exponent_text(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Props> for Value {
    fn from(value: Props) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An element's property bag.
///
/// Keys are unique. Insertion order is kept so descriptors serialize the
/// attributes in the order they were declared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props(IndexMap<String, Value>);

impl Props {
    /// Creates a new empty property bag
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a property, returning the previous value if the key existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a property, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Props {
    type Item = (String, Value);
    type IntoIter = IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Props, Value};
    use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, Serializer};
    use std::fmt;

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Null => serializer.serialize_unit(),
                Self::Bool(b) => serializer.serialize_bool(*b),
                Self::Number(n) => serialize_number(*n, serializer),
                Self::String(s) => serializer.serialize_str(s),
                Self::Array(items) => items.serialize(serializer),
                Self::Object(props) => props.serialize(serializer),
            }
        }
    }

    impl Serialize for Props {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    #[allow(clippy::as_conversions)]
    fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole numbers go out as integers so `1` stays `1` on the wire.
        if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(n as i64)
        } else {
            serializer.serialize_f64(n)
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = Value;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a property value")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_none<E: de::Error>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
            Deserialize::deserialize(deserializer)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
            Ok(Value::Bool(v))
        }

        #[allow(clippy::as_conversions)]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
            Ok(Value::Number(v as f64))
        }

        #[allow(clippy::as_conversions)]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
            Ok(Value::Number(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
            Ok(Value::Number(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
            Ok(Value::String(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
            Ok(Value::String(v))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(Value::Array(items))
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
            PropsVisitor.visit_map(map).map(Value::Object)
        }
    }

    struct PropsVisitor;

    impl<'de> Visitor<'de> for PropsVisitor {
        type Value = Props;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a property bag")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Props, A::Error> {
            let mut props = Props::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, Value>()? {
                props.insert(key, value);
            }
            Ok(props)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(ValueVisitor)
        }
    }

    impl<'de> Deserialize<'de> for Props {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(PropsVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_impls() {
        let v: Value = true.into();
        assert!(matches!(v, Value::Bool(true)));

        let v: Value = 42i32.into();
        assert!(matches!(v, Value::Number(n) if n == 42.0));

        let v: Value = "hello".into();
        assert_eq!(v.as_string(), Some("hello"));

        let v: Value = vec!["a", "b"].into();
        assert_eq!(v.as_array().map(<[Value]>::len), Some(2));

        let v: Value = None::<&str>.into();
        assert!(v.is_null());
    }

    #[test]
    fn test_to_text_scalars() {
        assert_eq!(Value::from("Hello").to_text(), "Hello");
        assert_eq!(Value::from(1i32).to_text(), "1");
        assert_eq!(Value::from(-0.0).to_text(), "0");
        assert_eq!(Value::from(2.5).to_text(), "2.5");
        assert_eq!(Value::from(f64::NAN).to_text(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_text(), "-Infinity");
        assert_eq!(Value::from(123i32).to_text(), "123");
        assert_eq!(Value::from(1e21).to_text(), "1e+21");
        assert_eq!(Value::from(-2.5e22).to_text(), "-2.5e+22");
        assert_eq!(Value::from(1e20).to_text(), "100000000000000000000");
        assert_eq!(Value::from(1e-7).to_text(), "1e-7");
        assert_eq!(Value::from(1.5e-7).to_text(), "1.5e-7");
        assert_eq!(Value::from(0.000001).to_text(), "0.000001");
        assert_eq!(Value::from(false).to_text(), "false");
        assert_eq!(Value::Null.to_text(), "null");
    }

    #[test]
    fn test_to_text_containers() {
        let nested = Value::Array(vec![1i32.into(), Value::Null, vec!["x", "y"].into()]);
        assert_eq!(nested.to_text(), "1,,x,y");
        assert_eq!(Value::Object(Props::new()).to_text(), "[object Object]");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::from(0i32).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Array(Vec::new()).is_truthy());
        assert!(Value::Object(Props::new()).is_truthy());
    }

    #[test]
    fn test_props_order_and_remove() {
        let mut props: Props = [("name", "a"), ("content", "1"), ("lang", "en")]
            .into_iter()
            .collect();
        assert_eq!(props.remove("content"), Some(Value::from("1")));

        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, vec!["name", "lang"]);
        assert_eq!(props.get("name"), Some(&Value::from("a")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_value_json_shape() -> Result<(), serde_json::Error> {
        let value: Value = serde_json::from_str(r#"{"b":[1,"x",null],"a":true}"#)?;
        let keys: Vec<_> = match &value {
            Value::Object(props) => props.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        assert_eq!(keys, vec!["b", "a"]);

        let json = serde_json::to_string(&value)?;
        assert_eq!(json, r#"{"b":[1,"x",null],"a":true}"#);
        Ok(())
    }
}
