use std::collections::hash_map::{self, HashMap};
use std::fmt;

use serde::ser::{Error as _, Serialize, Serializer};

/// Field values carried by a log [`Record`].
///
/// The set is closed on purpose: every variant has a text form for pattern
/// rendering and a JSON form for structured rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A UTF-8 string
    String(String),

    /// A 64-bit signed integer
    Integer(i64),

    /// A 64-bit unsigned integer
    Unsigned(u64),

    /// A 64-bit floating point number
    Float(f64),

    /// A boolean value
    Boolean(bool),

    /// An explicitly empty value
    Null,
}

impl Value {
    /// Returns the inner string for [`Value::String`], `None` otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Unsigned(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Unsigned(u) => serializer.serialize_u64(*u),
            Value::Float(fl) if !fl.is_finite() => {
                Err(S::Error::custom(format!("unsupported float value: {}", fl)))
            }
            Value::Float(fl) => serializer.serialize_f64(*fl),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

impl_from!(String: String, &str, &String);
impl_from!(Integer: i8, i16, i32, i64);
impl_from!(Unsigned: u8, u16, u32, u64);
impl_from!(Float: f32, f64);
impl_from!(Boolean: bool);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Unsigned(v as u64)
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Integer(v as i64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One log event: named fields plus the message under the `log` key.
///
/// Key order is not preserved. Renderers only borrow a record for the
/// duration of a call.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    /// Sets `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` only when it is not present yet.
    pub fn insert_if_absent(&mut self, key: &str, value: impl Into<Value>) {
        if !self.fields.contains_key(key) {
            self.fields.insert(key.to_owned(), value.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Record {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// Builds a [`Record`] from `key => value` pairs.
///
/// # Examples
///
/// ```
/// # use pattern_logger::{record, Value};
/// let rec = record! { "log" => "boot", "attempt" => 3 };
/// assert_eq!(rec.get("attempt"), Some(&Value::Integer(3)));
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut rec = $crate::Record::new();
        $( rec.insert($key, $value); )+
        rec
    }};
}
