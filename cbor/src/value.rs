/*!
An owned CBOR data-item tree.

[`Map`] keeps its entries sorted by the bytewise order of the canonical
encoding of each key, so two maps holding the same entries compare equal and
encode identically whatever order they were populated in.
*/

use super::encode;
use alloc::{boxed::Box, string::String, vec::Vec};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Incorrect type, expecting {0}, found {1}")]
    IncorrectType(&'static str, &'static str),

    #[error("Integer value does not fit in the requested type")]
    IntegerOutOfRange,

    #[error("Simple value {0} is not available as a plain simple value")]
    InvalidSimpleValue(u8),
}

/// A simple value (major type 7) without a dedicated [`Value`] variant.
///
/// 20..=23 are false, true, null and undefined, and 24..=31 are not
/// well-formed, so neither range can be held here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleValue(pub(crate) u8);

impl SimpleValue {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SimpleValue {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            20..=31 => Err(Error::InvalidSimpleValue(value)),
            value => Ok(Self(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UnsignedInteger(u64),
    /// Holds `n` for the integer `-1 - n`, as carried on the wire.
    NegativeInteger(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(Map),
    Tagged(u64, Box<Value>),
    False,
    True,
    Null,
    Undefined,
    Simple(SimpleValue),
    Float(f64),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::UnsignedInteger(_) => "Unsigned Integer",
            Value::NegativeInteger(_) => "Negative Integer",
            Value::Bytes(_) => "Byte String",
            Value::Text(_) => "Text String",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::Tagged(..) => "Tagged Value",
            Value::False | Value::True => "Boolean",
            Value::Null => "Null",
            Value::Undefined => "Undefined",
            Value::Simple(_) => "Simple Value",
            Value::Float(_) => "Float",
        }
    }

    pub fn into_array(self) -> Result<Vec<Value>, Error> {
        match self {
            Value::Array(items) => Ok(items),
            v => Err(Error::IncorrectType("Array", v.type_name())),
        }
    }

    pub fn into_map(self) -> Result<Map, Error> {
        match self {
            Value::Map(m) => Ok(m),
            v => Err(Error::IncorrectType("Map", v.type_name())),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        match self {
            Value::Bytes(b) => Ok(b),
            v => Err(Error::IncorrectType("Byte String", v.type_name())),
        }
    }

    pub fn into_text(self) -> Result<String, Error> {
        match self {
            Value::Text(t) => Ok(t),
            v => Err(Error::IncorrectType("Text String", v.type_name())),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self {
            Value::Bytes(b) => Ok(b.as_slice()),
            v => Err(Error::IncorrectType("Byte String", v.type_name())),
        }
    }

    pub fn as_text(&self) -> Result<&str, Error> {
        match self {
            Value::Text(t) => Ok(t.as_str()),
            v => Err(Error::IncorrectType("Text String", v.type_name())),
        }
    }

    pub fn as_i64(&self) -> Result<i64, Error> {
        match self {
            Value::UnsignedInteger(v) => i64::try_from(*v).map_err(|_| Error::IntegerOutOfRange),
            Value::NegativeInteger(v) => i64::try_from(*v)
                .map(|v| -1 - v)
                .map_err(|_| Error::IntegerOutOfRange),
            v => Err(Error::IncorrectType("Integer", v.type_name())),
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UnsignedInteger(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        if value >= 0 {
            Value::UnsignedInteger(value as u64)
        } else {
            Value::NegativeInteger((-1 - value) as u64)
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        (value as i64).into()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { Value::True } else { Value::False }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Value {
    fn from(value: [u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

#[derive(Clone, PartialEq)]
struct Entry {
    encoded: Vec<u8>,
    key: Value,
    value: Value,
}

#[derive(Clone, Default, PartialEq)]
pub struct Map(Vec<Entry>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn search(&self, encoded: &[u8]) -> Result<usize, usize> {
        self.0
            .binary_search_by(|e| e.encoded.as_slice().cmp(encoded))
    }

    /// Inserts an entry, returning the previous value held under an equal key.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let key = key.into();
        let encoded = encode::emit(&key);
        match self.search(&encoded) {
            Ok(idx) => Some(core::mem::replace(&mut self.0[idx].value, value.into())),
            Err(idx) => {
                self.0.insert(
                    idx,
                    Entry {
                        encoded,
                        key,
                        value: value.into(),
                    },
                );
                None
            }
        }
    }

    /// Decoder insertion: appends without searching. Fails if `key` equals the
    /// previous key, and reports whether it follows the previous key in canonical order.
    ///
    /// Once any entry is out of order, [`Map::sort_unique`] must be called.
    pub(crate) fn push_decoded(&mut self, key: Value, value: Value) -> Option<bool> {
        let encoded = encode::emit(&key);
        let in_order = match self.0.last() {
            None => true,
            Some(last) => match last.encoded.cmp(&encoded) {
                core::cmp::Ordering::Less => true,
                core::cmp::Ordering::Equal => return None,
                core::cmp::Ordering::Greater => false,
            },
        };
        self.0.push(Entry {
            encoded,
            key,
            value,
        });
        Some(in_order)
    }

    /// Restores canonical order, returning false if two keys are equal.
    pub(crate) fn sort_unique(&mut self) -> bool {
        self.0.sort_by(|a, b| a.encoded.cmp(&b.encoded));
        !self.0.windows(2).any(|w| w[0].encoded == w[1].encoded)
    }

    pub fn get<K>(&self, key: K) -> Option<&Value>
    where
        K: Into<Value>,
    {
        self.search(&encode::emit(&key.into()))
            .ok()
            .map(|idx| &self.0[idx].value)
    }

    pub fn contains_key<K>(&self, key: K) -> bool
    where
        K: Into<Value>,
    {
        self.search(&encode::emit(&key.into())).is_ok()
    }

    pub fn remove<K>(&mut self, key: K) -> Option<Value>
    where
        K: Into<Value>,
    {
        self.search(&encode::emit(&key.into()))
            .ok()
            .map(|idx| self.0.remove(idx).value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|e| &e.key)
    }

    /// Iterates entries in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter().map(|e| (&e.key, &e.value))
    }
}

impl core::fmt::Debug for Map {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Map
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Map::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

impl IntoIterator for Map {
    type Item = (Value, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.0.into_iter())
    }
}

/// Owning iterator over the entries of a [`Map`], in canonical key order.
pub struct IntoIter(alloc::vec::IntoIter<Entry>);

impl Iterator for IntoIter {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
