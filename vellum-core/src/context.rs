// vellum-core/src/context.rs
use std::collections::BTreeMap;

use crate::error::DataError;
use crate::value::{Value, ValueKind};

/// Field name → value mapping that a template renders against.
///
/// Fields are only ever added. Lookups accept dotted paths: the first
/// segment names a field, later segments walk into records (or index
/// sequences).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContext {
    fields: BTreeMap<String, Value>,
}

impl DataContext {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, handy for tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Copies every field of `other` into this context, replacing same-named fields.
    pub fn merge(&mut self, other: DataContext) {
        self.fields.extend(other.fields);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolves a (possibly dotted) field path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.fields.get(first)?, |value, segment| value.child(segment))
    }

    pub fn require(&self, path: &str) -> Result<&Value, DataError> {
        self.get(path)
            .ok_or_else(|| DataError::UnknownField(path.to_string()))
    }

    pub fn string(&self, path: &str) -> Result<&str, DataError> {
        let value = self.require(path)?;
        value
            .as_str()
            .ok_or_else(|| mismatch(path, ValueKind::String, value))
    }

    pub fn boolean(&self, path: &str) -> Result<bool, DataError> {
        let value = self.require(path)?;
        value
            .as_bool()
            .ok_or_else(|| mismatch(path, ValueKind::Bool, value))
    }

    pub fn sequence(&self, path: &str) -> Result<&[Value], DataError> {
        let value = self.require(path)?;
        value
            .as_sequence()
            .ok_or_else(|| mismatch(path, ValueKind::Sequence, value))
    }
}

fn mismatch(path: &str, expected: ValueKind, found: &Value) -> DataError {
    DataError::TypeMismatch {
        field: path.to_string(),
        expected,
        found: found.kind(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for DataContext {
    type Error = DataError;

    /// Only a JSON object can become a context; its members become fields.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Record(fields) => Ok(Self { fields }),
            other => Err(DataError::NotARecord(other.kind())),
        }
    }
}
