//! The per-invocation parameter bag.
//!
//! Every stage of an invocation reads from and writes to one
//! [`ParameterBag`]. Values are YAML values so configuration entries (such
//! as the `repo` mapping) can be copied in unchanged.
//!
//! # Example
//!
//! ```
//! use tds::params::ParameterBag;
//!
//! let mut params = ParameterBag::new();
//! params.insert("command_name", "repository").unwrap();
//! params.insert("hosts", vec!["web01"]).unwrap();
//!
//! assert_eq!(params.get_str("command_name"), Some("repository"));
//! assert!(params.is_truthy("hosts"));
//! assert!(params.insert("command_name", "deploy").is_err());
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TdsError};

/// Insertion-ordered key/value store for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    entries: Mapping,
}

impl ParameterBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` if it is not set yet.
    ///
    /// Setting a key to the value it already holds is a no-op. Setting it to
    /// a different value fails with [`TdsError::ParameterConflict`]; use
    /// [`replace`](Self::replace) to overwrite on purpose.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self.entries.get(key) {
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(TdsError::ParameterConflict {
                key: key.to_string(),
            }),
            None => {
                self.entries.insert(Value::from(key), value);
                Ok(())
            }
        }
    }

    /// Set `key` unconditionally, returning the previous value.
    pub fn replace(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(Value::from(key), value.into())
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a boolean value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Get a list of strings.
    ///
    /// A single string counts as a one-element list; absent or null keys
    /// give an empty list.
    pub fn get_strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Whether `key` holds a value that counts as "set": not null, not
    /// false, not zero and not an empty string, list or mapping.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    /// Whether `key` is present at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            let key: String = key.into();
            bag.replace(&key, value);
        }
        bag
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}
