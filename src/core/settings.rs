//! Flat, namespaced settings as the host exposes them.
//!
//! Keys are fully qualified (`swan.logLevel`); a [`ConfigurationSection`] is
//! the view of one namespace with the prefix stripped.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// All settings known to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fully-qualified key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a fully-qualified key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// All entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// View of one namespace.
    pub fn section(&self, namespace: &str) -> ConfigurationSection {
        let prefix = format!("{namespace}.");
        let values = self
            .values
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix).map(|rest| (rest.to_string(), value.clone()))
            })
            .collect();

        ConfigurationSection { namespace: namespace.to_string(), values }
    }

    /// Keys whose value differs between `self` and `other`, including keys
    /// present on only one side.
    pub fn diff(&self, other: &Self) -> Vec<String> {
        let mut changed: Vec<String> = self
            .values
            .iter()
            .filter(|(key, value)| other.values.get(*key) != Some(*value))
            .map(|(key, _)| key.clone())
            .collect();

        changed.extend(
            other.values.keys().filter(|key| !self.values.contains_key(*key)).cloned(),
        );
        changed.sort();
        changed
    }
}

/// Settings of a single namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSection {
    namespace: String,
    values: BTreeMap<String, Value>,
}

impl ConfigurationSection {
    /// The namespace this section was read from.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether `key` is set.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Read `key`, falling back to `default` when it is absent or has the
    /// wrong type.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.values.get(key) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                tracing::debug!(namespace = %self.namespace, key, error = %e, "setting has unexpected type");
                default
            }),
            None => default,
        }
    }
}
