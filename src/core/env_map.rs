//! The variable map shared by every pipeline stage

use serde::Serialize;
use std::collections::BTreeMap;

/// A variable value together with its expansion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvValue {
    /// Decoded value
    pub value: String,
    /// Whether the value is final and must not be expanded again.
    /// Set for single- and backtick-quoted values, and for double-quoted
    /// values that were already expanded while parsing.
    pub settled: bool,
}

/// Variables keyed by name, iterated in ascending key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvMap {
    vars: BTreeMap<String, EnvValue>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value that later expansion passes may still rewrite
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_value(key, value, false);
    }

    /// Insert a value that is already final
    pub fn insert_settled(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_value(key, value, true);
    }

    /// Insert a value with an explicit `settled` state
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<String>, settled: bool) {
        self.vars.insert(
            key.into(),
            EnvValue {
                value: value.into(),
                settled,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.value.as_str())
    }

    pub fn is_settled(&self, key: &str) -> bool {
        self.vars.get(key).is_some_and(|v| v.settled)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.value.as_str()))
    }
}

impl IntoIterator for EnvMap {
    type Item = (String, EnvValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, EnvValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_sorted() {
        let map: EnvMap = [("b", "2"), ("A", "1"), ("a", "3")].into_iter().collect();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["A", "a", "b"]);
    }

    #[test]
    fn test_insert_replaces_value_and_state() {
        let mut map = EnvMap::new();
        map.insert_settled("KEY", "literal");
        assert!(map.is_settled("KEY"));

        map.insert("KEY", "plain");
        assert_eq!(map.get("KEY"), Some("plain"));
        assert!(!map.is_settled("KEY"));
        assert_eq!(map.len(), 1);
    }
}
