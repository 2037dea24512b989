/*
[INPUT]:  Header names and values supplied by builders and callers
[OUTPUT]: Case-insensitive multi-valued header collection
[POS]:    Request layer - header bookkeeping
[UPDATE]: When header merge rules change
*/

use std::collections::{BTreeMap, BTreeSet};

/// Request headers keyed by lowercase name, each holding a set of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, keeping any values already present for the name
    pub fn add(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let key = normalize(name.as_ref());
        if key.is_empty() {
            return;
        }
        self.entries.entry(key).or_default().insert(value.into());
    }

    /// Add a value only when the header is absent.
    ///
    /// Returns `true` when the value was stored.
    pub fn try_add(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> bool {
        let key = normalize(name.as_ref());
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.entry(key).or_default().insert(value.into());
        true
    }

    /// Merge every value of `other` into this collection
    pub fn add_all(&mut self, other: &RequestHeaders) {
        for (name, values) in &other.entries {
            let slot = self.entries.entry(name.clone()).or_default();
            slot.extend(values.iter().cloned());
        }
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(&normalize(name))
    }

    /// First value of a header, if any
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.iter().next())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<BTreeSet<String>> {
        self.entries.remove(&normalize(name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_insensitive() {
        let mut headers = RequestHeaders::new();
        headers.add("ConsistencyLevel", "eventual");

        assert!(headers.contains("consistencylevel"));
        assert_eq!(headers.first("CONSISTENCYLEVEL"), Some("eventual"));
    }

    #[test]
    fn test_try_add_keeps_existing_value() {
        let mut headers = RequestHeaders::new();
        headers.add("Accept", "text/csv");

        assert!(!headers.try_add("accept", "application/json"));
        assert_eq!(headers.first("Accept"), Some("text/csv"));
        assert!(headers.try_add("Prefer", "return=minimal"));
    }

    #[test]
    fn test_add_all_merges_values() {
        let mut base = RequestHeaders::new();
        base.add("Prefer", "odata.maxpagesize=10");

        let mut extra = RequestHeaders::new();
        extra.add("prefer", "return=minimal");
        extra.add("client-request-id", "abc");

        base.add_all(&extra);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get("Prefer").map(|values| values.len()), Some(2));
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let mut headers = RequestHeaders::new();
        headers.add("  ", "value");
        assert!(!headers.try_add("", "value"));
        assert!(headers.is_empty());
    }
}
