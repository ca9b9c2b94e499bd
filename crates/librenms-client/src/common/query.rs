//! Query-string helpers

use std::collections::BTreeMap;

/// Query parameters, kept sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// No parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.params.insert(key.into(), value.to_string());
    }

    /// Set `key` only when `value` is present
    pub fn push_set<V: ToString>(&mut self, key: &str, value: Option<&V>) {
        if let Some(value) = value {
            self.push(key, value.to_string());
        }
    }

    /// Value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Percent-encoded `key=value` pairs joined by `&`, sorted by key
    #[must_use]
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Filters that turn into query parameters
pub trait ToQuery {
    /// Only the filters that were set
    fn query(&self) -> QueryParams;
}
