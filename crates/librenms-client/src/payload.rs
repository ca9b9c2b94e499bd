//! Partial-update payloads
//!
//! LibreNMS treats an absent key and a key set to `0`, `""` or `false` as
//! different requests, and rejects patches of unchanged fields with a 500.
//! Update requests therefore never go through `skip_serializing_if`-style
//! struct serialization: each request records which attributes were set and
//! converts them into a [`Payload`] right before the call is made.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::flexible::{FlexBool, FlexFloat};

/// A single wire value inside a [`Payload`]
///
/// Booleans and floats go through the flexible codecs, so `false` is sent as
/// `0` rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    /// Encoded as `1`/`0`
    Bool(FlexBool),
    /// Plain integer
    Int(i64),
    /// Exponent-free decimal number
    Float(FlexFloat),
    /// JSON string
    Text(String),
    /// List of integer IDs
    IntList(Vec<i64>),
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(FlexBool(value))
    }
}

impl From<FlexBool> for WireValue {
    fn from(value: FlexBool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for WireValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        Self::Float(FlexFloat(value))
    }
}

impl From<FlexFloat> for WireValue {
    fn from(value: FlexFloat) -> Self {
        Self::Float(value)
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<i64>> for WireValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntList(value)
    }
}

/// Mapping from wire field name to value, holding only explicitly set fields
///
/// Serializes as a flat JSON object. Built once per request and not
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload {
    fields: BTreeMap<String, WireValue>,
}

impl Payload {
    /// Empty payload
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field` with `value`
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<WireValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Add `field` only when `value` is set
    pub fn insert_set<V>(&mut self, field: &str, value: Option<&V>)
    where
        V: Clone + Into<WireValue>,
    {
        if let Some(value) = value {
            self.insert(field, value.clone());
        }
    }

    /// Value recorded for `field`
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&WireValue> {
        self.fields.get(field)
    }

    /// Whether `field` is present
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of set fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in key order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Convert into the parallel-array shape used by `PATCH devices/:id`
    #[must_use]
    pub fn into_field_data(self) -> FieldData {
        let (field, data) = self.fields.into_iter().unzip();
        FieldData { field, data }
    }
}

/// `{"field": [...], "data": [...]}` payload; `data[i]` is the value of `field[i]`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldData {
    /// Wire names of the fields to update
    pub field: Vec<String>,
    /// New values, index-aligned with `field`
    pub data: Vec<WireValue>,
}

/// Requests that are sent as a partial update
pub trait PartialUpdate {
    /// Only the attributes that were explicitly set, keyed by wire name
    fn payload(&self) -> Payload;

    /// Whether nothing was set
    fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }
}
