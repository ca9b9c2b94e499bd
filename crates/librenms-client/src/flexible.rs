//! Scalar codecs for fields LibreNMS encodes inconsistently
//!
//! The same logical field can arrive as `true` from one endpoint and `1` from
//! another (`/devices` vs `/devices/:id`), and some coordinates arrive as
//! `"37.5"` rather than `37.5`. [`FlexBool`] and [`FlexFloat`] accept every
//! observed representation and always emit a single canonical one.

use std::fmt;
use std::ops::Deref;

use serde::de::{self, Visitor};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

/// Boolean that decodes from `true`/`false` or an integer and encodes as `1`/`0`
///
/// Any non-zero integer decodes as `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlexBool(pub bool);

impl FlexBool {
    /// The wrapped value
    #[must_use]
    pub fn get(self) -> bool {
        self.0
    }

    /// Wire integer for this value
    #[must_use]
    pub fn as_wire(self) -> u8 {
        u8::from(self.0)
    }
}

impl From<bool> for FlexBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<FlexBool> for bool {
    fn from(value: FlexBool) -> Self {
        value.0
    }
}

impl Deref for FlexBool {
    type Target = bool;

    fn deref(&self) -> &bool {
        &self.0
    }
}

impl fmt::Display for FlexBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for FlexBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_wire())
    }
}

struct FlexBoolVisitor;

impl Visitor<'_> for FlexBoolVisitor {
    type Value = FlexBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or an integer (0/1)")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<FlexBool, E> {
        Ok(FlexBool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FlexBool, E> {
        Ok(FlexBool(value != 0))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FlexBool, E> {
        Ok(FlexBool(value != 0))
    }
}

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexBoolVisitor)
    }
}

/// 64-bit float that decodes from a JSON number or a numeric string
///
/// Encodes as a plain decimal number literal: shortest digits that round-trip,
/// no exponent, no trailing zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct FlexFloat(pub f64);

impl FlexFloat {
    /// The wrapped value
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Decimal text emitted on the wire
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        // f64's Display is the shortest round-trip form and never uses an exponent
        format!("{}", self.0)
    }
}

impl From<f64> for FlexFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<FlexFloat> for f64 {
    fn from(value: FlexFloat) -> Self {
        value.0
    }
}

impl Deref for FlexFloat {
    type Target = f64;

    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for FlexFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for FlexFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return Err(S::Error::custom(format!(
                "cannot encode non-finite float {} as JSON",
                self.0
            )));
        }
        let raw = RawValue::from_string(self.to_decimal_string()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

struct FlexFloatVisitor;

impl Visitor<'_> for FlexFloatVisitor {
    type Value = FlexFloat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(value))
    }

    #[allow(clippy::cast_precision_loss, reason = "coordinates sent as integers are well inside the exact f64 range")]
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(value as f64))
    }

    #[allow(clippy::cast_precision_loss, reason = "coordinates sent as integers are well inside the exact f64 range")]
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FlexFloat, E> {
        Ok(FlexFloat(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FlexFloat, E> {
        value
            .parse::<f64>()
            .map(FlexFloat)
            .map_err(|e| E::custom(format!("failed to parse float from string {value:?}: {e}")))
    }
}

impl<'de> Deserialize<'de> for FlexFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexFloatVisitor)
    }
}

/// Decode `null` as the field type's default
///
/// LibreNMS sends `null` for unset columns that the models expose as plain
/// values (`hardware`, `sysName`, ...).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
