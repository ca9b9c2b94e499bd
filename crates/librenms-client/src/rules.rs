//! Rule trees for dynamic device groups and alert rules
//!
//! LibreNMS stores query-builder rules as an opaque JSON blob. A tree is a
//! [`RuleContainer`] whose nodes are either groups (a join `condition` plus
//! child rules) or leaves (`field`, `type`, `input`, `operator`, `value`).
//! The API accepts a node carrying both; [`Rule::is_well_formed`] reports it
//! but nothing here rejects it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Join condition of a group node
pub const CONDITION_AND: &str = "AND";
/// Join condition of a group node
pub const CONDITION_OR: &str = "OR";

/// Top-level rule tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContainer {
    /// `AND` or `OR`
    #[serde(default)]
    pub condition: String,
    /// Table joins required by the rules; usually empty
    #[serde(default)]
    pub joins: Vec<Vec<String>>,
    /// Child nodes
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Advisory validity flag from the query builder
    #[serde(default)]
    pub valid: bool,
}

impl RuleContainer {
    /// Tree joining `rules` with `condition`, marked valid
    #[must_use]
    pub fn new(condition: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            condition: condition.into(),
            joins: Vec::new(),
            rules,
            valid: true,
        }
    }

    /// Serialize to the string LibreNMS expects in a `rules`/`builder` field
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored rule blob
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether every node in the tree is either a group or a leaf, not both
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.rules.is_empty() && self.rules.iter().all(Rule::is_well_formed)
    }
}

/// One node of a rule tree
///
/// Empty attributes are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Query-builder filter ID, normally equal to `field`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Join condition (group nodes)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    /// Column, e.g. `devices.sysDescr` (leaf nodes)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    /// Input widget, e.g. `text` (leaf nodes)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub input: String,
    /// Comparison operator, e.g. `contains` (leaf nodes)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator: String,
    /// Child nodes (group nodes)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Value type, e.g. `string` (leaf nodes)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub value_type: String,
    /// Comparison value (leaf nodes)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl Rule {
    /// Leaf comparing `field` against `value`; `id` is set to `field`
    #[must_use]
    pub fn leaf(
        field: impl Into<String>,
        value_type: impl Into<String>,
        input: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let field = field.into();
        Self {
            id: field.clone(),
            field,
            value_type: value_type.into(),
            input: input.into(),
            operator: operator.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Group joining `rules` with `condition`
    #[must_use]
    pub fn group(condition: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            condition: condition.into(),
            rules,
            ..Self::default()
        }
    }

    /// Whether this node has children
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Whether any leaf attribute is populated
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !(self.field.is_empty()
            && self.operator.is_empty()
            && self.input.is_empty()
            && self.value_type.is_empty()
            && self.value.is_empty())
    }

    /// Group XOR leaf, recursively
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match (self.is_group(), self.is_leaf()) {
            (true, false) => self.rules.iter().all(Rule::is_well_formed),
            (false, true) => true,
            _ => false,
        }
    }
}
