//! LibreNMS API models
//!
//! These models match the JSON returned by the LibreNMS v0 API.
//! See: https://docs.librenms.org/API/
//!
//! Fields LibreNMS may send as `null` are `Option`s. Booleans that some
//! endpoints send as `0`/`1` use [`FlexBool`]; coordinates that some
//! endpoints send as strings use [`FlexFloat`].

use serde::{Deserialize, Serialize};

use crate::common::query::{QueryParams, ToQuery};
use crate::error::Result;
use crate::flexible::{FlexBool, FlexFloat, nullable};
use crate::normalize::Identified;
use crate::payload::{Payload, PartialUpdate, WireValue};
use crate::rules::RuleContainer;

/// Device list value meaning "all devices" for alert rules
pub const ALL_DEVICES: i64 = -1;

/// Status/message/count wrapper common to every LibreNMS response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    /// `ok` on success, `error` otherwise
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    /// Human-readable detail; empty on plain success
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    /// Number of items in the attached collection
    #[serde(deserialize_with = "nullable")]
    pub count: usize,
}

impl Envelope {
    /// Copy of this envelope with `count` replaced
    #[must_use]
    pub fn with_count(&self, count: usize) -> Self {
        Self {
            status: self.status.clone(),
            message: self.message.clone(),
            count,
        }
    }

    /// Whether LibreNMS reported `ok`
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// Devices

/// Device model (from `/devices`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    #[serde(deserialize_with = "nullable")]
    pub device_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub agent_uptime: i64,
    #[serde(rename = "authalgo")]
    pub auth_algorithm: Option<String>,
    #[serde(rename = "authlevel")]
    pub auth_level: Option<String>,
    #[serde(rename = "authname")]
    pub auth_name: Option<String>,
    #[serde(rename = "authpass")]
    pub auth_pass: Option<String>,
    #[serde(rename = "bgpLocalAs")]
    pub bgp_local_as: Option<i64>,
    pub community: Option<String>,
    #[serde(rename = "cryptoalgo")]
    pub crypto_algorithm: Option<String>,
    #[serde(rename = "cryptopass")]
    pub crypto_pass: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub disable_notify: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub disabled: FlexBool,
    pub display: Option<String>,
    pub features: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub hardware: String,
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub ignore: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub ignore_status: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub inserted: String,
    #[serde(deserialize_with = "nullable")]
    pub ip: String,
    pub last_discovered: Option<String>,
    #[serde(rename = "last_discovered_timetaken", deserialize_with = "nullable")]
    pub last_discovered_time_taken: FlexFloat,
    pub last_ping: Option<String>,
    #[serde(rename = "last_ping_timetaken", deserialize_with = "nullable")]
    pub last_ping_time_taken: FlexFloat,
    pub last_poll_attempted: Option<String>,
    pub last_polled: Option<String>,
    #[serde(rename = "last_polled_timetaken", deserialize_with = "nullable")]
    pub last_polled_time_taken: FlexFloat,
    #[serde(rename = "lat")]
    pub latitude: Option<FlexFloat>,
    #[serde(rename = "lng")]
    pub longitude: Option<FlexFloat>,
    pub location: Option<String>,
    pub location_id: Option<i64>,
    pub max_depth: Option<i64>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub os: String,
    #[serde(rename = "override_sysLocation", deserialize_with = "nullable")]
    pub override_sys_location: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub overwrite_ip: String,
    #[serde(deserialize_with = "nullable")]
    pub poller_group: i64,
    #[serde(deserialize_with = "nullable")]
    pub port: i64,
    #[serde(deserialize_with = "nullable")]
    pub port_association_mode: i64,
    pub purpose: Option<String>,
    pub retries: Option<i64>,
    pub serial: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub snmp_disable: FlexBool,
    #[serde(rename = "snmpver", deserialize_with = "nullable")]
    pub snmp_version: String,
    /// `/devices` sends 0/1, `/devices/:id` sends true/false
    #[serde(deserialize_with = "nullable")]
    pub status: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub status_reason: String,
    #[serde(rename = "sysContact")]
    pub sys_contact: Option<String>,
    #[serde(rename = "sysDescr")]
    pub sys_descr: Option<String>,
    #[serde(rename = "sysName", deserialize_with = "nullable")]
    pub sys_name: String,
    #[serde(rename = "sysObjectID")]
    pub sys_object_id: Option<String>,
    pub timeout: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub transport: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub device_type: String,
    pub uptime: Option<i64>,
    pub version: Option<String>,
}

/// Request body for `POST /devices`
///
/// Only `hostname` is required; unset fields are left to LibreNMS defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceCreateRequest {
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(rename = "override_sysLocation", skip_serializing_if = "Option::is_none")]
    pub override_sys_location: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poller_group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    /// ifIndex(1), ifName(2), ifDescr(3), ifAlias(4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_association_mode: Option<i64>,
    /// MD5, SHA, SHA-224, SHA-256, SHA-384, SHA-512
    #[serde(rename = "authalgo", skip_serializing_if = "Option::is_none")]
    pub snmp_auth_algorithm: Option<String>,
    /// noAuthNoPriv, authNoPriv, authPriv
    #[serde(rename = "authlevel", skip_serializing_if = "Option::is_none")]
    pub snmp_auth_level: Option<String>,
    #[serde(rename = "authname", skip_serializing_if = "Option::is_none")]
    pub snmp_auth_name: Option<String>,
    #[serde(rename = "authpass", skip_serializing_if = "Option::is_none")]
    pub snmp_auth_pass: Option<String>,
    /// DES, AES, AES-192, AES-256, AES-256-C
    #[serde(rename = "cryptoalgo", skip_serializing_if = "Option::is_none")]
    pub snmp_crypto_algorithm: Option<String>,
    #[serde(rename = "cryptopass", skip_serializing_if = "Option::is_none")]
    pub snmp_crypto_pass: Option<String>,
    #[serde(rename = "community", skip_serializing_if = "Option::is_none")]
    pub snmp_community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_disable: Option<bool>,
    /// v1, v2c, v3
    #[serde(rename = "snmpver", skip_serializing_if = "Option::is_none")]
    pub snmp_version: Option<String>,
    #[serde(rename = "sysName", skip_serializing_if = "Option::is_none")]
    pub sys_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

impl DeviceCreateRequest {
    /// Request adding `hostname` (name or IP)
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }
}

/// Partial update for `PATCH /devices/:id`
///
/// Sent as the parallel-array shape `{"field": [...], "data": [...]}`.
/// Columns without a typed setter can be set through [`Self::set_field`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceUpdateRequest {
    pub display: Option<String>,
    pub disabled: Option<bool>,
    pub disable_notify: Option<bool>,
    pub hardware: Option<String>,
    pub ignore: Option<bool>,
    pub location_id: Option<i64>,
    pub notes: Option<String>,
    pub os: Option<String>,
    pub override_sys_location: Option<bool>,
    pub overwrite_ip: Option<String>,
    pub poller_group: Option<i64>,
    pub port: Option<i64>,
    pub port_association_mode: Option<i64>,
    pub purpose: Option<String>,
    pub serial: Option<String>,
    pub snmp_community: Option<String>,
    pub snmp_version: Option<String>,
    pub sys_name: Option<String>,
    pub transport: Option<String>,
    extra: Payload,
}

impl DeviceUpdateRequest {
    /// Empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    #[must_use]
    pub fn set_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    #[must_use]
    pub fn set_disable_notify(mut self, disable_notify: bool) -> Self {
        self.disable_notify = Some(disable_notify);
        self
    }

    #[must_use]
    pub fn set_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = Some(hardware.into());
        self
    }

    #[must_use]
    pub fn set_ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    #[must_use]
    pub fn set_location_id(mut self, location_id: i64) -> Self {
        self.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub fn set_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn set_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    #[must_use]
    pub fn set_override_sys_location(mut self, override_sys_location: bool) -> Self {
        self.override_sys_location = Some(override_sys_location);
        self
    }

    #[must_use]
    pub fn set_overwrite_ip(mut self, overwrite_ip: impl Into<String>) -> Self {
        self.overwrite_ip = Some(overwrite_ip.into());
        self
    }

    #[must_use]
    pub fn set_poller_group(mut self, poller_group: i64) -> Self {
        self.poller_group = Some(poller_group);
        self
    }

    #[must_use]
    pub fn set_port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn set_port_association_mode(mut self, mode: i64) -> Self {
        self.port_association_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn set_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    #[must_use]
    pub fn set_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    #[must_use]
    pub fn set_snmp_community(mut self, community: impl Into<String>) -> Self {
        self.snmp_community = Some(community.into());
        self
    }

    #[must_use]
    pub fn set_snmp_version(mut self, version: impl Into<String>) -> Self {
        self.snmp_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn set_sys_name(mut self, sys_name: impl Into<String>) -> Self {
        self.sys_name = Some(sys_name.into());
        self
    }

    #[must_use]
    pub fn set_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Set an arbitrary device column by its wire name
    #[must_use]
    pub fn set_field(mut self, field: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.extra.insert(field, value);
        self
    }
}

impl PartialUpdate for DeviceUpdateRequest {
    fn payload(&self) -> Payload {
        let mut payload = self.extra.clone();
        payload.insert_set("display", self.display.as_ref());
        payload.insert_set("disabled", self.disabled.as_ref());
        payload.insert_set("disable_notify", self.disable_notify.as_ref());
        payload.insert_set("hardware", self.hardware.as_ref());
        payload.insert_set("ignore", self.ignore.as_ref());
        payload.insert_set("location_id", self.location_id.as_ref());
        payload.insert_set("notes", self.notes.as_ref());
        payload.insert_set("os", self.os.as_ref());
        payload.insert_set("override_sysLocation", self.override_sys_location.as_ref());
        payload.insert_set("overwrite_ip", self.overwrite_ip.as_ref());
        payload.insert_set("poller_group", self.poller_group.as_ref());
        payload.insert_set("port", self.port.as_ref());
        payload.insert_set("port_association_mode", self.port_association_mode.as_ref());
        payload.insert_set("purpose", self.purpose.as_ref());
        payload.insert_set("serial", self.serial.as_ref());
        payload.insert_set("community", self.snmp_community.as_ref());
        payload.insert_set("snmpver", self.snmp_version.as_ref());
        payload.insert_set("sysName", self.sys_name.as_ref());
        payload.insert_set("transport", self.transport.as_ref());
        payload
    }
}

/// Filters for `GET /devices`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicesQuery {
    pub device_id: Option<i64>,
    pub display: Option<String>,
    pub hostname: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub location: Option<String>,
    pub location_id: Option<i64>,
    pub mac: Option<String>,
    pub order: Option<String>,
    pub os: Option<String>,
    pub sys_name: Option<String>,
    pub device_type: Option<String>,
}

impl DevicesQuery {
    /// Query without filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    #[must_use]
    pub fn set_location_id(mut self, location_id: i64) -> Self {
        self.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub fn set_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    #[must_use]
    pub fn set_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub fn set_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }
}

impl ToQuery for DevicesQuery {
    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_set("device_id", self.device_id.as_ref());
        query.push_set("display", self.display.as_ref());
        query.push_set("hostname", self.hostname.as_ref());
        query.push_set("ipv4", self.ipv4.as_ref());
        query.push_set("ipv6", self.ipv6.as_ref());
        query.push_set("location", self.location.as_ref());
        query.push_set("location_id", self.location_id.as_ref());
        query.push_set("mac", self.mac.as_ref());
        query.push_set("order", self.order.as_ref());
        query.push_set("os", self.os.as_ref());
        query.push_set("sysName", self.sys_name.as_ref());
        query.push_set("type", self.device_type.as_ref());
        query
    }
}

/// Response carrying a list of devices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub devices: Vec<Device>,
}

// Device groups

/// Device group model (from `/devicegroups`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceGroup {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub pattern: Option<String>,
    /// Rule tree of a dynamic group; `None` for static groups
    pub rules: Option<RuleContainer>,
    /// `dynamic` or `static`
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub group_type: String,
}

impl Identified for DeviceGroup {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Request body for `POST /devicegroups`
///
/// `rules` is the serialized [`RuleContainer`]; see [`Self::set_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceGroupCreateRequest {
    pub name: String,
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Members of a static group
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    /// `dynamic` or `static`
    #[serde(rename = "type")]
    pub group_type: String,
}

impl DeviceGroupCreateRequest {
    /// Request for a group called `name` of `group_type`
    #[must_use]
    pub fn new(name: impl Into<String>, group_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group_type: group_type.into(),
            ..Self::default()
        }
    }

    /// Attach a rule tree, serialized
    pub fn set_rules(mut self, rules: &RuleContainer) -> Result<Self> {
        self.rules = Some(rules.to_json()?);
        Ok(self)
    }
}

/// Partial update for `PATCH /devicegroups/:name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceGroupUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub devices: Option<Vec<i64>>,
    /// Serialized [`RuleContainer`]
    pub rules: Option<String>,
    pub group_type: Option<String>,
}

impl DeviceGroupUpdateRequest {
    /// Empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn set_devices(mut self, devices: Vec<i64>) -> Self {
        self.devices = Some(devices);
        self
    }

    /// Replace the rule tree, serialized
    pub fn set_rules(mut self, rules: &RuleContainer) -> Result<Self> {
        self.rules = Some(rules.to_json()?);
        Ok(self)
    }

    #[must_use]
    pub fn set_group_type(mut self, group_type: impl Into<String>) -> Self {
        self.group_type = Some(group_type.into());
        self
    }
}

impl PartialUpdate for DeviceGroupUpdateRequest {
    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert_set("name", self.name.as_ref());
        payload.insert_set("desc", self.description.as_ref());
        payload.insert_set("devices", self.devices.as_ref());
        payload.insert_set("rules", self.rules.as_ref());
        payload.insert_set("type", self.group_type.as_ref());
        payload
    }
}

/// Response carrying a list of device groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroupResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub groups: Vec<DeviceGroup>,
}

/// Response to `POST /devicegroups`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroupCreateResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// ID of the new group
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
}

// Locations

/// Location model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub fixed_coordinates: FlexBool,
    #[serde(rename = "lat", deserialize_with = "nullable")]
    pub latitude: FlexFloat,
    #[serde(rename = "lng", deserialize_with = "nullable")]
    pub longitude: FlexFloat,
    #[serde(rename = "location", deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub timestamp: String,
}

/// Request body for `POST /locations`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationCreateRequest {
    #[serde(rename = "location")]
    pub name: String,
    pub fixed_coordinates: FlexBool,
    #[serde(rename = "lat")]
    pub latitude: FlexFloat,
    #[serde(rename = "lng")]
    pub longitude: FlexFloat,
}

impl LocationCreateRequest {
    /// Location `name` at the given coordinates
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            fixed_coordinates: FlexBool(false),
            latitude: FlexFloat(latitude),
            longitude: FlexFloat(longitude),
        }
    }
}

/// Partial update for `PATCH /locations/:id`
///
/// Only set the fields that change: LibreNMS answers 500 when asked to patch
/// a field to its current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationUpdateRequest {
    pub name: Option<String>,
    pub fixed_coordinates: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationUpdateRequest {
    /// Empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn set_fixed_coordinates(mut self, fixed: bool) -> Self {
        self.fixed_coordinates = Some(fixed);
        self
    }

    #[must_use]
    pub fn set_latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn set_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }
}

impl PartialUpdate for LocationUpdateRequest {
    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert_set("location", self.name.as_ref());
        payload.insert_set("fixed_coordinates", self.fixed_coordinates.as_ref());
        payload.insert_set("lat", self.latitude.as_ref());
        payload.insert_set("lng", self.longitude.as_ref());
        payload
    }
}

/// Response to `GET /location/:id`, a single object rather than a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "get_location", default, deserialize_with = "nullable")]
    pub location: Location,
}

/// Response carrying a list of locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub locations: Vec<Location>,
}

// Services

/// Service check model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(rename = "service_id", deserialize_with = "nullable")]
    pub id: i64,
    #[serde(rename = "service_changed", deserialize_with = "nullable")]
    pub changed: i64,
    #[serde(rename = "service_desc", deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub device_id: i64,
    #[serde(rename = "service_disabled", deserialize_with = "nullable")]
    pub disabled: FlexBool,
    #[serde(rename = "service_ds", deserialize_with = "nullable")]
    pub ds: String,
    #[serde(rename = "service_ignore", deserialize_with = "nullable")]
    pub ignore: FlexBool,
    #[serde(rename = "service_ip", deserialize_with = "nullable")]
    pub ip: String,
    #[serde(rename = "service_message", deserialize_with = "nullable")]
    pub message: String,
    #[serde(rename = "service_name", deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "service_param", deserialize_with = "nullable")]
    pub param: String,
    /// Nagios convention: 0 ok, 1 warning, 2 critical, 3 unknown
    #[serde(rename = "service_status", deserialize_with = "nullable")]
    pub status: i64,
    #[serde(rename = "service_template_id", deserialize_with = "nullable")]
    pub template_id: i64,
    #[serde(rename = "service_type", deserialize_with = "nullable")]
    pub service_type: String,
}

impl Identified for Service {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Request body for `POST /services/:device`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<FlexBool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Nagios check name, e.g. `http`, `icmp`
    #[serde(rename = "type")]
    pub service_type: String,
}

impl ServiceCreateRequest {
    /// Service running the `service_type` check
    #[must_use]
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Self::default()
        }
    }
}

/// Partial update for `PATCH /services/:id`
///
/// Only set the fields that change: LibreNMS answers 500 when asked to patch
/// a field to its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub ignore: Option<bool>,
    pub param: Option<String>,
    pub service_type: Option<String>,
}

impl ServiceUpdateRequest {
    /// Empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn set_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn set_ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    #[must_use]
    pub fn set_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    #[must_use]
    pub fn set_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }
}

impl PartialUpdate for ServiceUpdateRequest {
    fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert_set("service_name", self.name.as_ref());
        payload.insert_set("service_desc", self.description.as_ref());
        payload.insert_set("service_ip", self.ip.as_ref());
        payload.insert_set("service_ignore", self.ignore.as_ref());
        payload.insert_set("service_param", self.param.as_ref());
        payload.insert_set("service_type", self.service_type.as_ref());
        payload
    }
}

/// Response carrying a flat list of services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<Service>,
}

/// `/services` as sent on the wire: a list of lists, of which only the first
/// is ever populated
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NestedServiceResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<Vec<Service>>,
}

// Alerts

/// Alert model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub alerted: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub device_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub info: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub note: Option<String>,
    pub notes: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub open: FlexBool,
    #[serde(rename = "proc")]
    pub procedure_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub rule_id: i64,
    /// `ok`, `warning` or `critical`
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
    /// 0 ok, 1 alert, 2 acknowledged
    #[serde(deserialize_with = "nullable")]
    pub state: i64,
    #[serde(deserialize_with = "nullable")]
    pub timestamp: String,
}

/// Request body for `PUT /alerts/:id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertAckRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When false the alert fires again if it gets worse, better or changes
    pub until_clear: bool,
}

/// Filters for `GET /alerts`; only set fields are sent, so `state = 0` works
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertsQuery {
    pub order: Option<String>,
    pub rule_id: Option<i64>,
    /// `ok`, `warning` or `critical`
    pub severity: Option<String>,
    /// 0 ok, 1 alert, 2 acknowledged
    pub state: Option<i64>,
}

impl AlertsQuery {
    /// Query without filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    #[must_use]
    pub fn set_rule_id(mut self, rule_id: i64) -> Self {
        self.rule_id = Some(rule_id);
        self
    }

    #[must_use]
    pub fn set_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    #[must_use]
    pub fn set_state(mut self, state: i64) -> Self {
        self.state = Some(state);
        self
    }
}

impl ToQuery for AlertsQuery {
    fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_set("order", self.order.as_ref());
        query.push_set("alert_rule", self.rule_id.as_ref());
        query.push_set("severity", self.severity.as_ref());
        query.push_set("state", self.state.as_ref());
        query
    }
}

/// Response carrying a list of alerts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertsResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub alerts: Vec<Alert>,
}

// Alert rules

/// Alert rule model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRule {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,
    /// Serialized [`RuleContainer`]
    #[serde(deserialize_with = "nullable")]
    pub builder: String,
    #[serde(deserialize_with = "nullable")]
    pub devices: Vec<i64>,
    #[serde(deserialize_with = "nullable")]
    pub disabled: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub extra: String,
    #[serde(deserialize_with = "nullable")]
    pub groups: Vec<i64>,
    #[serde(deserialize_with = "nullable")]
    pub invert_map: FlexBool,
    #[serde(deserialize_with = "nullable")]
    pub locations: Vec<i64>,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub notes: Option<String>,
    #[serde(rename = "proc")]
    pub procedure_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub query: String,
    #[serde(deserialize_with = "nullable")]
    pub rule: String,
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
}

impl AlertRule {
    /// Parse the `builder` blob into a rule tree
    pub fn builder_tree(&self) -> Result<RuleContainer> {
        RuleContainer::from_json(&self.builder)
    }
}

/// Request body for `POST /rules`
///
/// `groups` and `locations` may be empty. An empty `devices` list is sent as
/// `[-1]`, which LibreNMS reads as "all devices".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertRuleCreateRequest {
    /// Serialized [`RuleContainer`]; see [`Self::set_builder`]
    pub builder: String,
    /// Max alerts (UI "Max alerts")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    pub devices: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<FlexBool>,
    pub groups: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    pub locations: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "proc", skip_serializing_if = "Option::is_none")]
    pub procedure_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// `ok`, `warning` or `critical`
    pub severity: String,
}

impl AlertRuleCreateRequest {
    /// Rule `name` raising alerts of `severity`
    #[must_use]
    pub fn new(name: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity: severity.into(),
            ..Self::default()
        }
    }

    /// Attach a rule tree as the `builder` blob
    pub fn set_builder(mut self, builder: &RuleContainer) -> Result<Self> {
        self.builder = builder.to_json()?;
        Ok(self)
    }

    /// Copy of this request with an empty device list replaced by `[-1]`
    #[must_use]
    pub(crate) fn with_device_default(&self) -> Self {
        let mut request = self.clone();
        if request.devices.is_empty() {
            request.devices = vec![ALL_DEVICES];
        }
        request
    }
}

/// Request body for `PUT /rules`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertRuleUpdateRequest {
    #[serde(flatten)]
    pub rule: AlertRuleCreateRequest,
    /// ID of the rule being replaced; must be positive
    #[serde(rename = "rule_id")]
    pub id: i64,
}

impl AlertRuleUpdateRequest {
    /// Replace rule `id` with `rule`
    #[must_use]
    pub fn new(id: i64, rule: AlertRuleCreateRequest) -> Self {
        Self { rule, id }
    }
}

/// Response carrying a list of alert rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRuleResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "nullable")]
    pub rules: Vec<AlertRule>,
}
