//! LibreNMS REST API Client
//!
//! A Rust client library for the LibreNMS v0 REST API.
//! Provides typed models and methods for devices, device groups, locations,
//! services, alerts and alert rules.
//!
//! # Example
//!
//! ```no_run
//! use librenms_client::{
//!     DeviceUpdateRequest, LibreNmsClient, LocationUpdateRequest, Rule, RuleContainer,
//!     DeviceGroupCreateRequest, CONDITION_AND,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = LibreNmsClient::new("https://librenms.example.com/", "your-api-token")?;
//!
//! // Look up a device by hostname
//! let devices = client.get_device("web01").await?;
//!
//! // Only the fields that are set are sent
//! let update = DeviceUpdateRequest::new().set_ignore(false).set_notes("rack 4");
//! client.update_device("web01", &update).await?;
//!
//! let update = LocationUpdateRequest::new().set_latitude(37.5);
//! client.update_location(3, &update).await?;
//!
//! // Dynamic device group from a rule tree
//! let rules = RuleContainer::new(
//!     CONDITION_AND,
//!     vec![Rule::leaf("devices.os", "string", "text", "equal", "linux")],
//! );
//! let group = DeviceGroupCreateRequest::new("linux", "dynamic").set_rules(&rules)?;
//! let created = client.create_device_group(&group).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Flexible decoding**: booleans sent as `true` or `1`, floats sent as
//!   numbers or strings
//! - **Partial updates**: only explicitly set fields reach the wire
//! - **Normalized collections**: nested service lists are flattened and
//!   single-item lookups are filtered client-side
//! - **Pluggable transport**: the default is reqwest; tests can inject
//!   [`MockTransport`] (feature `test-util`)

pub mod client;
pub mod common;
pub mod error;
pub mod flexible;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
pub mod normalize;
pub mod payload;
pub mod rules;

#[cfg(test)]
mod flexible_test;
#[cfg(test)]
mod payload_test;
#[cfg(test)]
mod rules_test;

pub use client::{ClientBuilder, LibreNmsClient};
pub use common::HttpClient;
pub use common::query::{QueryParams, ToQuery};
pub use common::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use error::{BoxError, LibreNmsError, Result};
pub use flexible::{FlexBool, FlexFloat};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
pub use models::*;
pub use normalize::{Identified, filter_to_id, filter_to_one, flatten_one_level};
pub use payload::{FieldData, PartialUpdate, Payload, WireValue};
pub use rules::{CONDITION_AND, CONDITION_OR, Rule, RuleContainer};
