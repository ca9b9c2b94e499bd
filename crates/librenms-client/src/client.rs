//! LibreNMS API client
//!
//! Implements the LibreNMS v0 REST API for devices, device groups, locations,
//! services, alerts and alert rules.
//! See: https://docs.librenms.org/API/

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{Dispatch, Level};
use url::Url;

use crate::common::HttpClient;
use crate::common::query::ToQuery;
use crate::common::transport::{HttpMethod, ReqwestTransport, Transport};
use crate::error::{LibreNmsError, Result};
use crate::models::{
    AlertAckRequest, AlertRuleCreateRequest, AlertRuleResponse, AlertRuleUpdateRequest,
    AlertsQuery, AlertsResponse, DeviceCreateRequest, DeviceGroupCreateRequest,
    DeviceGroupCreateResponse, DeviceGroupResponse, DeviceGroupUpdateRequest, DeviceResponse,
    DeviceUpdateRequest, DevicesQuery, Envelope, LocationCreateRequest, LocationResponse,
    LocationUpdateRequest, LocationsResponse, NestedServiceResponse, ServiceCreateRequest,
    ServiceResponse, ServiceUpdateRequest,
};
use crate::normalize::{filter_to_id, filter_to_one, flatten_one_level};
use crate::payload::PartialUpdate;

/// Path of the API root below the base URL
pub const API_PATH: &str = "api/v0/";

/// Base URL used by [`ClientBuilder::from_env`] when `LIBRENMS_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Request timeout of the default transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEVICES: &str = "devices";
const DEVICE_GROUPS: &str = "devicegroups";
const LOCATIONS: &str = "locations";
const SERVICES: &str = "services";
const ALERTS: &str = "alerts";
const RULES: &str = "rules";

/// LibreNMS API client
///
/// Cheap to clone; clones share the transport.
#[derive(Debug, Clone)]
pub struct LibreNmsClient {
    http: HttpClient,
}

/// Configures and builds a [`LibreNmsClient`]
pub struct ClientBuilder {
    base_url: String,
    token: String,
    transport: Option<Arc<dyn Transport>>,
    http_client: Option<reqwest::Client>,
    timeout: Duration,
    dispatch: Option<Dispatch>,
}

impl ClientBuilder {
    /// Start a builder
    ///
    /// # Arguments
    /// * `base_url` - LibreNMS root URL, e.g. `https://librenms.example.com/`.
    ///   Must not carry a path; the trailing slash is optional.
    /// * `token` - API token, sent as `X-Auth-Token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            transport: None,
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
            dispatch: None,
        }
    }

    /// Builder configured from `LIBRENMS_URL` and `LIBRENMS_TOKEN`
    ///
    /// `LIBRENMS_URL` defaults to [`DEFAULT_BASE_URL`]; a missing
    /// `LIBRENMS_TOKEN` is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("LIBRENMS_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let token = lookup("LIBRENMS_TOKEN").ok_or_else(|| {
            LibreNmsError::InvalidRequest(
                "LIBRENMS_TOKEN environment variable is not set".to_owned(),
            )
        })?;
        Ok(Self::new(base_url, token))
    }

    /// Send requests through `transport` instead of the default reqwest one
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use an existing reqwest client for the default transport
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Per-request timeout of the default transport
    ///
    /// Ignored when a custom transport or reqwest client is supplied.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route the client's tracing events to `dispatch`
    #[must_use]
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Log the client's events to stderr at `level` and above
    ///
    /// Replaces any dispatcher set with [`Self::dispatch`].
    #[must_use]
    pub fn log_level(mut self, level: Level) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        self.dispatch = Some(Dispatch::new(subscriber));
        self
    }

    /// Validate the configuration and create the client
    pub fn build(self) -> Result<LibreNmsClient> {
        let api_root = api_root(&self.base_url)?;
        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::with_client(client)),
            (None, None) => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(LibreNmsClient {
            http: HttpClient::new(transport, api_root, self.token, self.dispatch),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("transport", &self.transport.is_some())
            .field("http_client", &self.http_client.is_some())
            .field("timeout", &self.timeout)
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}

/// Normalize `base_url` and resolve the API root below it
///
/// A missing trailing slash is added. Anything but a bare `http[s]://host[:port]/`
/// is rejected.
pub(crate) fn api_root(base_url: &str) -> Result<Url> {
    let invalid = |reason: String| LibreNmsError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };

    let normalized: Cow<'_, str> = if base_url.ends_with('/') {
        Cow::Borrowed(base_url)
    } else {
        Cow::Owned(format!("{base_url}/"))
    };
    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }
    if url.path() != "/" {
        return Err(invalid(format!("unexpected path '{}'", url.path())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_owned()));
    }

    url.join(API_PATH).map_err(|e| invalid(e.to_string()))
}

/// Percent-encode a caller-supplied identifier for use as one path segment
fn segment(identifier: &str) -> Cow<'_, str> {
    urlencoding::encode(identifier)
}

fn require_identifier(identifier: &str, operation: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(LibreNmsError::InvalidRequest(format!(
            "identifier is required for {operation}"
        )));
    }
    Ok(())
}

impl LibreNmsClient {
    /// Create a client with the default transport and no dispatcher
    ///
    /// # Arguments
    /// * `base_url` - LibreNMS root URL, e.g. `http://librenms:8000/`
    /// * `token` - API token for authentication
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(base_url, token).build()
    }

    /// Start configuring a client
    pub fn builder(base_url: impl Into<String>, token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url, token)
    }

    /// Get the API root URL (`<base>/api/v0/`)
    pub fn api_root(&self) -> &Url {
        self.http.api_root()
    }

    /// Get the underlying HTTP wrapper
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // Devices

    /// Add a device by hostname or IP
    pub async fn create_device(&self, request: &DeviceCreateRequest) -> Result<DeviceResponse> {
        self.http
            .send_json(HttpMethod::Post, &format!("{DEVICES}/"), request)
            .await
    }

    /// Delete a device by ID or hostname
    pub async fn delete_device(&self, identifier: &str) -> Result<DeviceResponse> {
        self.http
            .delete(&format!("{DEVICES}/{}", segment(identifier)))
            .await
    }

    /// Get a device by ID or hostname
    pub async fn get_device(&self, identifier: &str) -> Result<DeviceResponse> {
        self.http
            .get(&format!("{DEVICES}/{}", segment(identifier)), None)
            .await
    }

    /// List devices, optionally filtered
    pub async fn get_devices(&self, query: Option<&DevicesQuery>) -> Result<DeviceResponse> {
        let params = query.map(ToQuery::query);
        self.http.get(DEVICES, params.as_ref()).await
    }

    /// Update the set fields of a device
    ///
    /// # Arguments
    /// * `identifier` - Device ID or hostname
    /// * `request` - Fields to change; sent as `{"field": [...], "data": [...]}`
    pub async fn update_device(
        &self,
        identifier: &str,
        request: &DeviceUpdateRequest,
    ) -> Result<Envelope> {
        require_identifier(identifier, "update_device")?;
        let body = request.payload().into_field_data();
        self.http
            .send_json(
                HttpMethod::Patch,
                &format!("{DEVICES}/{}", segment(identifier)),
                &body,
            )
            .await
    }

    // Device groups

    /// Create a device group
    pub async fn create_device_group(
        &self,
        request: &DeviceGroupCreateRequest,
    ) -> Result<DeviceGroupCreateResponse> {
        self.http
            .send_json(HttpMethod::Post, DEVICE_GROUPS, request)
            .await
    }

    /// Delete a device group by ID or name
    pub async fn delete_device_group(&self, identifier: &str) -> Result<Envelope> {
        self.http
            .delete(&format!("{DEVICE_GROUPS}/{}", segment(identifier)))
            .await
    }

    /// List device groups
    pub async fn get_device_groups(&self) -> Result<DeviceGroupResponse> {
        self.http.get(DEVICE_GROUPS, None).await
    }

    /// Get a single device group by ID or name
    ///
    /// LibreNMS has no single-group endpoint, so the whole list is fetched and
    /// filtered. No match is an empty list with `count == 0`, not an error.
    pub async fn get_device_group(&self, identifier: &str) -> Result<DeviceGroupResponse> {
        let response = self.get_device_groups().await?;
        let (envelope, groups) = filter_to_one(&response.envelope, response.groups, identifier);
        Ok(DeviceGroupResponse { envelope, groups })
    }

    /// Update the set fields of a device group
    pub async fn update_device_group(
        &self,
        identifier: &str,
        request: &DeviceGroupUpdateRequest,
    ) -> Result<Envelope> {
        require_identifier(identifier, "update_device_group")?;
        self.http
            .send_json(
                HttpMethod::Patch,
                &format!("{DEVICE_GROUPS}/{}", segment(identifier)),
                &request.payload(),
            )
            .await
    }

    // Locations

    /// Create a location
    pub async fn create_location(&self, request: &LocationCreateRequest) -> Result<Envelope> {
        self.http
            .send_json(HttpMethod::Post, LOCATIONS, request)
            .await
    }

    /// Delete a location by ID
    pub async fn delete_location(&self, id: i64) -> Result<Envelope> {
        self.http.delete(&format!("{LOCATIONS}/{id}")).await
    }

    /// Get a location by ID
    pub async fn get_location(&self, id: i64) -> Result<LocationResponse> {
        self.http.get(&format!("location/{id}"), None).await
    }

    /// List locations
    pub async fn get_locations(&self) -> Result<LocationsResponse> {
        self.http.get("resources/locations", None).await
    }

    /// Update the set fields of a location
    pub async fn update_location(
        &self,
        id: i64,
        request: &LocationUpdateRequest,
    ) -> Result<Envelope> {
        self.http
            .send_json(
                HttpMethod::Patch,
                &format!("{LOCATIONS}/{id}"),
                &request.payload(),
            )
            .await
    }

    // Services

    /// Add a service to a device given by ID or hostname
    pub async fn create_service(
        &self,
        device_identifier: &str,
        request: &ServiceCreateRequest,
    ) -> Result<ServiceResponse> {
        self.http
            .send_json(
                HttpMethod::Post,
                &format!("{SERVICES}/{}", segment(device_identifier)),
                request,
            )
            .await
    }

    /// Delete a service by ID
    pub async fn delete_service(&self, id: i64) -> Result<Envelope> {
        self.http.delete(&format!("{SERVICES}/{id}")).await
    }

    /// List all services
    pub async fn get_services(&self) -> Result<ServiceResponse> {
        self.get_nested_services(SERVICES).await
    }

    /// List the services of a device given by ID or hostname
    pub async fn get_services_for_host(&self, device_identifier: &str) -> Result<ServiceResponse> {
        self.get_nested_services(&format!("{SERVICES}/{}", segment(device_identifier)))
            .await
    }

    /// Get a single service by ID
    ///
    /// Fetches every service and filters client-side. No match is an empty
    /// list with `count == 0`.
    pub async fn get_service(&self, id: i64) -> Result<ServiceResponse> {
        let response = self.get_services().await?;
        let (envelope, services) = filter_to_id(&response.envelope, response.services, id);
        Ok(ServiceResponse { envelope, services })
    }

    /// Update the set fields of a service
    pub async fn update_service(
        &self,
        id: i64,
        request: &ServiceUpdateRequest,
    ) -> Result<ServiceResponse> {
        self.http
            .send_json(
                HttpMethod::Patch,
                &format!("{SERVICES}/{id}"),
                &request.payload(),
            )
            .await
    }

    async fn get_nested_services(&self, path: &str) -> Result<ServiceResponse> {
        let nested: NestedServiceResponse = self.http.get(path, None).await?;
        let (envelope, services) = flatten_one_level(&nested.envelope, nested.services);
        Ok(ServiceResponse { envelope, services })
    }

    // Alerts

    /// Acknowledge an alert
    pub async fn ack_alert(&self, id: i64, request: &AlertAckRequest) -> Result<Envelope> {
        self.http
            .send_json(HttpMethod::Put, &format!("{ALERTS}/{id}"), request)
            .await
    }

    /// Get an alert by ID
    pub async fn get_alert(&self, id: i64) -> Result<AlertsResponse> {
        self.http.get(&format!("{ALERTS}/{id}"), None).await
    }

    /// List alerts, optionally filtered
    pub async fn get_alerts(&self, query: Option<&AlertsQuery>) -> Result<AlertsResponse> {
        let params = query.map(ToQuery::query);
        self.http.get(ALERTS, params.as_ref()).await
    }

    /// Unmute an alert
    pub async fn unmute_alert(&self, id: i64) -> Result<Envelope> {
        let request = self.http.build_request::<()>(
            HttpMethod::Put,
            &format!("{ALERTS}/unmute/{id}"),
            None,
            None,
        )?;
        self.http.execute(request).await
    }

    // Alert rules

    /// Create an alert rule
    ///
    /// An empty device list is sent as `[-1]` (all devices); `request` itself
    /// is left untouched.
    pub async fn create_alert_rule(&self, request: &AlertRuleCreateRequest) -> Result<Envelope> {
        let body = request.with_device_default();
        self.http.send_json(HttpMethod::Post, RULES, &body).await
    }

    /// Delete an alert rule by ID
    pub async fn delete_alert_rule(&self, id: i64) -> Result<Envelope> {
        self.http.delete(&format!("{RULES}/{id}")).await
    }

    /// Get an alert rule by ID
    pub async fn get_alert_rule(&self, id: i64) -> Result<AlertRuleResponse> {
        self.http.get(&format!("{RULES}/{id}"), None).await
    }

    /// List alert rules
    pub async fn get_alert_rules(&self) -> Result<AlertRuleResponse> {
        self.http.get(RULES, None).await
    }

    /// Replace an alert rule
    ///
    /// Fails before sending anything when `request.id` is not positive.
    pub async fn update_alert_rule(&self, request: &AlertRuleUpdateRequest) -> Result<Envelope> {
        if request.id < 1 {
            return Err(LibreNmsError::InvalidRequest(
                "rule ID is required for updating an alert rule".to_owned(),
            ));
        }
        let body = AlertRuleUpdateRequest {
            rule: request.rule.with_device_default(),
            id: request.id,
        };
        self.http.send_json(HttpMethod::Put, RULES, &body).await
    }
}
