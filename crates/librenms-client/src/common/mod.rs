//! Common utilities for the LibreNMS API client
//!
//! Every endpoint call goes through [`HttpClient`], which runs the same
//! pipeline: build the request, send it through the [`Transport`], check the
//! status, then decode the body.

pub mod query;
pub mod transport;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, debug, trace};
use url::Url;

use crate::error::{LibreNmsError, Result};
use crate::flexible::nullable;
use query::QueryParams;
use transport::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Header carrying the API token
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Error body LibreNMS sends with non-2xx responses
///
/// Both fields are optional: any JSON object is an envelope, and a missing
/// or `null` message is empty.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    message: String,
}

/// HTTP client wrapper with authentication
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    api_root: Url,
    token: String,
    dispatch: Option<Dispatch>,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    ///
    /// # Arguments
    /// * `transport` - Performs the round trips
    /// * `api_root` - Absolute URL ending in `/api/v0/`
    /// * `token` - API token sent with every request
    /// * `dispatch` - Receives the client's tracing events; `None` uses the
    ///   caller's current subscriber
    pub fn new(
        transport: Arc<dyn Transport>,
        api_root: Url,
        token: String,
        dispatch: Option<Dispatch>,
    ) -> Self {
        Self {
            transport,
            api_root,
            token,
            dispatch,
        }
    }

    /// Get the API root URL
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Build a request for `path` relative to the API root
    ///
    /// Adds `Accept` and the auth header, plus `Content-Type` when a body is
    /// present. The query string is only set when `query` has parameters.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        query: Option<&QueryParams>,
    ) -> Result<HttpRequest> {
        let mut url = self.api_root.join(path).map_err(|e| {
            LibreNmsError::InvalidRequest(format!("invalid request path {path:?}: {e}"))
        })?;
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            url.set_query(Some(&query.encode()));
        }

        let body = body.map(serde_json::to_string).transpose()?;

        let mut headers = vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            (AUTH_HEADER.to_owned(), self.token.clone()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Send `request` and decode the response into `T`
    ///
    /// Events are routed to the client's dispatcher when one was configured.
    pub async fn execute<T>(&self, request: HttpRequest) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match &self.dispatch {
            Some(dispatch) => {
                self.round_trip(request)
                    .with_subscriber(dispatch.clone())
                    .await
            }
            None => self.round_trip(request).await,
        }
    }

    async fn round_trip<T>(&self, request: HttpRequest) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let method = request.method;
        let url = request.url.clone();

        debug!(%method, %url, "sending request");
        if let Some(body) = &request.body {
            trace!(%method, %url, %body, "request body");
        }

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| LibreNmsError::Transport {
                method: method.to_string(),
                url: url.clone(),
                source,
            })?;

        debug!(
            status = response.status,
            status_text = %response.status_text,
            content_type = response.header("content-type").unwrap_or_default(),
            "received response"
        );

        check_response(&response, &url)?;
        decode_body(&response.body, method, &url)
    }

    /// Make a GET request
    pub async fn get<T>(&self, path: &str, query: Option<&QueryParams>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let request = self.build_request::<()>(HttpMethod::Get, path, None, query)?;
        self.execute(request).await
    }

    /// Make a DELETE request
    pub async fn delete<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let request = self.build_request::<()>(HttpMethod::Delete, path, None, None)?;
        self.execute(request).await
    }

    /// Make a request carrying a JSON body
    pub async fn send_json<B, T>(&self, method: HttpMethod, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let request = self.build_request(method, path, Some(body), None)?;
        self.execute(request).await
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_root", &self.api_root.as_str())
            .field("token", &"<redacted>")
            .field("dispatch", &self.dispatch.is_some())
            .finish_non_exhaustive()
    }
}

/// Turn a non-2xx response into [`LibreNmsError::Api`]
///
/// The message is taken from the error envelope when the body is a JSON
/// object, the raw body when it is not, and the status line when the body is
/// empty.
pub(crate) fn check_response(response: &HttpResponse, url: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let (api_status, message) = if response.body.trim().is_empty() {
        (None, response.status_line())
    } else {
        match serde_json::from_str::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => (envelope.status, envelope.message),
            Err(_) => (None, response.body.clone()),
        }
    };

    Err(LibreNmsError::Api {
        status: response.status,
        status_text: response.status_text.clone(),
        url: url.to_owned(),
        api_status,
        message,
    })
}

/// Decode a 2xx body; an empty body yields `T::default()`
pub(crate) fn decode_body<T>(body: &str, method: HttpMethod, url: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(|source| LibreNmsError::Decode {
        context: format!("{method} {url}"),
        source,
    })
}
