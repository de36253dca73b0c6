//! Request pipeline for the JotForm API.
//!
//! # Design
//! `JotformClient` holds immutable configuration plus a shared `Transport` and
//! `DebugLog`, and carries no mutable state between calls. A call runs three
//! stages: `build_request` (pure), `Transport::send` (the only I/O) and
//! `parse_response` (pure). Callers that run their own I/O can use the two
//! pure stages directly. Debug lines are written only when a request is
//! actually sent.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoints::{Endpoint, Payload};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::logging::{DebugLog, LogFacade};
use crate::params::{kind, Params};
use crate::path;
use crate::transport::{Transport, UreqTransport};
use crate::types::Envelope;

pub const API_KEY_HEADER: &str = "apiKey";

/// Synchronous client for the JotForm API.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct JotformClient {
    config: ClientConfig,
    versioned_base: String,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn DebugLog>,
}

impl JotformClient {
    /// Client for the public API with default settings.
    pub fn new(api_key: &str) -> Self {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Build a client from `config` as given. Use `JotformClient::try_from`
    /// to reject invalid settings first.
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self {
            versioned_base: path::versioned_base(&config.base_url, &config.api_version),
            config,
            transport: Arc::new(transport),
            logger: Arc::new(LogFacade),
        }
    }

    /// Replace the transport, e.g. with a recording double in tests.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn with_logger(mut self, logger: impl DebugLog + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a relative resource path.
    pub fn url_for(&self, resource: &str) -> String {
        path::resolve(&self.versioned_base, resource)
    }

    /// Build the request for `resource` without sending it.
    pub fn build_request(
        &self,
        resource: &str,
        params: Option<&Params>,
        method: HttpMethod,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: self.url_for(resource),
            headers: vec![(API_KEY_HEADER.to_string(), self.config.api_key.clone())],
            query: params.map(|p| p.clone().into_pairs()).unwrap_or_default(),
        }
    }

    /// Extract `content` from a provider response.
    ///
    /// A response without `content`, or with `content: null`, yields `None`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        let value: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !value.is_object() {
            return Err(ApiError::Decode(format!(
                "expected an envelope object, got {}",
                kind(&value)
            )));
        }
        let envelope: Envelope =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.content)
    }

    /// Send one request to `resource` and return the `content` of the reply.
    pub fn execute(
        &self,
        resource: &str,
        params: Option<&Params>,
        method: HttpMethod,
    ) -> Result<Option<Value>, ApiError> {
        let request = self.build_request(resource, params, method);
        self.round_trip(&request)
    }

    /// Run a table operation: render its path, encode the payload, execute.
    pub fn dispatch(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        payload: Payload<'_>,
    ) -> Result<Option<Value>, ApiError> {
        let request = self.prepare(endpoint, args, payload)?;
        self.round_trip(&request)
    }

    /// Build the request a table operation would send.
    pub fn prepare(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        payload: Payload<'_>,
    ) -> Result<HttpRequest, ApiError> {
        let resource = endpoint.render(args)?;
        let params = endpoint.encode(payload)?;
        Ok(self.build_request(&resource, Some(&params), endpoint.method))
    }

    fn round_trip(&self, request: &HttpRequest) -> Result<Option<Value>, ApiError> {
        self.log(|| format!("fetching url {}", request.url));
        if !request.query.is_empty() {
            self.log(|| request.query.iter().cloned().collect::<Params>().to_string());
        }
        let response = self.transport.send(request)?;
        self.parse_response(response)
    }

    fn log(&self, message: impl FnOnce() -> String) {
        if self.config.debug {
            self.logger.debug(&message());
        }
    }
}

impl TryFrom<ClientConfig> for JotformClient {
    type Error = ApiError;

    fn try_from(config: ClientConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self::with_config(config))
    }
}

impl fmt::Debug for JotformClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JotformClient")
            .field("base", &self.versioned_base)
            .field("debug", &self.config.debug)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
