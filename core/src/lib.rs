//! Synchronous client for the JotForm REST API.
//!
//! # Overview
//! Translates method calls into `apiKey`-signed requests against
//! `https://api.jotform.com/v1/*.json`, flattens nested payloads into the
//! provider's bracketed field names, and returns the `content` of the JSON
//! envelope the provider wraps every reply in.
//!
//! # Design
//! - `JotformClient` holds only immutable configuration; it is `Clone`,
//!   `Send` and `Sync`.
//! - Each call is `build_request` → `Transport::send` → `parse_response`.
//!   The first and last stages are pure, so hosts can run their own I/O.
//! - Operations are rows in a declarative table (`endpoints`); one generic
//!   `dispatch` consumes the table and the typed methods in `api` pick rows.
//! - Debug logging goes through an injected `DebugLog`, gated by
//!   `ClientConfig::debug`.
//!
//! ```no_run
//! use jotform_core::{JotformClient, ListQuery};
//!
//! let client = JotformClient::new("YOUR_API_KEY");
//! let forms = client.get_forms(&ListQuery::new().limit(10))?;
//! # Ok::<(), jotform_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod flatten;
pub mod http;
pub mod logging;
pub mod params;
pub mod path;
pub mod transport;
pub mod types;

pub use api::Content;
pub use client::JotformClient;
pub use config::ClientConfig;
pub use endpoints::{Endpoint, ParamShape, Payload};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use logging::{DebugLog, LogFacade, NoopLog};
pub use params::Params;
pub use transport::{Transport, UreqTransport};
pub use types::{Envelope, HistoryQuery, ListQuery};
