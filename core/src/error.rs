//! Error types for the JotForm API client.
//!
//! # Design
//! Failures are grouped by the stage of the request pipeline that produced
//! them: building the parameter bag (`InvalidPayloadShape`,
//! `InvalidPathArgument`, `Encode`), moving bytes (`Transport`), and reading
//! the reply (`HttpStatus`, `Decode`). None of them are caught internally;
//! every operation surfaces the first failure to its caller.

use thiserror::Error;

/// Errors returned by `JotformClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure, including timeouts.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body is not a JSON object.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// Caller-supplied payload does not match the shape the endpoint expects.
    #[error("invalid payload shape: {0}")]
    InvalidPayloadShape(String),

    /// A path argument could not be substituted into the endpoint template.
    #[error("invalid path argument for {endpoint}: {reason}")]
    InvalidPathArgument {
        endpoint: &'static str,
        reason: String,
    },

    /// A request payload could not be serialized to JSON.
    #[error("encoding request failed: {0}")]
    Encode(String),

    /// Client configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
