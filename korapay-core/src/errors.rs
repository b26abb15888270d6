//! The normalized error returned by every fallible operation of the SDK.
//!
//! Whatever goes wrong (a missing credential, a refused connection, a `500`
//! from the API, a bad encryption key) reaches the caller as one [`Error`]
//! carrying a human readable `detail`, an optional HTTP `status`, an optional
//! machine readable `code` and, when there was one, the underlying cause.

use http::header::InvalidHeaderValue;
use serde_json::Value;

use crate::{case::to_app_case, types::AnyJson};

/// A boxed underlying error kept as the [`Error`] source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A credential or client setting is missing or unusable.
    Configuration,
    /// The request never produced a response (DNS, connect, timeout, ...).
    Transport,
    /// The API answered with a non-2xx status.
    Remote,
    /// The payload could not be encrypted.
    Cipher,
    /// A 2xx response could not be decoded.
    Decode,
    /// A payload was rejected before being sent.
    Validation,
}

/// Normalized SDK error.
#[derive(Debug, thiserror::Error)]
#[error("{detail}")]
pub struct Error {
    pub kind: ErrorKind,
    /// Human readable description of the failure.
    pub detail: String,
    /// HTTP status, when a response (or a status-carrying transport error) was received.
    pub status: Option<u16>,
    /// Machine readable classification, e.g. `timeout` or the API's own error code.
    pub code: Option<String>,
    /// The app-cased JSON body of a failed response, when it was parseable.
    pub body: Option<AnyJson>,
    /// The original error.
    #[source]
    pub cause: Option<BoxError>,
}

impl Error {
    fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Error {
            kind,
            detail: detail.into(),
            status: None,
            code: None,
            body: None,
            cause: None,
        }
    }

    fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// A credential was neither supplied nor found in the environment.
    pub fn missing_credential(credential: &str, env_var: &str) -> Self {
        Error::new(
            ErrorKind::Configuration,
            format!(
                "{credential} was not provided on instantiation or set in environment variables as {env_var}"
            ),
        )
    }

    /// A credential cannot be used as an HTTP header value.
    pub fn invalid_header(credential: &str, cause: InvalidHeaderValue) -> Self {
        Error::new(
            ErrorKind::Configuration,
            format!("{credential} contains characters not allowed in an HTTP header"),
        )
        .with_code("invalid_header")
        .with_cause(cause)
    }

    /// The API answered with a non-2xx status.
    ///
    /// `body` is the raw (wire-cased) response body if it was JSON.
    pub fn remote(status: u16, body: Option<AnyJson>) -> Self {
        let body = body.map(to_app_case);
        let detail = body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("request failed with status code {status}"));
        let code = body.as_ref().and_then(|body| {
            ["error", "code"]
                .into_iter()
                .find_map(|field| body.get(field).and_then(Value::as_str))
                .map(str::to_owned)
        });

        Error {
            kind: ErrorKind::Remote,
            detail,
            status: Some(status),
            code,
            body,
            cause: None,
        }
    }

    /// Encryption of a payload failed.
    pub fn cipher(code: &str, detail: impl Into<String>) -> Self {
        Error::new(ErrorKind::Cipher, detail).with_code(code)
    }

    /// A 2xx response (or its `data`) could not be decoded.
    pub fn decode(status: u16, cause: serde_json::Error) -> Self {
        let mut err = Error::new(ErrorKind::Decode, format!("invalid response body: {cause}"))
            .with_code("decode")
            .with_cause(cause);
        err.status = Some(status);
        err
    }

    /// A payload was rejected before being sent.
    pub fn validation(detail: impl Into<String>) -> Self {
        Error::new(ErrorKind::Validation, detail).with_code("invalid_payload")
    }

    /// A payload could not be serialized to JSON.
    pub fn serialization(cause: serde_json::Error) -> Self {
        Error::new(
            ErrorKind::Validation,
            format!("failed to serialize payload: {cause}"),
        )
        .with_code("serialization")
        .with_cause(cause)
    }

    /// A request path could not be turned into a URL.
    pub fn url(path: &str, cause: url::ParseError) -> Self {
        Error::new(ErrorKind::Transport, format!("invalid request URL for {path}: {cause}"))
            .with_code("url")
            .with_cause(cause)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "timeout"
        } else if err.is_connect() {
            "connect"
        } else if err.is_redirect() {
            "redirect"
        } else if err.is_status() {
            "status"
        } else if err.is_body() {
            "body"
        } else if err.is_decode() {
            "decode"
        } else if err.is_builder() {
            "builder"
        } else {
            "request"
        };

        let mut normalized = Error::new(ErrorKind::Transport, err.to_string()).with_code(code);
        normalized.status = err.status().map(|status| status.as_u16());
        normalized.with_cause(err)
    }
}

/// A specialized `Result` type for Korapay SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
