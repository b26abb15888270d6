//! The single entry point for every remote call.
//!
//! [`TransportClient`] owns two HTTP sessions pre-bound to the API base URL:
//!
//! - the **open** session authorizes with the public key, for reference data
//!   the API exposes without secret-key authority;
//! - the **secure** session authorizes with the secret key, for every
//!   state-mutating or account-scoped operation.
//!
//! Both sessions rewrite outbound bodies to wire casing and inbound bodies to
//! application casing, and both turn every failure into a normalized
//! [`Error`](crate::errors::Error).

use std::fmt::Display;

use bon::Builder;
use http::{
    HeaderMap, HeaderValue, Method,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;
use url::Url;

use crate::{
    case::{snake_case, to_app_case, to_wire_case},
    cipher::PayloadCipher,
    config::{ClientConfig, CredentialSource, Credentials, Environment},
    errors::{Error, Result},
    types::{AnyJson, ApiResponse},
};

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether a request with this verb sends a body.
    ///
    /// A body passed along with `Get` or `Delete` is dropped.
    pub fn carries_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Method::from(*self).as_str())
    }
}

/// Which credential authorizes a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMode {
    /// `Authorization: Bearer <public key>`.
    Open,
    /// `Authorization: Bearer <secret key>`.
    #[default]
    Secure,
}

/// A single API call.
///
/// ```
/// use serde_json::json;
/// use korapay_core::transport::{AuthMode, Call, HttpMethod};
///
/// let call = Call::builder()
///     .path("/merchant/api/v1/misc/banks")
///     .method(HttpMethod::Get)
///     .auth(AuthMode::Open)
///     .query(vec![("countryCode".to_owned(), "NG".to_owned())])
///     .build();
/// assert!(call.body.is_none());
/// assert!(!call.without_authorization);
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Call {
    /// Path relative to the base URL, starting with `/`.
    #[builder(into)]
    pub path: String,
    pub method: HttpMethod,
    /// Request body in application casing.
    pub body: Option<AnyJson>,
    #[builder(default)]
    pub auth: AuthMode,
    /// Query parameters. Keys are converted to wire casing.
    #[builder(default)]
    pub query: Vec<(String, String)>,
    /// Send an empty `Authorization` header instead of the session's bearer token.
    #[builder(default)]
    pub without_authorization: bool,
}

/// The transport seam the API surface is written against.
pub trait Transport {
    /// Dispatch `call` and return the canonical envelope.
    fn call(&self, call: Call) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// Encrypt `payload` with the client's encryption key.
    fn encrypt<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String>;
}

/// One authenticated HTTP session bound to the API base URL.
#[derive(Debug, Clone)]
struct Session {
    mode: AuthMode,
    base_url: Url,
    http: reqwest::Client,
}

impl Session {
    fn new(
        mode: AuthMode,
        credential: &str,
        token: &str,
        base_url: Url,
        config: &ClientConfig,
    ) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| Error::invalid_header(credential, err))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.resolved_user_agent());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Session {
            mode,
            base_url,
            http: builder.build()?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') || path.contains("..") || path.contains("//") {
            return Err(Error::validation(format!("invalid request path {path:?}")));
        }
        let url = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&url).map_err(|err| Error::url(path, err))
    }

    async fn send(&self, call: Call) -> Result<ApiResponse> {
        let url = self.endpoint(&call.path)?;
        let mut request = self.http.request(call.method.into(), url);

        if !call.query.is_empty() {
            let query: Vec<(String, &str)> = call
                .query
                .iter()
                .map(|(key, value)| (snake_case(key), value.as_str()))
                .collect();
            request = request.query(&query);
        }

        if call.without_authorization {
            request = request.header(AUTHORIZATION, HeaderValue::from_static(""));
        }

        match call.body {
            Some(body) if call.method.carries_body() => {
                request = request.json(&to_wire_case(body));
            }
            Some(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Dropping request body for bodiless {} {}",
                    call.method,
                    call.path
                );
            }
            None => {}
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Dispatching {} {} via {:?} session",
            call.method,
            call.path,
            self.mode
        );

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if !(200..300).contains(&status) {
            let body = serde_json::from_slice::<AnyJson>(&bytes).ok();
            let err = Error::remote(status, body);

            #[cfg(feature = "tracing")]
            tracing::warn!(
                "{} {} failed with status {}: {}",
                call.method,
                call.path,
                status,
                err.detail
            );

            return Err(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("{} {} completed with status {}", call.method, call.path, status);

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::from_body(status, AnyJson::Null));
        }
        let body: AnyJson =
            serde_json::from_slice(&bytes).map_err(|err| Error::decode(status, err))?;

        Ok(ApiResponse::from_body(status, to_app_case(body)))
    }
}

/// Korapay HTTP transport with an open and a secure session.
///
/// Cloning is cheap and clones share connection pools. Independent clients
/// with different credentials can coexist in one process.
///
/// ```no_run
/// use korapay_core::{
///     config::ClientConfig,
///     transport::{Call, HttpMethod, TransportClient},
/// };
///
/// # async fn run() -> korapay_core::errors::Result<()> {
/// let client = TransportClient::new(
///     ClientConfig::builder()
///         .public_key("pk_test_xxx")
///         .secret_key("sk_test_xxx")
///         .encryption_key("0123456789abcdef0123456789abcdef")
///         .build(),
/// )?;
///
/// let balances = client
///     .call(
///         Call::builder()
///             .path("/merchant/api/v1/balances")
///             .method(HttpMethod::Get)
///             .build(),
///     )
///     .await?;
/// println!("{:?}", balances.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TransportClient {
    open: Session,
    secure: Session,
    cipher: PayloadCipher,
}

impl TransportClient {
    /// Build a client, reading credentials missing from `config` from the environment.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_source(config, &Environment)
    }

    /// Build a client entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Build a client, reading credentials missing from `config` from `source`.
    pub fn with_source(config: ClientConfig, source: &impl CredentialSource) -> Result<Self> {
        let credentials = Credentials::resolve(
            config.public_key.clone(),
            config.secret_key.clone(),
            config.encryption_key.clone(),
            source,
        )?;
        Self::with_credentials(&credentials, &config)
    }

    /// Build a client from already resolved credentials.
    pub fn with_credentials(credentials: &Credentials, config: &ClientConfig) -> Result<Self> {
        let base_url = config.resolved_base_url()?;

        Ok(TransportClient {
            open: Session::new(
                AuthMode::Open,
                "public key",
                credentials.public_key(),
                base_url.clone(),
                config,
            )?,
            secure: Session::new(
                AuthMode::Secure,
                "secret key",
                credentials.secret_key(),
                base_url,
                config,
            )?,
            cipher: PayloadCipher::new(credentials.encryption_key()),
        })
    }

    fn session(&self, mode: AuthMode) -> &Session {
        match mode {
            AuthMode::Open => &self.open,
            AuthMode::Secure => &self.secure,
        }
    }

    /// Dispatch `call` through the session selected by `call.auth`.
    ///
    /// Any 2xx response becomes an [`ApiResponse`], even when the body reports
    /// `"status": false`. Non-2xx responses and transport failures are returned
    /// as errors. Nothing is retried.
    pub async fn call(&self, call: Call) -> Result<ApiResponse> {
        self.session(call.auth).send(call).await
    }

    /// Encrypt `payload` with the client's encryption key.
    ///
    /// [`TransportClient::call`] never does this on its own; operations that
    /// need an encrypted fragment call it before building the body.
    pub fn encrypt<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String> {
        self.cipher.encrypt(payload)
    }
}

impl Transport for TransportClient {
    fn call(&self, call: Call) -> impl Future<Output = Result<ApiResponse>> + Send {
        TransportClient::call(self, call)
    }

    fn encrypt<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String> {
        TransportClient::encrypt(self, payload)
    }
}
