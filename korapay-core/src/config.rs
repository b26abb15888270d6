//! Client configuration and credential resolution.
//!
//! Credentials supplied in [`ClientConfig`] always win. Anything left out is
//! looked up through a [`CredentialSource`], which is the process environment
//! by default and can be swapped for any map in tests.

use std::{collections::HashMap, fmt::Debug, hash::BuildHasher, time::Duration};

use bon::Builder;
use url::Url;

use crate::errors::{Error, Result};

/// Base URL of the Korapay API.
pub const DEFAULT_BASE_URL: &str = "https://api.korapay.com";

/// Environment variable holding the public key.
pub const ENV_PUBLIC_KEY: &str = "KORAPAY_PUBLIC_KEY";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "KORAPAY_SECRET_KEY";
/// Environment variable holding the encryption key.
pub const ENV_ENCRYPTION_KEY: &str = "KORAPAY_ENCRYPTION_KEY";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("korapay-rs/", env!("CARGO_PKG_VERSION"));

/// A fallback source of credentials, consulted only for values not supplied explicitly.
pub trait CredentialSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment;

impl CredentialSource for Environment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl<S: BuildHasher> CredentialSource for HashMap<String, String, S> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: CredentialSource + ?Sized> CredentialSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The resolved key set of a client. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    secret_key: String,
    encryption_key: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("encryption_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        encryption_key: impl Into<String>,
    ) -> Self {
        Credentials {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            encryption_key: encryption_key.into(),
        }
    }

    /// Resolve each credential from its explicit value, falling back to `source`.
    ///
    /// `source` is never consulted for a credential that was supplied. Empty or
    /// blank values count as missing.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use korapay_core::config::{Credentials, ENV_ENCRYPTION_KEY};
    ///
    /// let source = HashMap::from([(ENV_ENCRYPTION_KEY.to_owned(), "k".repeat(32))]);
    /// let credentials = Credentials::resolve(
    ///     Some("pk_test".to_owned()),
    ///     Some("sk_test".to_owned()),
    ///     None,
    ///     &source,
    /// )
    /// .unwrap();
    /// assert_eq!(credentials.public_key(), "pk_test");
    /// assert_eq!(credentials.encryption_key(), "k".repeat(32));
    /// ```
    pub fn resolve(
        public_key: Option<String>,
        secret_key: Option<String>,
        encryption_key: Option<String>,
        source: &impl CredentialSource,
    ) -> Result<Self> {
        Ok(Credentials {
            public_key: resolve_one(public_key, "public key", ENV_PUBLIC_KEY, source)?,
            secret_key: resolve_one(secret_key, "secret key", ENV_SECRET_KEY, source)?,
            encryption_key: resolve_one(
                encryption_key,
                "encryption key",
                ENV_ENCRYPTION_KEY,
                source,
            )?,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn encryption_key(&self) -> &str {
        &self.encryption_key
    }
}

fn resolve_one(
    explicit: Option<String>,
    credential: &str,
    env_var: &str,
    source: &impl CredentialSource,
) -> Result<String> {
    if let Some(value) = explicit.filter(|value| !value.trim().is_empty()) {
        return Ok(value);
    }

    source
        .var(env_var)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::missing_credential(credential, env_var))
}

/// Client configuration.
///
/// Every field is optional: credentials left out are read from the
/// environment, the base URL defaults to [`DEFAULT_BASE_URL`].
///
/// ```
/// use korapay_core::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .public_key("pk_test_xxx")
///     .secret_key("sk_test_xxx")
///     .build();
/// assert!(config.encryption_key.is_none());
/// ```
#[derive(Builder, Clone, Default)]
pub struct ClientConfig {
    /// Public key, used by the open session.
    #[builder(into)]
    pub public_key: Option<String>,
    /// Secret key, used by the secure session.
    #[builder(into)]
    pub secret_key: Option<String>,
    /// Key used to encrypt card payloads.
    #[builder(into)]
    pub encryption_key: Option<String>,
    /// Override of the API base URL, e.g. for a mock server.
    pub base_url: Option<Url>,
    /// Override of the `User-Agent` header.
    #[builder(into)]
    pub user_agent: Option<String>,
    /// Overall per-request timeout. No timeout is applied when left out.
    pub timeout: Option<Duration>,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("public_key", &redact(&self.public_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("encryption_key", &redact(&self.encryption_key))
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// The configured base URL, or [`DEFAULT_BASE_URL`].
    pub fn resolved_base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|err| Error::url(DEFAULT_BASE_URL, err)),
        }
    }

    /// The configured `User-Agent`, or [`USER_AGENT`].
    pub fn resolved_user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(USER_AGENT)
    }
}
