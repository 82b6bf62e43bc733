//! The MercadoLibre API client
//!
//! [`ApiClient`] owns the application credentials, the OAuth token state and
//! a shared TLS transport. It builds every request the crate sends:
//!
//! 1. `authorization_url()` — browser URL that starts the code flow
//! 2. `authorize()` — exchanges the callback code for tokens
//! 3. `get`/`post`/`put`/`delete`/`options` — verb helpers against the API
//! 4. `refresh_access_token()` — mints a new access token when one expires
//!
//! The verb helpers return the raw [`Response`] whatever its status;
//! authenticated endpoints take the access token as the `access_token`
//! query parameter. Token state only changes on successful token endpoint
//! calls, so a failed exchange never clobbers working credentials.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use reqwest::{Method, Response, header};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::constants::{API_ROOT_URL, OAUTH_URL, SDK_VERSION};
use crate::error::{Error, Result};
use crate::sites;
use crate::token::{self, TokenResponse};

/// Default timeouts applied to every request.
///
/// `open_timeout` bounds connection establishment, `read_timeout` bounds the
/// whole exchange once connected. `None` means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportConfig {
    pub open_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

/// Timeout overrides for a single call.
///
/// An override applies to exactly one request and never touches the
/// client's configured defaults: an overridden read timeout rides on the
/// request itself, and an overridden open timeout runs on a throwaway
/// transport that is dropped when the call returns. Restore-on-exit is
/// therefore guaranteed on every path, including errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    pub open_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

impl CallOptions {
    /// Bound connection establishment for this call only.
    pub fn open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = Some(timeout);
        self
    }

    /// Bound the whole exchange for this call only.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Client for the MercadoLibre REST API.
///
/// Construct with [`ApiClient::new`] or [`ApiClient::builder`]. Operations
/// that update token state take `&mut self`; callers needing concurrent
/// requests should use independent client instances.
pub struct ApiClient {
    app_id: String,
    secret: String,
    access_token: Option<String>,
    refresh_token: Option<String>,
    api_root: Url,
    oauth_url: Url,
    config: TransportConfig,
    http: reqwest::Client,
}

/// Builder covering the optional construction knobs of [`ApiClient`].
#[derive(Clone)]
pub struct ApiClientBuilder {
    app_id: String,
    secret: String,
    access_token: Option<String>,
    refresh_token: Option<String>,
    api_root: String,
    oauth_url: String,
    config: TransportConfig,
}

impl ApiClientBuilder {
    /// Seed the client with an access token obtained earlier.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Seed the client with a refresh token obtained earlier.
    pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Default connection-establishment timeout.
    pub fn open_timeout(mut self, timeout: Duration) -> Self {
        self.config.open_timeout = Some(timeout);
        self
    }

    /// Default whole-exchange timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Override the API root (production host by default). Relative request
    /// paths resolve against this URL.
    pub fn api_root(mut self, url: impl Into<String>) -> Self {
        self.api_root = url.into();
        self
    }

    /// Override the token endpoint (production host by default).
    pub fn oauth_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_url = url.into();
        self
    }

    /// Build the client and its TLS transport.
    pub fn build(self) -> Result<ApiClient> {
        let api_root = Url::parse(&self.api_root)?;
        let oauth_url = Url::parse(&self.oauth_url)?;
        let http = build_transport(&self.config)?;
        Ok(ApiClient {
            app_id: self.app_id,
            secret: self.secret,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            api_root,
            oauth_url,
            config: self.config,
            http,
        })
    }
}

impl ApiClient {
    /// Client with default endpoints and no timeouts or stored tokens.
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        Self::builder(app_id, secret).build()
    }

    /// Start building a client from the application credentials.
    pub fn builder(app_id: impl Into<String>, secret: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            app_id: app_id.into(),
            secret: secret.into(),
            access_token: None,
            refresh_token: None,
            api_root: API_ROOT_URL.to_owned(),
            oauth_url: OAUTH_URL.to_owned(),
            config: TransportConfig::default(),
        }
    }

    /// Build the browser URL that starts the authorization-code flow.
    ///
    /// The user logs in on their country's marketplace; see
    /// [`sites::AUTH_URLS`] for the mapping and
    /// [`DEFAULT_COUNTRY`](crate::constants::DEFAULT_COUNTRY) when the
    /// caller has no preference.
    pub fn authorization_url(&self, redirect_uri: &str, country_code: &str) -> Result<Url> {
        let base = sites::auth_url(country_code)
            .ok_or_else(|| Error::UnknownCountry(country_code.to_owned()))?;
        let mut url = Url::parse(base)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.app_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri);
        Ok(url)
    }

    /// Exchange an authorization code for tokens and store them.
    ///
    /// `redirect_uri` must match the one the authorization URL was built
    /// with. Returns the new access token. On a non-2xx response the stored
    /// token state is left untouched.
    pub async fn authorize(&mut self, code: &str, redirect_uri: &str) -> Result<String> {
        let response = token::exchange_code(
            &self.http,
            &self.oauth_url,
            &self.app_id,
            &self.secret,
            code,
            redirect_uri,
        )
        .await?;
        Ok(self.store_tokens(response))
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// Fails with [`Error::OfflineAccessNotAllowed`] — without any network
    /// I/O — when no refresh token is stored, which happens when the
    /// application was authorized without the offline_access scope. Both
    /// tokens are replaced on success.
    pub async fn refresh_access_token(&mut self) -> Result<String> {
        let refresh = match self.refresh_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_owned(),
            _ => return Err(Error::OfflineAccessNotAllowed),
        };
        let response = token::refresh(
            &self.http,
            &self.oauth_url,
            &self.app_id,
            &self.secret,
            &refresh,
        )
        .await?;
        Ok(self.store_tokens(response))
    }

    /// Update token state from a successful token endpoint response.
    ///
    /// A response without `refresh_token` means offline access was not
    /// granted; the stored value becomes the empty string.
    fn store_tokens(&mut self, response: TokenResponse) -> String {
        self.access_token = Some(response.access_token.clone());
        self.refresh_token = Some(response.refresh_token.unwrap_or_default());
        debug!("token state updated");
        response.access_token
    }

    /// GET `path` with `query` appended to the URL.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        opts: CallOptions,
    ) -> Result<Response> {
        let url = self.resolve_url(path, query)?;
        self.execute(Method::GET, url, None, opts).await
    }

    /// POST `path` with an optional JSON payload.
    ///
    /// `query` goes into the URL; when no payload is given it is
    /// additionally form-encoded into the body, matching what the official
    /// SDKs send.
    pub async fn post<B>(
        &self,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
        opts: CallOptions,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path, query)?;
        let payload = encode_body(body, query)?;
        self.execute(Method::POST, url, payload, opts).await
    }

    /// PUT `path` with an optional JSON payload; body rules as in [`post`](Self::post).
    pub async fn put<B>(
        &self,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
        opts: CallOptions,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path, query)?;
        let payload = encode_body(body, query)?;
        self.execute(Method::PUT, url, payload, opts).await
    }

    /// DELETE `path` with `query` appended to the URL.
    pub async fn delete(
        &self,
        path: &str,
        query: &[(&str, &str)],
        opts: CallOptions,
    ) -> Result<Response> {
        let url = self.resolve_url(path, query)?;
        self.execute(Method::DELETE, url, None, opts).await
    }

    /// OPTIONS `path` with `query` appended to the URL.
    pub async fn options(
        &self,
        path: &str,
        query: &[(&str, &str)],
        opts: CallOptions,
    ) -> Result<Response> {
        let url = self.resolve_url(path, query)?;
        self.execute(Method::OPTIONS, url, None, opts).await
    }

    /// Access token from the last successful authorization, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Stored refresh token. Empty string = authorized without offline access.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Default connection-establishment timeout.
    pub fn open_timeout(&self) -> Option<Duration> {
        self.config.open_timeout
    }

    /// Default whole-exchange timeout.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.config.read_timeout
    }

    /// Replace the default open timeout and rebuild the live transport.
    pub fn set_open_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.config.open_timeout = timeout;
        self.http = build_transport(&self.config)?;
        Ok(())
    }

    /// Replace the default read timeout and rebuild the live transport.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.config.read_timeout = timeout;
        self.http = build_transport(&self.config)?;
        Ok(())
    }

    /// Resolve a request path against the API root.
    ///
    /// Absolute http(s) URLs pass through untouched; anything else gets a
    /// leading slash (if missing) and the API root prepended. `query` is
    /// appended after any query the path already carries.
    fn resolve_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?
        } else {
            let root = self.api_root.as_str().trim_end_matches('/');
            let path = if path.starts_with('/') {
                format!("{root}{path}")
            } else {
                format!("{root}/{path}")
            };
            Url::parse(&path)?
        };
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    /// Send a request through the transport.
    fn call_transport(&self, opts: &CallOptions) -> Result<Cow<'_, reqwest::Client>> {
        // The open timeout is fixed at transport construction, so an
        // override needs its own transport for the duration of the call.
        match opts.open_timeout {
            None => Ok(Cow::Borrowed(&self.http)),
            Some(timeout) => {
                let config = TransportConfig {
                    open_timeout: Some(timeout),
                    ..self.config
                };
                Ok(Cow::Owned(build_transport(&config)?))
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
        opts: CallOptions,
    ) -> Result<Response> {
        let transport = self.call_transport(&opts)?;
        debug!(%method, %url, "sending request");
        let mut request = transport
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, SDK_VERSION)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = opts.read_timeout {
            request = request.timeout(timeout);
        }
        Ok(request.send().await?)
    }
}

impl fmt::Debug for ApiClient {
    // secret and tokens stay out of logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("app_id", &self.app_id)
            .field("api_root", &self.api_root.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("app_id", &self.app_id)
            .field("api_root", &self.api_root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Encode the body for POST and PUT.
///
/// A JSON payload wins when present; otherwise non-empty query parameters
/// are form-encoded into the body.
fn encode_body<B>(body: Option<&B>, query: &[(&str, &str)]) -> Result<Option<String>>
where
    B: Serialize + ?Sized,
{
    match body {
        Some(body) => Ok(Some(serde_json::to_string(body)?)),
        None if !query.is_empty() => Ok(Some(serde_urlencoded::to_string(query)?)),
        None => Ok(None),
    }
}

/// Build the TLS transport: TLS 1.2 minimum, peer verification on (the
/// reqwest default), configured timeouts applied client-wide.
fn build_transport(config: &TransportConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().min_tls_version(reqwest::tls::Version::TLS_1_2);
    if let Some(timeout) = config.open_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.read_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
