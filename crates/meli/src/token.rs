//! OAuth token exchange and refresh
//!
//! Handles the two token endpoint interactions:
//! 1. Authorization code exchange (initial OAuth flow completion)
//! 2. Token refresh (minting a new access token from a refresh token)
//!
//! Both operations POST a form-encoded grant to the token endpoint and
//! decode the JSON payload. These are the only requests in the crate that
//! interpret a response body; the generic verb methods return responses raw.

use serde::Deserialize;
use url::Url;

use crate::constants::SDK_VERSION;
use crate::error::{Error, Result};

/// Response from the token endpoint for both exchange and refresh.
///
/// `refresh_token` is only present when the application was granted the
/// offline_access scope. The endpoint also returns `scope`, `user_id` and
/// `token_type`; the client does not use them.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires (delta, not absolute)
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Exchange an authorization code for tokens (initial OAuth flow).
///
/// The user has authorized in their browser and the callback delivered the
/// code; this trades it for tokens, proving the application's identity with
/// its secret.
pub async fn exchange_code(
    http: &reqwest::Client,
    oauth_url: &Url,
    app_id: &str,
    secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse> {
    request_token(
        http,
        oauth_url,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", app_id),
            ("client_secret", secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ],
    )
    .await
}

/// Mint a new access token from a refresh token.
///
/// The endpoint rotates the refresh token: the response carries a new one
/// and the old one stops working.
pub async fn refresh(
    http: &reqwest::Client,
    oauth_url: &Url,
    app_id: &str,
    secret: &str,
    refresh_token: &str,
) -> Result<TokenResponse> {
    request_token(
        http,
        oauth_url,
        &[
            ("grant_type", "refresh_token"),
            ("client_id", app_id),
            ("client_secret", secret),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    http: &reqwest::Client,
    oauth_url: &Url,
    grant: &[(&str, &str)],
) -> Result<TokenResponse> {
    let response = http
        .post(oauth_url.clone())
        .header(reqwest::header::ACCEPT, "application/json")
        .header(reqwest::header::USER_AGENT, SDK_VERSION)
        .form(grant)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        return Err(Error::Http { status, body });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(Error::TokenDecode)
}
