//! Fixed MercadoLibre endpoints and client identification
//!
//! These values identify the API, not the application — the application's
//! credentials (app id, secret) and the tokens it obtains are held by
//! [`ApiClient`](crate::ApiClient). Token exchange always goes through the
//! central API host; only the browser-facing authorization leg is served
//! per country (see [`sites`](crate::sites)).

/// Root of the REST API; relative request paths resolve against it
pub const API_ROOT_URL: &str = "https://api.mercadolibre.com";

/// Token endpoint for authorization-code exchange and token refresh
pub const OAUTH_URL: &str = "https://api.mercadolibre.com/oauth/token";

/// User-Agent sent with every request so the API can attribute SDK traffic
pub const SDK_VERSION: &str = concat!("MELI-RUST-SDK-", env!("CARGO_PKG_VERSION"));

/// Country marketplace used when the caller has no preference
pub const DEFAULT_COUNTRY: &str = "BR";
