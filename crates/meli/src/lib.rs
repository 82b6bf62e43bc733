//! MercadoLibre REST API client
//!
//! OAuth2 authorization-code flow plus thin verb helpers over the public
//! REST API. The client owns the token state and the TLS transport; it does
//! not retry, paginate, or decode response bodies on the generic path.
//!
//! Typical flow:
//! 1. `ApiClient::builder(app_id, secret)` builds the client
//! 2. Send the user to `authorization_url()` to log in on their marketplace
//! 3. `authorize()` exchanges the callback code for tokens
//! 4. Call `get`/`post`/`put`/`delete`/`options` against API paths, passing
//!    the access token as the `access_token` query parameter
//! 5. `refresh_access_token()` when the access token expires
//!
//! ```no_run
//! use meli::{ApiClient, CallOptions, DEFAULT_COUNTRY};
//!
//! # async fn run() -> meli::Result<()> {
//! let mut client = ApiClient::new("app-id", "app-secret")?;
//! let login = client.authorization_url("https://example.com/callback", DEFAULT_COUNTRY)?;
//! println!("authorize at: {login}");
//! // ... user authorizes in the browser, callback delivers `code` ...
//! let access_token = client.authorize("code-from-callback", "https://example.com/callback").await?;
//!
//! let me = client
//!     .get("/users/me", &[("access_token", &access_token)], CallOptions::default())
//!     .await?;
//! println!("GET /users/me -> {}", me.status());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod sites;
pub mod token;

pub use client::{ApiClient, ApiClientBuilder, CallOptions, TransportConfig};
pub use constants::{API_ROOT_URL, DEFAULT_COUNTRY, OAUTH_URL, SDK_VERSION};
pub use error::{Error, Result};
pub use token::TokenResponse;

// Re-export the response types callers handle directly
pub use reqwest::{Method, Response, StatusCode};
