//! Error types for client operations
//!
//! Non-2xx responses from the token endpoint become [`Error::Http`] with
//! the status and body preserved. The generic verb methods never fail on
//! status — they hand the response back and the caller reads the status
//! itself. Transport failures (connect, TLS, timeout) propagate untranslated.

use reqwest::StatusCode;

/// Errors from authorization and request construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("offline access is not allowed: no refresh token stored")]
    OfflineAccessNotAllowed,

    #[error("no authorization endpoint for country code {0:?}")]
    UnknownCountry(String),

    #[error("invalid token response: {0}")]
    TokenDecode(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("body serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query encoding failed: {0}")]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_keeps_status_and_body() {
        let err = Error::Http {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"message":"invalid_grant"}"#.into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"), "got: {rendered}");
        assert!(rendered.contains("invalid_grant"), "got: {rendered}");
    }

    #[test]
    fn unknown_country_display_names_the_code() {
        let err = Error::UnknownCountry("ZZ".into());
        assert_eq!(
            err.to_string(),
            "no authorization endpoint for country code \"ZZ\""
        );
    }
}
