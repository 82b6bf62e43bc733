//! Per-country authorization endpoints
//!
//! MercadoLibre runs one marketplace per country, each with its own login
//! domain. The browser-facing authorization leg of the OAuth flow happens
//! on the country site the user actually shops on; everything else goes
//! through the central API host.

/// Authorization base URL for every marketplace, keyed by ISO country code.
pub const AUTH_URLS: &[(&str, &str)] = &[
    ("AR", "https://auth.mercadolibre.com.ar/authorization"),
    ("BO", "https://auth.mercadolibre.com.bo/authorization"),
    ("BR", "https://auth.mercadolivre.com.br/authorization"),
    ("CL", "https://auth.mercadolibre.cl/authorization"),
    ("CO", "https://auth.mercadolibre.com.co/authorization"),
    ("CR", "https://auth.mercadolibre.co.cr/authorization"),
    ("DO", "https://auth.mercadolibre.com.do/authorization"),
    ("EC", "https://auth.mercadolibre.com.ec/authorization"),
    ("GT", "https://auth.mercadolibre.com.gt/authorization"),
    ("HN", "https://auth.mercadolibre.com.hn/authorization"),
    ("MX", "https://auth.mercadolibre.com.mx/authorization"),
    ("NI", "https://auth.mercadolibre.com.ni/authorization"),
    ("PA", "https://auth.mercadolibre.com.pa/authorization"),
    ("PY", "https://auth.mercadolibre.com.py/authorization"),
    ("PE", "https://auth.mercadolibre.com.pe/authorization"),
    ("SV", "https://auth.mercadolibre.com.sv/authorization"),
    ("UY", "https://auth.mercadolibre.com.uy/authorization"),
    ("VE", "https://auth.mercadolibre.com.ve/authorization"),
];

/// Look up the authorization base URL for an ISO country code.
///
/// Codes are matched exactly as stored: two uppercase letters.
pub fn auth_url(country_code: &str) -> Option<&'static str> {
    AUTH_URLS
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, url)| *url)
}
