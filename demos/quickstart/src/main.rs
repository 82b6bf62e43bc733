//! Interactive walkthrough of the authorization-code flow
//!
//! Reads the application credentials from the environment, prints the login
//! URL, exchanges the pasted callback code for tokens, and fetches the
//! authorized user's profile:
//!
//! ```sh
//! MELI_APP_ID=... MELI_APP_SECRET=... MELI_REDIRECT_URI=... cargo run -p meli-quickstart
//! ```

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use meli::{ApiClient, CallOptions, DEFAULT_COUNTRY};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_id = std::env::var("MELI_APP_ID").context("MELI_APP_ID is not set")?;
    let secret = std::env::var("MELI_APP_SECRET").context("MELI_APP_SECRET is not set")?;
    let redirect_uri =
        std::env::var("MELI_REDIRECT_URI").context("MELI_REDIRECT_URI is not set")?;
    let country = std::env::var("MELI_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_owned());

    let mut client = ApiClient::builder(app_id, secret)
        .open_timeout(Duration::from_secs(10))
        .read_timeout(Duration::from_secs(30))
        .build()?;

    println!("Authorize this application in your browser:\n");
    println!("  {}\n", client.authorization_url(&redirect_uri, &country)?);
    print!("Paste the `code` parameter from the callback URL: ");
    std::io::stdout().flush()?;

    let mut code = String::new();
    std::io::stdin().lock().read_line(&mut code)?;
    let code = code.trim();

    let access_token = client.authorize(code, &redirect_uri).await?;
    info!("authorization complete");

    let response = client
        .get(
            "/users/me",
            &[("access_token", access_token.as_str())],
            CallOptions::default(),
        )
        .await?;
    println!("GET /users/me -> {}", response.status());
    println!("{}", response.text().await?);

    Ok(())
}
