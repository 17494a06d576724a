//! Basic-Auth decorator demo against httpbin.org.
//!
//! Builds a client with credential and header decorators, issues a request
//! against httpbin's guarded route, and prints the echoed auth state.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example httpbin_demo
//!
//! # Custom credentials (httpbin accepts whatever pair the URL names)
//! cargo run --example httpbin_demo -- --user benjamin --secret jones
//!
//! # Watch the construction-time logging
//! RUST_LOG=debug cargo run --example httpbin_demo
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Request};
use serde::Deserialize;

use authwire::Client;

#[derive(Parser, Debug)]
#[command(version, about = "Basic-Auth decorator demo")]
struct Args {
    /// Username for the Basic-Auth credential
    #[arg(long, default_value = "benjamin")]
    user: String,

    /// Secret for the Basic-Auth credential
    #[arg(long, default_value = "jones")]
    secret: String,

    /// Echo service base URL
    #[arg(long, default_value = "https://httpbin.org")]
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BasicAuthEcho {
    authenticated: bool,
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let client = Client::builder()
        .basic_auth(args.user.clone(), args.secret.clone())
        .header(ACCEPT, HeaderValue::from_static("application/json"))
        .build()?;

    let url = format!("{}/basic-auth/{}/{}", args.base_url, args.user, args.secret);
    info!("requesting {url}");

    let response = client.send(Request::new(Method::GET, url.parse()?)).await?;
    let status = response.status();
    if !status.is_success() {
        println!("status: {status} (credentials rejected by the remote)");
        return Ok(());
    }

    let echo: BasicAuthEcho = response.json().await?;
    println!("status: {status}");
    println!("authenticated: {} (as {})", echo.authenticated, echo.user);

    Ok(())
}
