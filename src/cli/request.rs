//! Request mode: one authenticated GET through the API client
//!
//! Tokens come from the command line instead of a browser cookie jar. When
//! the backend asks for a refresh, the refreshed session cookie is reported
//! on stderr as a `Set-Cookie` line.

use super::{LogTarget, build_env_filter, init_tracing, load_settings};
use crate::{
    client::setup_api_client, cookies::MemoryCookieStore, error::format_error,
    session::SessionContext,
};
use anyhow::Result;

/// Arguments for request mode
#[derive(Debug, Default)]
pub struct RequestArgs {
    pub path: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub base_url: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run request mode with the given arguments
pub async fn run_request_mode(args: RequestArgs) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref());
    if let Some(base_url) = args.base_url {
        settings.api.base_url = base_url;
    }

    init_tracing(
        build_env_filter(args.verbose, "error"),
        &settings.logging.format,
        LogTarget::Stderr,
    );

    let cookies = session_cookies(
        &settings.session.token_cookie,
        &settings.session.refresh_cookie,
        args.token,
        args.refresh_token,
    );
    let client = setup_api_client(&settings, SessionContext::server(cookies.clone()))?;

    let response = client
        .get(&args.path)
        .await
        .map_err(|e| anyhow::anyhow!(format_error(&e)))?;

    for header in cookies.set_cookie_headers() {
        eprintln!("Set-Cookie: {}", header);
    }
    println!("{}", response.text());

    Ok(())
}

fn session_cookies(
    token_cookie: &str,
    refresh_cookie: &str,
    token: Option<String>,
    refresh_token: Option<String>,
) -> MemoryCookieStore {
    let pairs = [(token_cookie, token), (refresh_cookie, refresh_token)];
    MemoryCookieStore::from_pairs(
        pairs
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v))),
    )
}
