//! `session-gate server`

use super::{LogTarget, build_env_filter, init_tracing, load_settings};
use crate::{Settings, server::app, utils::version};
use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::TcpListener;

/// Arguments for server mode
#[derive(Debug, Default)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

impl ServerArgs {
    /// Flags given on the command line win over file and environment
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        settings.logging.verbose |= self.verbose;
    }
}

/// Serve the pages and API until the process is stopped
pub async fn run_server_mode(args: ServerArgs) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref());
    args.apply_to(&mut settings);

    init_tracing(
        build_env_filter(settings.logging.verbose, &settings.logging.level),
        &settings.logging.format,
        LogTarget::Stdout,
    );
    tracing::debug!(api = %settings.api.base_url, home = %settings.server.home_route, "Server settings");

    let listener = bind(&settings.server.host, settings.server.port).await?;
    tracing::info!(
        version = version::get_version(),
        addr = %listener.local_addr()?,
        "session-gate listening"
    );

    axum::serve(listener, app::create_app(settings)).await?;
    Ok(())
}

/// Bind `host:port`, where `host` is an IP literal
///
/// The IPv6 wildcard `::` binds `0.0.0.0` instead on hosts without IPv6.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let ip: IpAddr = host.parse().map_err(|_| {
        anyhow::anyhow!("Invalid host address: {host}. Expected an IP literal such as '::' or '0.0.0.0'")
    })?;

    match TcpListener::bind(SocketAddr::new(ip, port)).await {
        Ok(listener) => Ok(listener),
        Err(e) if ip == IpAddr::V6(Ipv6Addr::UNSPECIFIED) => {
            tracing::warn!(error = %e, "IPv6 wildcard unavailable, binding 0.0.0.0");
            let fallback = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
            Ok(TcpListener::bind(fallback).await?)
        }
        Err(e) => Err(e.into()),
    }
}
