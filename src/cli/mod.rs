//! Command-line modes
//!
//! - [`server`]: run the page server
//! - [`cpf`]: check a CPF and exit non-zero when it is invalid
//! - [`request`]: issue one authenticated GET through the API client

pub mod cpf;
pub mod request;
pub mod server;

use crate::{Settings, config::ConfigLoader};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output (server mode)
    Stdout,
    /// Standard error (one-shot modes, which print results on stdout)
    Stderr,
}

/// Load settings for a CLI mode
///
/// Precedence: `--config` path, then `SESSION_GATE_CONFIG`, then the default
/// location. A broken file falls back to defaults with a warning on stderr,
/// since logging is not set up yet.
pub fn load_settings(config: Option<&str>) -> Settings {
    let config_path = match config {
        Some(path) => Some(std::path::PathBuf::from(path)),
        None => ConfigLoader::get_config_path(),
    };

    ConfigLoader::new()
        .load(config_path.as_deref())
        .unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to load configuration: {}. Using defaults.",
                e
            );
            Settings::default()
        })
}

/// Log filter with precedence `--verbose` > `RUST_LOG` > configured level
pub fn build_env_filter(verbose: bool, configured_level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(configured_level)
    }
}

/// Install the global subscriber; `format` is `text` or `json`
///
/// A second call in the same process leaves the first subscriber in place.
pub fn init_tracing(filter: EnvFilter, format: &str, target: LogTarget) {
    let writer = match target {
        LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let (json_layer, text_layer) = if format == "json" {
        (Some(fmt::layer().json().with_writer(writer)), None)
    } else {
        (None, Some(fmt::layer().with_writer(writer)))
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
