//! Configuration management
//!
//! This module handles loading and managing configuration settings
//! for the API client, the page server and the CLI.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{
    ApiSettings, LoggingSettings, NetworkSettings, ServerSettings, SessionSettings, Settings,
};

/// Serializes tests that touch process environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
