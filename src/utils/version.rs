//! Build and version information

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Current crate version
pub fn get_version() -> &'static str {
    VERSION
}

/// Default `User-Agent` for backend requests, e.g. `session-gate/0.3.1`
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION)
}
