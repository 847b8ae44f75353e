//! Session cookies
//!
//! The session token and refresh token live in cookies; this module holds
//! their names, the storage trait and an in-memory implementation.

pub mod header;
pub mod store;

pub use header::{CookieOptions, parse_cookie_header, render_set_cookie};
pub use store::{CookieStore, CookieWrite, MemoryCookieStore};

/// Cookie holding the session token
pub const SESSION_TOKEN_COOKIE: &str = "nextauth.token";

/// Cookie holding the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "nextauth.refreshToken";
