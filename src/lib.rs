//! session-gate
//!
//! Session plumbing for a web front end backed by a token-authenticated API.
//!
//! # Features
//!
//! - **Authenticated client**: attaches the session token to every request
//!   and recovers from expired sessions with a single shared refresh
//! - **Single-flight refresh**: any number of concurrently failing requests
//!   wait on one refresh call, then replay with the new token
//! - **CPF validation**: checksum validation of Brazilian taxpayer numbers
//! - **Guest-only pages**: redirect signed-in visitors away from login pages
//! - **Page server**: Axum server rendering pages in a shared layout
//!
//! # Usage
//!
//! ```bash
//! session-gate server --port 3000
//! session-gate --cpf 529.982.247-25
//! session-gate request /me --token <session> --refresh-token <refresh>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use session_gate::{SessionContext, Settings, cookies::MemoryCookieStore, setup_api_client};
//!
//! # fn example() -> anyhow::Result<()> {
//! let cookies = MemoryCookieStore::from_header("nextauth.token=abc");
//! let client = setup_api_client(&Settings::default(), SessionContext::server(cookies))?;
//! assert_eq!(client.authorization(), "Bearer abc");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod cookies;
pub mod error;
pub mod server;
pub mod session;
pub mod types;
pub mod utils;
pub mod validation;

pub use client::{ApiClient, ApiRequest, ApiResponse, setup_api_client};
pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use server::{create_app, with_ssr_guest};
pub use session::{Environment, SessionContext};
pub use types::{PageContext, PageResult, Redirect};
pub use validation::cpf;
