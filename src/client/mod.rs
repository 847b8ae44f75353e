//! # Authenticated API Client
//!
//! - [`setup_api_client`] builds an [`ApiClient`] for a [`SessionContext`]
//! - [`HttpTransport`] is the network seam, [`ReqwestTransport`] the default
//! - [`classify`] decides what a 401 response means
//!
//! ## Examples
//!
//! ```rust,no_run
//! use session_gate::{Settings, SessionContext, cookies::MemoryCookieStore, setup_api_client};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cookies = MemoryCookieStore::from_header("nextauth.token=abc");
//! let client = setup_api_client(&Settings::default(), SessionContext::server(cookies))?;
//! let profile: serde_json::Value = client.get_json("/me").await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`SessionContext`]: crate::session::SessionContext

pub mod api;
pub mod interceptor;
pub mod transport;

pub use api::{ApiClient, setup_api_client};
pub use interceptor::{UnauthorizedBody, UnauthorizedKind, classify};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, resolve_url};
