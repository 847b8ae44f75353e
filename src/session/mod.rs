//! # Session Management Module
//!
//! Everything the API client needs to keep a session alive:
//!
//! - [`SessionContext`]: the cookie store plus the [`Environment`] the client
//!   runs in (browser with a sign-out hook, or server)
//! - [`RefreshCoordinator`]: the single-flight refresh flag and pending queue
//! - [`SignOutNotifier`]: what happens when the session cannot be recovered
//!
//! ## Examples
//!
//! ```rust
//! use session_gate::session::RefreshCoordinator;
//!
//! # tokio_test::block_on(async {
//! let coordinator = RefreshCoordinator::new();
//! let token = coordinator
//!     .refresh_with(|| async { Ok("new-session-token".to_string()) })
//!     .await
//!     .unwrap();
//! assert_eq!(token, "new-session-token");
//! assert!(!coordinator.is_refreshing());
//! # });
//! ```

pub mod context;
pub mod notifier;
pub mod refresh;

pub use context::{Environment, SessionContext};
pub use notifier::{ClearSessionCookies, FnSignOut, SignOutNotifier};
pub use refresh::{Flight, PendingRequest, RefreshCoordinator, RefreshOutcome, Ticket};
