//! HTTP server implementation
//!
//! Page routes, the guest-only guard and a small JSON API, built on Axum.

pub mod app;
pub mod guard;
pub mod handlers;
pub mod layout;

pub use app::{AppState, create_app};
pub use guard::{GuestGuard, WithSsrGuest, redirect_authenticated, with_ssr_guest};
pub use layout::{Page, render_layout};
