//! Sign-out hooks
//!
//! A client running in a browser-like context ends the session when the
//! backend rejects it for good. What "ending the session" means is up to the
//! embedding application, so it is injected as a [`SignOutNotifier`].

use crate::{
    config::SessionSettings,
    cookies::{CookieStore, MemoryCookieStore},
};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Zero-argument sign-out callback
pub trait SignOutNotifier: Send + Sync {
    /// Clear session state and send the user back to the login view
    fn sign_out(&self);
}

/// Adapts any closure into a [`SignOutNotifier`]
pub struct FnSignOut<F>(F);

impl<F> FnSignOut<F>
where
    F: Fn() + Send + Sync,
{
    /// Wrap a closure
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> SignOutNotifier for FnSignOut<F>
where
    F: Fn() + Send + Sync,
{
    fn sign_out(&self) {
        (self.0)()
    }
}

impl<F> fmt::Debug for FnSignOut<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSignOut")
    }
}

/// Removes both session cookies, then runs an optional redirect callback
pub struct ClearSessionCookies {
    cookies: Arc<dyn CookieStore>,
    token_cookie: String,
    refresh_cookie: String,
    on_redirect: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ClearSessionCookies {
    /// Clear the cookies named in `session` from `cookies`
    pub fn new(cookies: Arc<dyn CookieStore>, session: &SessionSettings) -> Self {
        Self {
            cookies,
            token_cookie: session.token_cookie.clone(),
            refresh_cookie: session.refresh_cookie.clone(),
            on_redirect: None,
        }
    }

    /// Convenience constructor over an in-memory store
    pub fn for_memory_store(cookies: &MemoryCookieStore, session: &SessionSettings) -> Self {
        Self::new(Arc::new(cookies.clone()), session)
    }

    /// Run `redirect` after the cookies are gone
    pub fn with_redirect(mut self, redirect: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_redirect = Some(Box::new(redirect));
        self
    }
}

impl SignOutNotifier for ClearSessionCookies {
    fn sign_out(&self) {
        self.cookies.remove(&self.token_cookie, Some("/"));
        self.cookies.remove(&self.refresh_cookie, Some("/"));
        info!("Session cookies cleared");

        if let Some(redirect) = &self.on_redirect {
            redirect();
        }
    }
}

impl fmt::Debug for ClearSessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearSessionCookies")
            .field("token_cookie", &self.token_cookie)
            .field("refresh_cookie", &self.refresh_cookie)
            .field("has_redirect", &self.on_redirect.is_some())
            .finish()
    }
}
