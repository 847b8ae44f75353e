//! Execution context handed to the API client factory

use super::notifier::SignOutNotifier;
use crate::cookies::{CookieStore, MemoryCookieStore};
use std::fmt;
use std::sync::Arc;

/// Where the client runs
///
/// Only a browser-like environment has an interactive session that can be
/// signed out of; a server rendering a page for a request reports the failure
/// instead.
#[derive(Clone)]
pub enum Environment {
    /// Interactive client with a sign-out hook
    Browser(Arc<dyn SignOutNotifier>),
    /// Server-side rendering of a single request
    Server,
}

impl Environment {
    /// Browser environment with the given sign-out hook
    pub fn browser(notifier: impl SignOutNotifier + 'static) -> Self {
        Self::Browser(Arc::new(notifier))
    }

    /// Whether this is a browser environment
    pub fn is_browser(&self) -> bool {
        matches!(self, Self::Browser(_))
    }

    /// Invoke the sign-out hook; returns false on the server
    pub fn sign_out(&self) -> bool {
        match self {
            Self::Browser(notifier) => {
                notifier.sign_out();
                true
            }
            Self::Server => false,
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser(_) => f.write_str("Browser"),
            Self::Server => f.write_str("Server"),
        }
    }
}

/// Cookies plus environment for one client instance
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Cookie store the tokens are read from and written to
    pub cookies: Arc<dyn CookieStore>,
    /// Browser or server
    pub environment: Environment,
}

impl SessionContext {
    /// Create a context from its parts
    pub fn new(cookies: Arc<dyn CookieStore>, environment: Environment) -> Self {
        Self {
            cookies,
            environment,
        }
    }

    /// Browser context over `cookies`
    pub fn browser(
        cookies: impl CookieStore + 'static,
        notifier: impl SignOutNotifier + 'static,
    ) -> Self {
        Self::new(Arc::new(cookies), Environment::browser(notifier))
    }

    /// Server context over `cookies`
    pub fn server(cookies: impl CookieStore + 'static) -> Self {
        Self::new(Arc::new(cookies), Environment::Server)
    }

    /// Server context over the `Cookie` header of an incoming request
    pub fn from_cookie_header(header: Option<&str>) -> (Self, MemoryCookieStore) {
        let store = header
            .map(MemoryCookieStore::from_header)
            .unwrap_or_default();
        (Self::server(store.clone()), store)
    }
}
