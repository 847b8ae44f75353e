//! Server-side page rendering types
//!
//! A page function receives a [`PageContext`] for the incoming request and
//! returns a [`PageResult`]: props to render, a redirect, or not-found.

use crate::cookies::{CookieStore, MemoryCookieStore};
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// Per-request context handed to a page function
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Request path
    pub path: String,
    /// Cookies sent with the request
    pub cookies: MemoryCookieStore,
}

impl PageContext {
    /// Create a context from a path and a cookie store
    pub fn new(path: impl Into<String>, cookies: MemoryCookieStore) -> Self {
        Self {
            path: path.into(),
            cookies,
        }
    }

    /// Build a context from request headers; multiple `Cookie` headers are
    /// merged in order
    pub fn from_headers(path: impl Into<String>, headers: &HeaderMap) -> Self {
        let joined = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Self::new(path, MemoryCookieStore::from_header(&joined))
    }

    /// Whether the request carries cookie `name`
    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.get(name).is_some()
    }
}

/// Redirect instruction returned by a page function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target location
    pub destination: String,
    /// Permanent (308) or temporary (307)
    pub permanent: bool,
}

impl Redirect {
    /// Temporary redirect
    pub fn temporary(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            permanent: false,
        }
    }

    /// Permanent redirect
    pub fn permanent(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            permanent: true,
        }
    }

    /// Status code this redirect is sent with
    pub fn status(&self) -> StatusCode {
        if self.permanent {
            StatusCode::PERMANENT_REDIRECT
        } else {
            StatusCode::TEMPORARY_REDIRECT
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.destination) {
            Ok(location) => (self.status(), [(header::LOCATION, location)]).into_response(),
            Err(_) => {
                tracing::error!(destination = %self.destination, "Invalid redirect destination");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Outcome of a page function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResult<P> {
    /// Render the page with these props
    Props(P),
    /// Send the visitor elsewhere
    Redirect(Redirect),
    /// Respond 404
    NotFound,
}

impl<P> PageResult<P> {
    /// Whether this result is a redirect
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Props, if the page renders
    pub fn props(&self) -> Option<&P> {
        match self {
            Self::Props(props) => Some(props),
            _ => None,
        }
    }

    /// Map rendered props, leaving redirects and not-found alone
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> PageResult<Q> {
        match self {
            Self::Props(props) => PageResult::Props(f(props)),
            Self::Redirect(redirect) => PageResult::Redirect(redirect),
            Self::NotFound => PageResult::NotFound,
        }
    }
}

impl<P: IntoResponse> IntoResponse for PageResult<P> {
    fn into_response(self) -> Response {
        match self {
            Self::Props(props) => props.into_response(),
            Self::Redirect(redirect) => redirect.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
