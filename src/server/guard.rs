//! Guest-only page guard
//!
//! Pages such as login and sign-up make no sense for a visitor who already
//! holds a session. The guard sends them to the home route instead of
//! rendering the page, either by wrapping a page function
//! ([`with_ssr_guest`]) or as router middleware
//! ([`redirect_authenticated`]).

use crate::{
    config::Settings,
    cookies::{CookieStore, SESSION_TOKEN_COOKIE},
    types::{PageContext, PageResult, Redirect},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::future::Future;

/// Decides whether a visitor counts as signed in
#[derive(Debug, Clone)]
pub struct GuestGuard {
    token_cookie: String,
    home_route: String,
}

impl Default for GuestGuard {
    fn default() -> Self {
        Self::new(SESSION_TOKEN_COOKIE, "/")
    }
}

impl GuestGuard {
    /// Guard on `token_cookie`, redirecting to `home_route`
    pub fn new(token_cookie: impl Into<String>, home_route: impl Into<String>) -> Self {
        Self {
            token_cookie: token_cookie.into(),
            home_route: home_route.into(),
        }
    }

    /// Guard configured from the session and server settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.session.token_cookie.as_str(),
            settings.server.home_route.as_str(),
        )
    }

    /// Whether the request carries a non-empty session cookie
    ///
    /// The refresh cookie alone does not count.
    pub fn is_signed_in(&self, ctx: &PageContext) -> bool {
        ctx.cookies
            .get(&self.token_cookie)
            .is_some_and(|token| !token.is_empty())
    }

    /// Temporary redirect to the home route
    pub fn redirect(&self) -> Redirect {
        Redirect::temporary(self.home_route.as_str())
    }

    /// Wrap a page function
    pub fn wrap<F>(&self, page: F) -> WithSsrGuest<F> {
        WithSsrGuest {
            guard: self.clone(),
            page,
        }
    }
}

/// Wrap `page` so signed-in visitors are redirected to `/`
pub fn with_ssr_guest<F>(page: F) -> WithSsrGuest<F> {
    GuestGuard::default().wrap(page)
}

/// A page function behind a [`GuestGuard`]
#[derive(Debug, Clone)]
pub struct WithSsrGuest<F> {
    guard: GuestGuard,
    page: F,
}

impl<F> WithSsrGuest<F> {
    /// Render the page, or redirect without calling it when signed in
    pub async fn call<Fut, P>(&self, ctx: PageContext) -> PageResult<P>
    where
        F: Fn(PageContext) -> Fut,
        Fut: Future<Output = PageResult<P>>,
    {
        if self.guard.is_signed_in(&ctx) {
            tracing::debug!(path = %ctx.path, "Signed-in visitor on guest page, redirecting");
            return PageResult::Redirect(self.guard.redirect());
        }

        (self.page)(ctx).await
    }
}

/// Middleware form of the guard for whole routes
pub async fn redirect_authenticated(
    State(guard): State<GuestGuard>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = PageContext::from_headers(request.uri().path(), request.headers());
    if guard.is_signed_in(&ctx) {
        tracing::debug!(path = %ctx.path, "Signed-in visitor on guest route, redirecting");
        return guard.redirect().into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::MemoryCookieStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx(cookies: &[(&str, &str)]) -> PageContext {
        PageContext::new("/login", MemoryCookieStore::from_pairs(cookies.iter().copied()))
    }

    #[tokio::test]
    async fn test_signed_in_visitor_redirected_without_render() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let page = with_ssr_guest(move |_ctx: PageContext| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                PageResult::Props("login form")
            }
        });

        let result = page.call(ctx(&[("nextauth.token", "abc")])).await;
        assert_eq!(result, PageResult::Redirect(Redirect::temporary("/")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_guest_gets_page_result_unchanged() {
        let page = with_ssr_guest(|ctx: PageContext| async move {
            if ctx.path == "/login" {
                PageResult::Props(ctx.path)
            } else {
                PageResult::NotFound
            }
        });

        let result = page.call(ctx(&[("nextauth.refreshToken", "r")])).await;
        assert_eq!(result, PageResult::Props("/login".to_string()));
    }

    #[tokio::test]
    async fn test_page_redirects_pass_through() {
        let page = with_ssr_guest(|_ctx: PageContext| async {
            PageResult::<()>::Redirect(Redirect::permanent("/elsewhere"))
        });

        let result = page.call(ctx(&[])).await;
        assert_eq!(result, PageResult::Redirect(Redirect::permanent("/elsewhere")));
    }

    #[test]
    fn test_empty_cookie_is_not_a_session() {
        let guard = GuestGuard::default();
        assert!(!guard.is_signed_in(&ctx(&[("nextauth.token", "")])));
        assert!(guard.is_signed_in(&ctx(&[("nextauth.token", "t")])));
    }

    #[test]
    fn test_guard_from_settings() {
        let mut settings = Settings::default();
        settings.server.home_route = "/dashboard".to_string();
        let guard = GuestGuard::from_settings(&settings);
        assert_eq!(guard.redirect(), Redirect::temporary("/dashboard"));
    }
}
