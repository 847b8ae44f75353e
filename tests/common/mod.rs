//! Common test utilities and helpers
//!
//! A wiremock backend that behaves like the session API: protected routes
//! reject anything but `Bearer new` with `{"message":"jwt expired"}`, and
//! `POST /refresh-token` hands out `new`.

#![allow(dead_code)]

use serde_json::json;
use session_gate::{
    ApiClient, SessionContext, Settings,
    cookies::MemoryCookieStore,
    session::{Environment, FnSignOut},
    setup_api_client,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use wiremock::{
    Mock, MockGuard, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

/// Token the fake backend issues on refresh
pub const NEW_TOKEN: &str = "new";

/// Test helper functions
pub mod helpers {
    use super::*;

    /// Settings pointing at the mock backend
    pub fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = server.uri();
        settings.network.request_timeout = 5;
        settings
    }

    /// Cookie jar holding the given tokens
    pub fn session_cookies(token: Option<&str>, refresh_token: Option<&str>) -> MemoryCookieStore {
        let pairs = [
            ("nextauth.token", token),
            ("nextauth.refreshToken", refresh_token),
        ];
        MemoryCookieStore::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }

    /// Client running server-side over `cookies`
    pub fn server_client(server: &MockServer, cookies: &MemoryCookieStore) -> ApiClient {
        setup_api_client(&settings_for(server), SessionContext::server(cookies.clone())).unwrap()
    }

    /// Client running in a browser context; the counter tracks sign-outs
    pub fn browser_client(
        server: &MockServer,
        cookies: &MemoryCookieStore,
    ) -> (ApiClient, Arc<AtomicUsize>) {
        let sign_outs = Arc::new(AtomicUsize::new(0));
        let counter = sign_outs.clone();
        let environment = Environment::browser(FnSignOut::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let context = SessionContext::new(Arc::new(cookies.clone()), environment);
        let client = setup_api_client(&settings_for(server), context).unwrap();
        (client, sign_outs)
    }
}

/// Mock backend endpoints
pub struct Backend;

impl Backend {
    /// Protected route: 200 for the refreshed token, expiry 401 otherwise
    pub async fn mount_protected(server: &MockServer, http_method: &str, route: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .and(header("authorization", format!("Bearer {}", NEW_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "route": route })))
            .with_priority(1)
            .mount(server)
            .await;

        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })),
            )
            .with_priority(2)
            .mount(server)
            .await;
    }

    /// Route whose account is gone: the old token expired, the refreshed
    /// one is rejected with `{"message":"user disabled"}`
    pub async fn mount_revoked(server: &MockServer, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", format!("Bearer {}", NEW_TOKEN).as_str()))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "user disabled" })),
            )
            .with_priority(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })),
            )
            .with_priority(2)
            .mount(server)
            .await;
    }

    /// Route answering with a fixed status and JSON body
    pub async fn mount_fixed(
        server: &MockServer,
        route: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    /// Successful refresh endpoint, expected exactly `calls` times
    pub async fn mount_refresh(server: &MockServer, delay: Duration, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "token": NEW_TOKEN }))
                    .set_delay(delay),
            )
            .expect(calls)
            .mount(server)
            .await;
    }

    /// Failing refresh endpoint, verified and removed when the guard drops
    pub async fn scoped_refresh_failure(
        server: &MockServer,
        status: u16,
        delay: Duration,
    ) -> MockGuard {
        Mock::given(method("POST"))
            .and(path("/refresh-token"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string("refresh rejected")
                    .set_delay(delay),
            )
            .expect(1)
            .mount_as_scoped(server)
            .await
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }
}
