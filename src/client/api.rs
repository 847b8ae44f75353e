//! Authenticated API client
//!
//! [`ApiClient`] attaches the session token to every request and recovers
//! from expired sessions: a 401 whose message names an expired or invalid
//! token triggers one refresh shared by every request that failed the same
//! way, after which each of them is replayed with the new token.

use super::interceptor::{UnauthorizedKind, classify};
use super::transport::{
    ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, header_value, resolve_url,
};
use crate::{
    Error, Result,
    config::{SessionSettings, Settings},
    cookies::CookieOptions,
    error::format_error_for_logging,
    session::{RefreshCoordinator, SessionContext},
    types::{RefreshRequest, RefreshResponse},
};
use parking_lot::RwLock;
use reqwest::{StatusCode, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

/// Build an authenticated client for `context`
///
/// The `Authorization` header is taken from the session cookie as it is now.
/// A missing cookie is not an error here; the header reads `Bearer undefined`
/// and the backend's 401 goes through the usual handling.
pub fn setup_api_client(settings: &Settings, context: SessionContext) -> Result<ApiClient> {
    let transport = ReqwestTransport::new(&settings.network)?;
    ApiClient::with_transport(settings, context, Arc::new(transport))
}

/// HTTP client bound to one session
///
/// Clones share the default authorization header and the refresh
/// coordinator.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    base_url: Url,
    refresh_path: String,
    session: SessionSettings,
    authorization: RwLock<String>,
    transport: Arc<dyn HttpTransport>,
    context: SessionContext,
    refresh: RefreshCoordinator,
}

impl ApiClient {
    /// Build a client over a custom transport
    pub fn with_transport(
        settings: &Settings,
        context: SessionContext,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let base_url = settings.base_url()?;
        let token = context.cookies.get(&settings.session.token_cookie);

        debug!(
            %base_url,
            has_token = token.is_some(),
            environment = ?context.environment,
            "API client configured"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                refresh_path: settings.api.refresh_path.clone(),
                session: settings.session.clone(),
                authorization: RwLock::new(bearer(token.as_deref())),
                transport,
                context,
                refresh: RefreshCoordinator::new(),
            }),
        })
    }

    /// Base URL request paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Current default `Authorization` header value
    pub fn authorization(&self) -> String {
        self.inner.authorization.read().clone()
    }

    /// The session context this client was built for
    pub fn context(&self) -> &SessionContext {
        &self.inner.context
    }

    /// The refresh coordinator shared by this client's clones
    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.inner.refresh
    }

    /// Send a request, refreshing the session once if it has expired
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let explicit = request.authorization().map(str::to_string);
        let sent = explicit.clone().unwrap_or_else(|| self.authorization());

        let response = self.send_with(&request, &sent).await?;
        if response.is_success() {
            return Ok(response);
        }
        if response.status != StatusCode::UNAUTHORIZED {
            return Err(status_error(&response));
        }

        let unauthorized = classify(&response.body, &self.inner.session);
        match unauthorized.kind {
            UnauthorizedKind::Flagged => {
                debug!(path = %request.path, "401 carries an error field, passing it through");
                Err(Error::unauthorized(unauthorized.message, response.text()))
            }
            UnauthorizedKind::Expired => {
                debug!(
                    path = %request.path,
                    message = unauthorized.message.as_deref().unwrap_or_default(),
                    "Session token rejected, refreshing"
                );
                self.refresh_and_replay(request, &sent, explicit.is_some())
                    .await
            }
            UnauthorizedKind::Other => {
                Err(self.reject_unrecoverable(&request, unauthorized.message, &response))
            }
        }
    }

    /// GET `path`
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(ApiRequest::get(path)).await
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path).await?.json()
    }

    /// POST a JSON body to `path` and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::post(path).with_json(body)?;
        self.request(request).await?.json()
    }

    async fn refresh_and_replay(
        &self,
        request: ApiRequest,
        sent: &str,
        explicit: bool,
    ) -> Result<ApiResponse> {
        let refresh_token = self
            .inner
            .context
            .cookies
            .get(&self.inner.session.refresh_cookie);

        // A refresh that finished after this request went out already
        // replaced its token
        let mut ticket = if explicit {
            self.inner.refresh.join()
        } else {
            let sent_token = sent.strip_prefix("Bearer ").unwrap_or(sent);
            self.inner.refresh.join_unless_refreshed(sent_token)
        };
        if let Some(flight) = ticket.take_flight() {
            let outcome = self.refresh_session(refresh_token).await.map_err(Arc::new);
            if let Err(e) = &outcome {
                error!(details = %format_error_for_logging(e), "Session refresh failed");
            }

            let drained = flight.resolve(&outcome);
            debug!(drained, "Refresh flight resolved");

            if outcome.is_err() && self.inner.context.environment.sign_out() {
                warn!("Signed out after failed session refresh");
            }
        }

        let token = ticket.wait().await.map_err(Error::Refresh)?;
        self.replay(request, &bearer(Some(&token))).await
    }

    /// POST the refresh token and store the new session token
    ///
    /// Goes straight to the transport; a failing refresh call is never
    /// itself refreshed.
    async fn refresh_session(&self, refresh_token: Option<String>) -> Result<String> {
        let request = ApiRequest::post(self.inner.refresh_path.as_str())
            .with_json(&RefreshRequest::new(refresh_token))?;

        let response = self.send_with(&request, &self.authorization()).await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        let RefreshResponse { token } = response.json()?;

        let session = &self.inner.session;
        let options = CookieOptions::new()
            .with_max_age(session.cookie_max_age)
            .with_path(session.cookie_path.as_str());
        self.inner
            .context
            .cookies
            .set(&session.token_cookie, &token, &options);

        *self.inner.authorization.write() = bearer(Some(&token));
        info!("Session token refreshed");

        Ok(token)
    }

    /// Re-issue a request with a new `Authorization` header
    ///
    /// An expired-token 401 on the replay is final and never refreshed
    /// again; any other 401 gets the usual sign-out handling.
    async fn replay(&self, request: ApiRequest, authorization: &str) -> Result<ApiResponse> {
        let response = self.send_with(&request, authorization).await?;
        if response.is_success() {
            return Ok(response);
        }

        if response.status != StatusCode::UNAUTHORIZED {
            return Err(status_error(&response));
        }

        let unauthorized = classify(&response.body, &self.inner.session);
        match unauthorized.kind {
            UnauthorizedKind::Flagged | UnauthorizedKind::Expired => {
                warn!(path = %request.path, "Replayed request rejected");
                Err(Error::unauthorized(unauthorized.message, response.text()))
            }
            UnauthorizedKind::Other => {
                Err(self.reject_unrecoverable(&request, unauthorized.message, &response))
            }
        }
    }

    /// Sign out in a browser, report `AuthToken` on the server
    fn reject_unrecoverable(
        &self,
        request: &ApiRequest,
        message: Option<String>,
        response: &ApiResponse,
    ) -> Error {
        if self.inner.context.environment.sign_out() {
            warn!(path = %request.path, "Unrecoverable 401, signed out");
            Error::unauthorized(message, response.text())
        } else {
            warn!(path = %request.path, "Unrecoverable 401 while rendering on the server");
            Error::AuthToken
        }
    }

    async fn send_with(&self, request: &ApiRequest, authorization: &str) -> Result<ApiResponse> {
        let url = resolve_url(&self.inner.base_url, &request.path)?;
        let mut outgoing = request.clone();
        outgoing
            .headers
            .insert(AUTHORIZATION, header_value(authorization)?);

        self.inner.transport.send(url, &outgoing).await
    }
}

fn bearer(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or("undefined"))
}

fn status_error(response: &ApiResponse) -> Error {
    Error::status(response.status.as_u16(), response.text())
}
