//! HTTP request handlers
//!
//! Pages are rendered through the layout; guest-only pages go through the
//! guest guard before their page function runs.

use super::layout::{Page, escape_html};
use crate::{
    server::app::AppState,
    types::{
        CpfValidationRequest, CpfValidationResponse, ErrorResponse, PageContext, PageResult,
        PingResponse,
    },
    utils::version,
    validation::cpf,
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};

/// Home page
///
/// GET /
pub async fn home(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Page {
    let ctx = PageContext::from_headers(uri.path(), &headers);
    let greeting = if state.guard.is_signed_in(&ctx) {
        "Welcome back."
    } else {
        "You are browsing as a guest."
    };

    Page::new("Home", format!("<h1>Home</h1><p>{}</p>", greeting))
}

/// Sign-in page, guest only
///
/// GET /login
pub async fn login(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let ctx = PageContext::from_headers(uri.path(), &headers);
    state.guard.wrap(login_page).call(ctx).await.into_response()
}

async fn login_page(ctx: PageContext) -> PageResult<Page> {
    let body = format!(
        concat!(
            "<h1>Sign in</h1>",
            r#"<form method="post" action="{}">"#,
            r#"<label>CPF <input name="cpf" inputmode="numeric"></label>"#,
            r#"<label>Password <input name="password" type="password"></label>"#,
            r#"<button type="submit">Sign in</button></form>"#
        ),
        escape_html(&ctx.path)
    );

    PageResult::Props(Page::new("Sign in", body))
}

/// Sign-up page; the guest guard runs as route middleware
///
/// GET /signup
pub async fn signup() -> Page {
    Page::new(
        "Sign up",
        concat!(
            "<h1>Create an account</h1>",
            r#"<form method="post" action="/signup">"#,
            r#"<label>CPF <input name="cpf" inputmode="numeric"></label>"#,
            r#"<button type="submit">Continue</button></form>"#
        ),
    )
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}

/// CPF check endpoint
///
/// POST /cpf/validate
pub async fn validate_cpf(body: axum::body::Bytes) -> Response {
    let request: CpfValidationRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!("Failed to deserialize CPF request: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_context(
                    format!("Invalid JSON: {}", e),
                    "json_deserialization",
                )),
            )
                .into_response();
        }
    };

    let valid = cpf::is_valid(&request.cpf);
    tracing::debug!(valid, "CPF validated");

    let response = CpfValidationResponse {
        cpf: cpf::normalize(&request.cpf),
        valid,
        formatted: cpf::format(&request.cpf),
    };
    (StatusCode::OK, Json(response)).into_response()
}
