//! HTTP surface: the Telegram webhook, health probes and brain admin routes.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use middleware::{SecretCandidates, ALT_SECRET_HEADER, SECRET_HEADER, SECRET_QUERY_PARAM};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{debug, error, warn};

use crate::components::BotComponents;

pub const SERVICE_NAME: &str = "hookbot";

pub fn router(components: BotComponents) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/webhook", post(handle_webhook))
        .route("/admin/brain/stats", get(handle_brain_stats))
        .route("/admin/brain/notes", get(handle_brain_notes))
        .route("/admin/brain/forget", post(handle_brain_forget))
        .with_state(components)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn secret_candidates(headers: &HeaderMap, query: Option<String>) -> SecretCandidates {
    SecretCandidates {
        header: header_value(headers, SECRET_HEADER),
        alt_header: header_value(headers, ALT_SECRET_HEADER),
        query: query.filter(|q| !q.is_empty()),
    }
}

async fn handle_root() -> &'static str {
    "ok"
}

/// GET /health
async fn handle_health() -> impl IntoResponse {
    Json(json!({
        "ok": true,
        "service": SERVICE_NAME,
        "ts": Utc::now().timestamp_millis(),
    }))
}

/// POST /webhook. Always `200 "ok"`; the outcome only goes to the logs.
async fn handle_webhook(
    State(components): State<BotComponents>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> &'static str {
    let query_secret = query
        .ok()
        .and_then(|Query(mut params)| params.remove(SECRET_QUERY_PARAM));
    let candidates = secret_candidates(&headers, query_secret);
    let outcome = components.dispatcher.dispatch(&candidates, &body).await;
    debug!(?outcome, "Webhook handled");
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub secret: Option<String>,
    pub chat: Option<i64>,
}

type AdminResponse = (StatusCode, Json<serde_json::Value>);

fn admin_error(status: StatusCode, message: &str) -> AdminResponse {
    (status, Json(json!({ "ok": false, "error": message })))
}

/// Checks the secret, then the chat id. `Err` is the response to send.
fn admin_chat(
    components: &BotComponents,
    headers: &HeaderMap,
    query: Result<Query<AdminQuery>, QueryRejection>,
) -> Result<i64, AdminResponse> {
    let query = query.map(|Query(q)| q).unwrap_or(AdminQuery {
        secret: None,
        chat: None,
    });
    let candidates = secret_candidates(headers, query.secret);
    if !components.dispatcher.verifier().verify(&candidates) {
        warn!("Admin request rejected: secret mismatch");
        return Err(admin_error(StatusCode::UNAUTHORIZED, "unauthorized"));
    }
    query
        .chat
        .ok_or_else(|| admin_error(StatusCode::BAD_REQUEST, "missing or invalid chat"))
}

/// GET /admin/brain/stats?secret=&chat=
async fn handle_brain_stats(
    State(components): State<BotComponents>,
    headers: HeaderMap,
    query: Result<Query<AdminQuery>, QueryRejection>,
) -> AdminResponse {
    let chat = match admin_chat(&components, &headers, query) {
        Ok(chat) => chat,
        Err(response) => return response,
    };
    match components.brain.count(chat).await {
        Ok(count) => (StatusCode::OK, Json(json!({ "ok": true, "chat": chat, "count": count }))),
        Err(e) => {
            error!(chat_id = chat, error = %e, "Brain stats failed");
            admin_error(StatusCode::INTERNAL_SERVER_ERROR, "store error")
        }
    }
}

/// GET /admin/brain/notes?secret=&chat=
async fn handle_brain_notes(
    State(components): State<BotComponents>,
    headers: HeaderMap,
    query: Result<Query<AdminQuery>, QueryRejection>,
) -> AdminResponse {
    let chat = match admin_chat(&components, &headers, query) {
        Ok(chat) => chat,
        Err(response) => return response,
    };
    match components.brain.list(chat).await {
        Ok(notes) => (StatusCode::OK, Json(json!({ "ok": true, "chat": chat, "notes": notes }))),
        Err(e) => {
            error!(chat_id = chat, error = %e, "Brain listing failed");
            admin_error(StatusCode::INTERNAL_SERVER_ERROR, "store error")
        }
    }
}

/// POST /admin/brain/forget?secret=&chat=
async fn handle_brain_forget(
    State(components): State<BotComponents>,
    headers: HeaderMap,
    query: Result<Query<AdminQuery>, QueryRejection>,
) -> AdminResponse {
    let chat = match admin_chat(&components, &headers, query) {
        Ok(chat) => chat,
        Err(response) => return response,
    };
    match components.brain.forget_all(chat).await {
        Ok(removed) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "chat": chat, "removed": removed })),
        ),
        Err(e) => {
            error!(chat_id = chat, error = %e, "Brain forget failed");
            admin_error(StatusCode::INTERNAL_SERVER_ERROR, "store error")
        }
    }
}
