//! In-memory stand-in for the LETO partner API.
//!
//! Serves the same paths and envelope shapes as the real service for one
//! tenant. Requests must carry non-empty `X-Tenant-ID` and
//! `X-Service-Token` headers; the values themselves are not checked.

mod domains;
mod handlers;
pub mod model;
pub mod reply;
pub mod store;

use axum::{
    extract::{rejection::JsonRejection, Request},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tokio::net::TcpListener;

use crate::reply::Failure;
use crate::store::{Db, Store};

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const TOKEN_HEADER: &str = "x-service-token";
pub const DEFAULT_TENANT: &str = "tenant-1";

pub fn app() -> Router {
    app_with(Store::shared(DEFAULT_TENANT))
}

/// Router over an existing store, so tests can seed or inspect state.
pub fn app_with(db: Db) -> Router {
    let domain = Router::new()
        .route("/", get(domains::get).delete(domains::delete))
        .route("/whois", get(domains::whois))
        .route("/locks", get(domains::locks))
        .route(
            "/transferLock",
            get(domains::get_transfer_lock).put(domains::set_transfer_lock),
        )
        .route(
            "/transferAutoReject",
            get(domains::get_transfer_auto_reject).put(domains::set_transfer_auto_reject),
        )
        .route(
            "/updateLock",
            get(domains::get_update_lock).put(domains::set_update_lock),
        )
        .route(
            "/transfer/auth-code",
            get(domains::get_auth_code).put(domains::change_auth_code),
        )
        .route(
            "/nameservers",
            get(domains::get_nameservers).put(domains::update_nameservers),
        )
        .route(
            "/contact",
            get(domains::get_contact).put(domains::update_contact),
        )
        .route(
            "/renewal",
            get(domains::renewal_history).post(domains::renew),
        )
        .route("/renewal/{renewal_id}", delete(domains::cancel_renewal))
        .route(
            "/dnssec",
            get(domains::get_dnssec).post(domains::configure_dnssec),
        );

    Router::new()
        .route("/api/v1/account/status", get(handlers::account_status))
        .route(
            "/api/v1/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route("/api/v1/domains/check", get(domains::check))
        .route(
            "/api/v1/domains",
            get(domains::list).post(domains::register),
        )
        .route(
            "/api/v1/domains/transfer",
            get(handlers::list_transfers).post(handlers::initiate_transfer),
        )
        .route(
            "/api/v1/domains/transfer/auth-code/verify",
            post(handlers::verify_auth_code),
        )
        .route("/api/v1/domains/transfer/{transfer_id}", get(handlers::get_transfer))
        .nest("/api/v1/domains/{domain}", domain)
        .route("/api/v1/tlds", get(handlers::list_tlds))
        .route("/api/v1/tlds/{tld}", get(handlers::get_tld))
        .route("/api/v1/transactions", get(handlers::list_transactions))
        .fallback(not_found)
        .layer(middleware::from_fn(require_credentials))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn has_credentials(headers: &HeaderMap) -> bool {
    let present = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.trim().is_empty())
    };
    present(TENANT_HEADER) && present(TOKEN_HEADER)
}

async fn require_credentials(request: Request, next: Next) -> Response {
    if !has_credentials(request.headers()) {
        tracing::debug!(uri = %request.uri(), "rejected request without credentials");
        return Failure::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "X-Tenant-ID and X-Service-Token headers are required",
        )
        .into_response();
    }

    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::info!(%method, %uri, status = response.status().as_u16(), "handled request");
    response
}

async fn not_found() -> Failure {
    Failure::not_found("NOT_FOUND", "No such endpoint")
}

/// Unwrap a JSON body, answering malformed input with an error envelope.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Failure> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| Failure::bad_request("INVALID_REQUEST", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn credentials_need_both_non_blank_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_HEADER, HeaderValue::from_static("tenant-1"));
        assert!(!has_credentials(&headers));

        headers.insert(TOKEN_HEADER, HeaderValue::from_static("  "));
        assert!(!has_credentials(&headers));

        headers.insert(TOKEN_HEADER, HeaderValue::from_static("token"));
        assert!(has_credentials(&headers));
    }
}
