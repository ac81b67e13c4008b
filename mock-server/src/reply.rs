//! Envelope-shaped responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::model::Pagination;

pub const SERVER_TIME: &str = "2025-01-01T00:00:00Z";

pub type Reply = Result<Response, Failure>;

/// 200 with `data` wrapped in a success envelope.
pub fn ok<T: Serialize>(data: T) -> Reply {
    Ok(Json(json!({
        "code": "SUCCESS",
        "message": "OK",
        "data": data,
        "timestamp": SERVER_TIME,
        "success": true
    }))
    .into_response())
}

/// 201 variant of [`ok`].
pub fn created<T: Serialize>(data: T) -> Reply {
    let response = ok(data)?;
    Ok((StatusCode::CREATED, response).into_response())
}

/// One page of `items` plus the pagination block. Pages are 1-based.
pub fn paged<T: Serialize>(items: Vec<T>, page: Option<u32>, size: Option<u32>) -> Reply {
    let page = page.unwrap_or(1).max(1);
    let size = size.unwrap_or(10).max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(u64::from(size)) as u32;
    let offset = u64::from(page - 1).saturating_mul(u64::from(size));
    let data: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(size as usize)
        .collect();
    let pagination = Pagination {
        page,
        size,
        total,
        total_pages,
    };
    Ok(Json(json!({
        "code": "SUCCESS",
        "message": "OK",
        "data": data,
        "timestamp": SERVER_TIME,
        "success": true,
        "pagination": pagination
    }))
    .into_response())
}

/// A failure rendered as an error envelope.
#[derive(Debug)]
pub struct Failure {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub data: Value,
}

impl Failure {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code,
            "message": self.message,
            "data": self.data,
            "timestamp": SERVER_TIME,
            "success": false
        });
        (self.status, Json(body)).into_response()
    }
}
