// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! HTTP error handling and response formatting.
//!
//! Caller input errors (missing duration, unknown action) are not HTTP
//! errors: they are reported synchronously in the control response payload.
//! This module covers the remaining cases, as JSON error responses.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	/// Human-readable error message.
	pub error: String,
	/// Machine-readable error code.
	pub code: String,
}

impl ErrorResponse {
	pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			error: error.into(),
		}
	}
}

/// Application error type that converts to HTTP responses.
///
/// Malformed request bodies never reach a handler (the extractor rejects
/// them first), so the only failures surfaced here are internal ones.
#[derive(Debug)]
pub enum AppError {
	/// Internal server error.
	Internal(String),
}

impl std::fmt::Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
		}
	}
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let AppError::Internal(msg) = self;
		tracing::error!("Internal error: {}", msg);

		let body = Json(ErrorResponse::new("INTERNAL_ERROR", "Internal server error"));
		(StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
	}
}
