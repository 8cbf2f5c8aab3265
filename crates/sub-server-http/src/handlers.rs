// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! HTTP endpoint handlers for the control boundary and the event stream.
//!
//! This module provides the request handlers for:
//! - `/health` - Health check endpoint
//! - `/mcp` - Control requests (subscribe, set-timer)
//! - `/sse` - The single shared SSE delivery channel

use std::convert::Infallible;

use axum::{
	Json,
	extract::State,
	http::StatusCode,
	response::{
		IntoResponse, Sse,
		sse::{Event, KeepAlive},
	},
};
use chime_core::{Error, Identity, Notification};
use futures_util::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

/// Request body for the control endpoint.
#[derive(Debug, Deserialize)]
pub struct ControlRequest {
	/// The action to perform: "subscribe" or "set".
	pub action: String,
	/// The identity the action is scoped to.
	pub identity: Identity,
	/// Timer duration in seconds; required for "set".
	#[serde(default)]
	pub seconds: Option<f64>,
	/// Optional timer name; used verbatim as the timer id.
	#[serde(default)]
	pub name: Option<String>,
}

/// Response body for the control endpoint.
///
/// Mirrors the tool-reply shape of the MCP control protocol: the identity
/// plus a list of text content items.
#[derive(Debug, Serialize, Deserialize)]
pub struct ControlResponse {
	pub identity: Identity,
	pub content: Vec<ContentItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentItem {
	pub r#type: String,
	pub text: String,
}

impl ContentItem {
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			r#type: "text".to_string(),
			text: text.into(),
		}
	}
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// Health check endpoint.
///
/// Returns 200 OK if the server is running.
pub async fn health() -> impl IntoResponse {
	(StatusCode::OK, Json(HealthResponse {
		status: "ok",
	}))
}

/// Control endpoint: subscribe an identity or set a timer.
///
/// Caller errors (missing duration, unknown action) are reported in the
/// response payload, not as HTTP errors; the delivery outcome of any
/// notification is always asynchronous and never affects this response.
pub async fn handle_control(
	State(state): State<AppState>,
	Json(request): Json<ControlRequest>,
) -> Result<Json<ControlResponse>, AppError> {
	tracing::debug!(
		"Control request: action={} identity={} seconds={:?} name={:?}",
		request.action,
		request.identity,
		request.seconds,
		request.name
	);

	match request.action.as_str() {
		"subscribe" => {
			state.relay().subscribe(request.identity.clone()).map_err(|e| AppError::Internal(e.to_string()))?;

			Ok(Json(ControlResponse {
				identity: request.identity,
				content: vec![ContentItem::text(
					"Subscription activated. You will receive events and variables via SSE.",
				)],
			}))
		}
		"set" => match state.relay().set_timer(request.identity.clone(), request.seconds, request.name) {
			Ok(timer) => {
				// Echo the variable notification as text so callers
				// that parse it can use it.
				let echo = Notification::timer_variable(
					request.identity.clone(),
					&timer.id,
					&timer.name,
					timer.seconds,
				);
				let echo = serde_json::to_string(&echo).map_err(|e| AppError::Internal(e.to_string()))?;

				Ok(Json(ControlResponse {
					identity: request.identity,
					content: vec![
						ContentItem::text(format!(
							"Timer {} started for {} seconds.",
							timer.id, timer.seconds
						)),
						ContentItem::text(echo),
					],
				}))
			}
			Err(Error::MissingDuration) => Ok(Json(ControlResponse {
				identity: request.identity,
				content: vec![ContentItem::text("Error: missing seconds.")],
			})),
			Err(e) => Err(AppError::Internal(e.to_string())),
		},
		other => {
			tracing::debug!("Unknown control action: {}", other);
			Ok(Json(ControlResponse {
				identity: request.identity,
				content: vec![ContentItem::text("Unknown action")],
			}))
		}
	}
}

/// SSE endpoint: the single shared delivery channel.
///
/// Registers a fresh channel (replacing any prior one), emits one keep-alive
/// comment frame, then the flush output followed by live notifications.
/// Dropping the stream clears the relay's channel reference.
pub async fn handle_events(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
	tracing::info!("New SSE client connected");

	let frames = state.relay().connect().map(|payload| Ok(Event::default().data(payload)));
	let hello = stream::once(async { Ok(Event::default().comment("connected")) });

	Sse::new(hello.chain(frames)).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_control_request_deserialization() {
		let json = r#"{"action":"set","identity":"uuid-1","seconds":5,"name":"tea"}"#;
		let request: ControlRequest = serde_json::from_str(json).unwrap();
		assert_eq!(request.action, "set");
		assert_eq!(request.identity, Identity::new("uuid-1"));
		assert_eq!(request.seconds, Some(5.0));
		assert_eq!(request.name.as_deref(), Some("tea"));
	}

	#[test]
	fn test_control_request_optional_fields() {
		let json = r#"{"action":"subscribe","identity":"uuid-2"}"#;
		let request: ControlRequest = serde_json::from_str(json).unwrap();
		assert!(request.seconds.is_none());
		assert!(request.name.is_none());
	}

	#[test]
	fn test_content_item_serializes_type_field() {
		let item = ContentItem::text("hello");
		let json = serde_json::to_string(&item).unwrap();
		assert_eq!(json, r#"{"type":"text","text":"hello"}"#);
	}

	#[test]
	fn test_health_response_serialization() {
		let response = HealthResponse {
			status: "ok",
		};
		let json = serde_json::to_string(&response).unwrap();
		assert_eq!(json, r#"{"status":"ok"}"#);
	}
}
