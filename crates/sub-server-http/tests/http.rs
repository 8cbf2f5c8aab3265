// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Router-level tests for the control and streaming endpoints.

use std::{sync::Arc, time::Duration};

use axum::{
	body::{Body, to_bytes},
	http::{Request, StatusCode, header},
};
use chime_relay::Relay;
use chime_sub_server_http::{AppState, ControlResponse, HttpConfig, HttpSubsystem, router};
use chime_sub_api::Subsystem;
use futures_util::StreamExt;
use tower::ServiceExt;

fn test_state() -> (Arc<Relay>, AppState) {
	let relay = Arc::new(Relay::default());
	let state = AppState::new(relay.clone());
	(relay, state)
}

fn control_request(body: &str) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/mcp")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

async fn control_response(response: axum::response::Response) -> ControlResponse {
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
	let (_, state) = test_state();
	let app = router(state);

	let response =
		app.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_subscribe_returns_confirmation_and_registers() {
	let (relay, state) = test_state();
	let app = router(state);

	let response = app
		.oneshot(control_request(r#"{"action":"subscribe","identity":"uuid-1"}"#))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let body = control_response(response).await;
	assert_eq!(body.identity.as_str(), "uuid-1");
	assert!(body.content[0].text.contains("Subscription activated"));

	assert!(relay.is_subscribed(&"uuid-1".into()));
	// Ack buffered: no channel was live.
	assert_eq!(relay.pending_count(&"uuid-1".into()), 1);
}

#[tokio::test]
async fn test_set_timer_echoes_variable_notification() {
	let (relay, state) = test_state();
	let app = router(state);

	let response = app
		.oneshot(control_request(
			r#"{"action":"set","identity":"uuid-2","seconds":5,"name":"tea"}"#,
		))
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let body = control_response(response).await;
	assert!(body.content[0].text.contains("Timer tea started for 5 seconds."));

	let echo: serde_json::Value = serde_json::from_str(&body.content[1].text).unwrap();
	assert_eq!(echo["identity"], "uuid-2");
	assert_eq!(echo["mcpType"], "variable");
	assert_eq!(echo["name"], "tea");
	assert_eq!(echo["value"]["name"], "tea");
	assert_eq!(echo["value"]["seconds"], 5.0);

	assert_eq!(relay.timer_count(), 1);
}

#[tokio::test]
async fn test_set_without_seconds_is_payload_error_without_mutation() {
	let (relay, state) = test_state();
	let app = router(state);

	let response =
		app.oneshot(control_request(r#"{"action":"set","identity":"uuid-3"}"#)).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let body = control_response(response).await;
	assert_eq!(body.content[0].text, "Error: missing seconds.");

	assert_eq!(relay.timer_count(), 0);
	assert_eq!(relay.pending_count(&"uuid-3".into()), 0);
}

#[tokio::test]
async fn test_unknown_action_is_payload_error_without_mutation() {
	let (relay, state) = test_state();
	let app = router(state);

	let response =
		app.oneshot(control_request(r#"{"action":"cancel","identity":"uuid-4"}"#)).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let body = control_response(response).await;
	assert_eq!(body.content[0].text, "Unknown action");

	assert_eq!(relay.subscription_count(), 0);
	assert_eq!(relay.timer_count(), 0);
}

#[tokio::test]
async fn test_sse_endpoint_opens_stream_with_keepalive_comment() {
	let (relay, state) = test_state();
	let app = router(state);

	let response =
		app.oneshot(Request::builder().uri("/sse").body(Body::empty()).unwrap()).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
	assert_eq!(content_type, "text/event-stream");
	assert!(relay.is_connected());

	let mut body = response.into_body().into_data_stream();
	let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
		.await
		.expect("timed out waiting for the keep-alive comment")
		.expect("stream ended")
		.expect("stream errored");
	assert!(String::from_utf8_lossy(&chunk).contains("connected"));
}

#[tokio::test]
async fn test_sse_delivers_buffered_notifications_after_comment() {
	let (relay, state) = test_state();
	let app = router(state);

	relay.subscribe("uuid-5".into()).unwrap();

	let response =
		app.oneshot(Request::builder().uri("/sse").body(Body::empty()).unwrap()).await.unwrap();

	let mut body = response.into_body().into_data_stream();
	let mut collected = String::new();
	while !collected.contains("subscription.started") {
		let chunk = tokio::time::timeout(Duration::from_secs(2), body.next())
			.await
			.expect("timed out waiting for the flushed ack")
			.expect("stream ended")
			.expect("stream errored");
		collected.push_str(&String::from_utf8_lossy(&chunk));
	}

	let comment_at = collected.find("connected").unwrap();
	let ack_at = collected.find("subscription.started").unwrap();
	assert!(comment_at < ack_at, "comment frame must precede the flushed ack");
	assert!(collected.contains("data:"));
}

#[tokio::test]
async fn test_subsystem_lifecycle() {
	let (_, state) = test_state();
	let mut http = HttpSubsystem::new(
		HttpConfig {
			bind_addr: "127.0.0.1:0".to_string(),
		},
		state,
	);

	http.start().await.unwrap();
	assert!(http.port().is_some());

	// The running flag is set by the server task.
	let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
	while !http.is_running() && tokio::time::Instant::now() < deadline {
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	assert!(http.is_running());

	// Starting again is a no-op.
	http.start().await.unwrap();

	http.shutdown().await.unwrap();
	assert!(!http.is_running());
}
