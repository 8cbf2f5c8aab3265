// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Router assembly for the HTTP subsystem.

use axum::{
	Router,
	routing::{get, post},
};

use crate::{
	handlers::{handle_control, handle_events, health},
	state::AppState,
};

/// Build the HTTP router with all endpoints.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/mcp", post(handle_control))
		.route("/sse", get(handle_events))
		.with_state(state)
}
