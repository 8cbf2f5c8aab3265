// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Shared application state for HTTP handlers.

use std::sync::Arc;

use chime_relay::Relay;

/// State shared by all HTTP handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
	relay: Arc<Relay>,
}

impl AppState {
	pub fn new(relay: Arc<Relay>) -> Self {
		Self {
			relay,
		}
	}

	pub fn relay(&self) -> &Arc<Relay> {
		&self.relay
	}
}
