// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! HTTP subsystem configuration.

/// Configuration for the HTTP subsystem.
#[derive(Debug, Clone)]
pub struct HttpConfig {
	/// Address and port to bind to (e.g. "127.0.0.1:3001").
	pub bind_addr: String,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			bind_addr: "127.0.0.1:3001".to_string(),
		}
	}
}
