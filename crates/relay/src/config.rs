// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Relay configuration.

/// Configuration for the delivery core.
#[derive(Debug, Clone)]
pub struct RelayConfig {
	/// Capacity of the delivery channel. A full channel is treated as a
	/// write failure, never a block; writes then fall back to buffering.
	pub channel_capacity: usize,
}

impl Default for RelayConfig {
	fn default() -> Self {
		Self {
			channel_capacity: 256,
		}
	}
}
