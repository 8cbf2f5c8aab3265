// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Error taxonomy for the relay.
//!
//! Caller input errors are surfaced in the response payload of the triggering
//! request; delivery write failures are recovered locally by buffering and
//! never reach this type. Nothing here is fatal to the process.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// A set-timer request without a positive duration. No state mutation
	/// occurs.
	#[error("missing seconds")]
	MissingDuration,

	/// A control request naming an action the relay does not know.
	#[error("unknown action: {0}")]
	UnknownAction(String),

	/// Notification encoding failed. In the fire-and-forget timer path this
	/// is logged and the notification skipped.
	#[error("notification encoding failed: {0}")]
	Encode(#[from] serde_json::Error),

	/// The server subsystem could not bind its listener.
	#[error("failed to bind {addr}: {source}")]
	Bind {
		addr: String,
		#[source]
		source: std::io::Error,
	},

	/// The bound listener address could not be determined.
	#[error("listener address unavailable: {0}")]
	AddressUnavailable(#[source] std::io::Error),
}
