// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Notification payloads and the JSON-RPC wire envelope.
//!
//! Every notification pushed over the delivery channel is framed as a
//! JSON-RPC `notifications/message` envelope whose params carry the owning
//! identity, a `mcpType` discriminator, and the type-specific body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Identity, Result};

/// JSON-RPC version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC method used for pushed notifications.
pub const NOTIFICATION_METHOD: &str = "notifications/message";

/// Event key used for subscription acknowledgements.
pub const SUBSCRIPTION_ACK_KEY: &str = "subscription-ack";

/// Event name used for subscription acknowledgements.
pub const SUBSCRIPTION_STARTED: &str = "subscription.started";

/// Event name emitted when a timer fires.
pub const TIMER_FINISHED: &str = "timer.finished";

/// A notification destined for one identity. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
	/// The identity this notification belongs to.
	pub identity: Identity,
	#[serde(flatten)]
	pub payload: NotificationPayload,
}

/// The type-specific body of a notification.
///
/// Discriminated by the `mcpType` field in JSON:
/// - `"event"` - a named occurrence with a human-readable message
/// - `"variable"` - a structured value update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mcpType", rename_all = "lowercase")]
pub enum NotificationPayload {
	Event {
		event: EventBody,
	},
	Variable {
		name: String,
		value: Value,
	},
}

/// Body of an `event` notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
	pub key: String,
	pub name: String,
	pub message: String,
}

/// The JSON-RPC envelope written to the delivery channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
	pub jsonrpc: String,
	pub method: String,
	pub params: Notification,
}

impl Notification {
	/// Construct an `event` notification.
	pub fn event(
		identity: Identity,
		key: impl Into<String>,
		name: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self {
			identity,
			payload: NotificationPayload::Event {
				event: EventBody {
					key: key.into(),
					name: name.into(),
					message: message.into(),
				},
			},
		}
	}

	/// Construct a `variable` notification.
	pub fn variable(identity: Identity, name: impl Into<String>, value: Value) -> Self {
		Self {
			identity,
			payload: NotificationPayload::Variable {
				name: name.into(),
				value,
			},
		}
	}

	/// The subscription acknowledgement sent in response to a subscribe.
	pub fn subscription_ack(identity: Identity) -> Self {
		Self::event(
			identity,
			SUBSCRIPTION_ACK_KEY,
			SUBSCRIPTION_STARTED,
			"Subscription successfully activated via SSE",
		)
	}

	/// The variable update describing a newly created timer.
	pub fn timer_variable(identity: Identity, timer_id: &str, display_name: &str, seconds: f64) -> Self {
		Self::variable(
			identity,
			timer_id,
			serde_json::json!({ "name": display_name, "seconds": seconds }),
		)
	}

	/// The event emitted when a timer fires.
	pub fn timer_finished(identity: Identity, timer_id: &str, seconds: f64) -> Self {
		Self::event(
			identity,
			timer_id,
			TIMER_FINISHED,
			format!("RING! Timer {} ({}s) expired!", timer_id, seconds),
		)
	}

	/// Wrap this notification in its JSON-RPC envelope.
	pub fn into_envelope(self) -> Envelope {
		Envelope {
			jsonrpc: JSONRPC_VERSION.to_string(),
			method: NOTIFICATION_METHOD.to_string(),
			params: self,
		}
	}

	/// Serialize the enveloped notification to its compact wire form.
	///
	/// This is the exact string buffered in the pending queue and written as
	/// one SSE `data:` frame.
	pub fn to_wire(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.clone().into_envelope())?)
	}
}
