// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! The single shared delivery channel.
//!
//! At most one channel is live at any moment; it is not owned by any
//! identity. The relay holds the sending half, the streaming endpoint
//! consumes the [`ChannelStream`]. A full or closed channel is a write
//! failure, never a block.

use std::{
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};

use futures_util::Stream;
use tokio::sync::mpsc;

use crate::relay::Relay;

/// Sending half of the delivery channel, stored in the relay state.
#[derive(Debug, Clone)]
pub(crate) struct ChannelHandle {
	id: u64,
	tx: mpsc::Sender<String>,
}

impl ChannelHandle {
	pub(crate) fn new(id: u64, tx: mpsc::Sender<String>) -> Self {
		Self {
			id,
			tx,
		}
	}

	pub(crate) fn id(&self) -> u64 {
		self.id
	}

	/// Attempt a non-blocking write. On failure the payload is handed back
	/// so the caller can fall back to buffering.
	pub(crate) fn try_write(&self, payload: String) -> Result<(), String> {
		self.tx.try_send(payload).map_err(|err| err.into_inner())
	}
}

/// Receiving half of the delivery channel, handed to the streaming endpoint.
///
/// Yields wire payloads in delivery order. Dropping the stream clears the
/// relay's channel reference, but only if this stream is still the current
/// one; a replacement connect is never nulled by a stale stream going away.
pub struct ChannelStream {
	id: u64,
	rx: mpsc::Receiver<String>,
	relay: Arc<Relay>,
}

impl ChannelStream {
	pub(crate) fn new(id: u64, rx: mpsc::Receiver<String>, relay: Arc<Relay>) -> Self {
		Self {
			id,
			rx,
			relay,
		}
	}

	/// Identifier of this channel incarnation.
	pub fn channel_id(&self) -> u64 {
		self.id
	}
}

impl Stream for ChannelStream {
	type Item = String;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		self.rx.poll_recv(cx)
	}
}

impl Drop for ChannelStream {
	fn drop(&mut self) {
		self.relay.release_channel(self.id);
	}
}
