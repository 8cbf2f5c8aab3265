// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! The notification dispatcher.
//!
//! [`Relay`] is the owned service object constructed once at process start.
//! It coordinates the subscription registry, the pending queue, the timer
//! registry, and the delivery channel behind a single mutex, so each
//! operation (subscribe, set-timer, timer-fire, connect/flush) is atomic
//! with respect to the shared maps.

use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use chime_core::{Error, Identity, Notification, Result};
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use crate::{
	channel::{ChannelHandle, ChannelStream},
	config::RelayConfig,
	queue::PendingQueue,
	subscription::SubscriptionRegistry,
	timer::{TimerEntry, TimerRegistry},
};

/// Description of a newly created timer, echoed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSpec {
	/// Timer id: the user-supplied name verbatim, or a generated token.
	pub id: String,
	/// Display name carried in the timer's variable notification.
	pub name: String,
	/// Requested duration in seconds.
	pub seconds: f64,
}

/// State mutated only under the relay mutex.
struct RelayState {
	subscriptions: SubscriptionRegistry,
	pending: PendingQueue,
	channel: Option<ChannelHandle>,
}

/// The notification relay service.
///
/// Requires a tokio runtime: timer countdowns are spawned tasks.
pub struct Relay {
	state: Mutex<RelayState>,
	timers: TimerRegistry,
	channel_seq: AtomicU64,
	config: RelayConfig,
}

impl Relay {
	pub fn new(config: RelayConfig) -> Self {
		Self {
			state: Mutex::new(RelayState {
				subscriptions: SubscriptionRegistry::new(),
				pending: PendingQueue::new(),
				channel: None,
			}),
			timers: TimerRegistry::new(),
			channel_seq: AtomicU64::new(0),
			config,
		}
	}

	/// Register an identity and deliver-or-buffer its acknowledgement.
	///
	/// Idempotent with respect to membership; every call produces its own
	/// acknowledgement notification.
	pub fn subscribe(&self, identity: Identity) -> Result<()> {
		let wire = Notification::subscription_ack(identity.clone()).to_wire()?;

		let mut state = self.state.lock();
		if state.subscriptions.subscribe(identity.clone()) {
			tracing::info!("Identity {} subscribed", identity);
		} else {
			tracing::debug!("Identity {} re-subscribed", identity);
		}
		self.dispatch(&mut state, &identity, wire);
		Ok(())
	}

	/// Create a timer and dispatch the variable notification describing it.
	///
	/// `seconds` must be a positive number; anything else is a caller error
	/// and mutates nothing. The countdown starts only after the variable
	/// notification is dispatched, so the completion event can never precede
	/// it on the channel.
	pub fn set_timer(
		self: &Arc<Self>,
		identity: Identity,
		seconds: Option<f64>,
		name: Option<String>,
	) -> Result<TimerSpec> {
		let seconds = match seconds {
			Some(s) if s > 0.0 && s.is_finite() => s,
			_ => return Err(Error::MissingDuration),
		};

		let id = name.clone().unwrap_or_else(TimerRegistry::generate_id);
		let display_name = name.unwrap_or_else(|| id.clone());
		let wire = Notification::timer_variable(identity.clone(), &id, &display_name, seconds).to_wire()?;

		{
			let mut state = self.state.lock();
			self.dispatch(&mut state, &identity, wire);
		}

		let relay = Arc::clone(self);
		let fire_id = id.clone();
		let fire_identity = identity.clone();
		let (armed_tx, armed_rx) = oneshot::channel::<()>();
		let handle = tokio::spawn(async move {
			// The countdown arms only once the registry entry exists, so
			// expiry always finds and removes it, even for near-zero
			// durations.
			if armed_rx.await.is_err() {
				return;
			}
			tokio::time::sleep(Duration::from_secs_f64(seconds)).await;
			relay.fire_timer(&fire_id, &fire_identity, seconds);
		});
		self.timers.insert(id.clone(), TimerEntry::new(display_name.clone(), seconds, handle));
		let _ = armed_tx.send(());

		tracing::info!("Timer {} set for {}s by identity {}", id, seconds, identity);
		Ok(TimerSpec {
			id,
			name: display_name,
			seconds,
		})
	}

	/// Establish the delivery channel, replacing any prior one, and flush
	/// buffered notifications for subscribed identities.
	pub fn connect(self: &Arc<Self>) -> ChannelStream {
		let (tx, rx) = mpsc::channel(self.config.channel_capacity);
		let id = self.channel_seq.fetch_add(1, Ordering::Relaxed) + 1;

		let mut state = self.state.lock();
		state.channel = Some(ChannelHandle::new(id, tx));
		tracing::info!("Delivery channel {} established", id);
		self.flush(&mut state);
		drop(state);

		ChannelStream::new(id, rx, Arc::clone(self))
	}

	/// Null the delivery channel reference. Subscriptions and buffered
	/// notifications are untouched and await the next connect.
	pub fn disconnect(&self) {
		let mut state = self.state.lock();
		if state.channel.take().is_some() {
			tracing::info!("Delivery channel disconnected");
		}
	}

	/// Null the channel reference if `id` is still the current incarnation.
	/// Invoked when a [`ChannelStream`] is dropped.
	pub(crate) fn release_channel(&self, id: u64) {
		let mut state = self.state.lock();
		if state.channel.as_ref().map(|channel| channel.id()) == Some(id) {
			state.channel = None;
			tracing::info!("Delivery channel {} closed", id);
		}
	}

	/// Timer expiry: remove the timer, then deliver-or-buffer-or-discard the
	/// completion event. Fire-and-forget; subscription state is re-evaluated
	/// here, at fire time.
	fn fire_timer(&self, id: &str, identity: &Identity, seconds: f64) {
		self.timers.remove(id);
		tracing::debug!("Timer {} expired for identity {}", id, identity);

		match Notification::timer_finished(identity.clone(), id, seconds).to_wire() {
			Ok(wire) => {
				let mut state = self.state.lock();
				self.dispatch(&mut state, identity, wire);
			}
			Err(err) => {
				tracing::error!("Failed to encode completion event for timer {}: {}", id, err);
			}
		}
	}

	/// Deliver-or-buffer-or-discard, applied uniformly at every call site.
	///
	/// A write failure clears the channel reference and degrades to
	/// buffering; it never propagates to the caller of the triggering
	/// request.
	fn dispatch(&self, state: &mut RelayState, identity: &Identity, wire: String) {
		if !state.subscriptions.is_subscribed(identity) {
			tracing::debug!("Identity {} not subscribed, discarding notification", identity);
			return;
		}

		if let Some(channel) = &state.channel {
			match channel.try_write(wire) {
				Ok(()) => return,
				Err(wire) => {
					tracing::warn!("Channel write failed, buffering notification for {}", identity);
					state.channel = None;
					state.pending.append(identity.clone(), wire);
					return;
				}
			}
		}

		state.pending.append(identity.clone(), wire);
	}

	/// Flush buffered notifications to the freshly connected channel.
	///
	/// For every identity with pending payloads, in buffer insertion order:
	/// identities not currently subscribed are skipped, their entries left
	/// untouched. A subscribed identity's batch is drained as a whole and
	/// written in order. On a write failure the drained remainder is
	/// abandoned (at-most-once per flush pass), the channel is cleared, and
	/// the pass stops; identities not yet reached keep their buffers.
	fn flush(&self, state: &mut RelayState) {
		for identity in state.pending.identities() {
			if !state.subscriptions.is_subscribed(&identity) {
				continue;
			}

			let Some(channel) = state.channel.clone() else {
				return;
			};

			let batch = state.pending.drain(&identity);
			let total = batch.len();
			for (sent, wire) in batch.into_iter().enumerate() {
				if channel.try_write(wire).is_err() {
					tracing::warn!(
						"Flush write failed for {}; {} of {} payloads abandoned",
						identity,
						total - sent,
						total
					);
					state.channel = None;
					return;
				}
			}
			tracing::debug!("Flushed {} queued payloads for {}", total, identity);
		}
	}

	/// Whether the identity is a member of the subscription registry.
	pub fn is_subscribed(&self, identity: &Identity) -> bool {
		self.state.lock().subscriptions.is_subscribed(identity)
	}

	/// Number of subscribed identities.
	pub fn subscription_count(&self) -> usize {
		self.state.lock().subscriptions.len()
	}

	/// Number of payloads buffered for the identity.
	pub fn pending_count(&self, identity: &Identity) -> usize {
		self.state.lock().pending.len(identity)
	}

	/// Whether a delivery channel is currently live.
	pub fn is_connected(&self) -> bool {
		self.state.lock().channel.is_some()
	}

	/// Number of in-flight timers.
	pub fn timer_count(&self) -> usize {
		self.timers.len()
	}

	/// Abort an in-flight timer's countdown. Not reachable from any control
	/// action today; kept for a future cancel extension.
	pub fn cancel_timer(&self, id: &str) -> bool {
		self.timers.cancel(id)
	}
}

impl Default for Relay {
	fn default() -> Self {
		Self::new(RelayConfig::default())
	}
}
