// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Timer registry tracking in-flight countdowns.
//!
//! A timer is created on a set request and removed exactly once, at fire
//! time, whether or not its completion event was deliverable. The countdown
//! handle is kept so a future cancel action can abort it; no external
//! operation invokes cancellation today.

use dashmap::DashMap;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// State tracked for one in-flight timer.
#[derive(Debug)]
pub struct TimerEntry {
	/// Display name echoed in the timer's variable notification.
	pub name: String,
	/// Duration in (possibly fractional) seconds.
	pub seconds: f64,
	/// Handle of the countdown task.
	pub handle: JoinHandle<()>,
}

impl TimerEntry {
	pub fn new(name: String, seconds: f64, handle: JoinHandle<()>) -> Self {
		Self {
			name,
			seconds,
			handle,
		}
	}
}

/// Registry of in-flight timers, keyed by timer id.
#[derive(Debug, Default)]
pub struct TimerRegistry {
	timers: DashMap<String, TimerEntry>,
}

impl TimerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Generate a fresh timer id, prefixed to distinguish it from
	/// user-supplied names. Unique per call.
	pub fn generate_id() -> String {
		format!("timer-{}", Uuid::new_v4())
	}

	/// Track a timer. A colliding id silently replaces the tracked entry;
	/// the shadowed countdown keeps running and still fires.
	pub fn insert(&self, id: String, entry: TimerEntry) {
		self.timers.insert(id, entry);
	}

	/// Stop tracking a timer. Called at fire time.
	pub fn remove(&self, id: &str) -> Option<TimerEntry> {
		self.timers.remove(id).map(|(_, entry)| entry)
	}

	/// Abort a timer's countdown and stop tracking it.
	///
	/// Returns false if the id is unknown.
	pub fn cancel(&self, id: &str) -> bool {
		match self.remove(id) {
			Some(entry) => {
				entry.handle.abort();
				tracing::debug!("Cancelled timer {}", id);
				true
			}
			None => false,
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.timers.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.timers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.timers.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_ids_are_distinct_and_prefixed() {
		let a = TimerRegistry::generate_id();
		let b = TimerRegistry::generate_id();

		assert!(a.starts_with("timer-"));
		assert!(b.starts_with("timer-"));
		assert_ne!(a, b);
	}

	#[tokio::test]
	async fn test_insert_replaces_colliding_id() {
		let registry = TimerRegistry::new();

		registry.insert("tea".to_string(), TimerEntry::new("tea".to_string(), 1.0, tokio::spawn(async {})));
		registry.insert("tea".to_string(), TimerEntry::new("tea".to_string(), 9.0, tokio::spawn(async {})));

		assert_eq!(registry.len(), 1);
		let entry = registry.remove("tea").unwrap();
		assert_eq!(entry.seconds, 9.0);
	}

	#[tokio::test]
	async fn test_cancel_aborts_and_removes() {
		let registry = TimerRegistry::new();
		let handle = tokio::spawn(async {
			tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
		});

		registry.insert("long".to_string(), TimerEntry::new("long".to_string(), 3600.0, handle));

		assert!(registry.cancel("long"));
		assert!(!registry.contains("long"));
		assert!(!registry.cancel("long"));
	}
}
