// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Per-identity pending notification queue.
//!
//! Wire payloads generated while no live delivery channel exists are buffered
//! here, FIFO per identity with no dedup. A batch is removed only as a whole,
//! when the flush protocol drains it; identities iterate in insertion order,
//! matching the order in which their first payload was buffered.

use std::collections::VecDeque;

use chime_core::Identity;
use indexmap::IndexMap;

/// Ordered buffer of serialized notification payloads, keyed by identity.
#[derive(Debug, Default)]
pub struct PendingQueue {
	queues: IndexMap<Identity, VecDeque<String>>,
}

impl PendingQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a payload to the identity's buffer. Insertion order is
	/// delivery order.
	pub fn append(&mut self, identity: Identity, payload: String) {
		self.queues.entry(identity).or_default().push_back(payload);
	}

	/// Remove and return the identity's whole batch, in insertion order.
	///
	/// Returns an empty vec if nothing is buffered for the identity.
	pub fn drain(&mut self, identity: &Identity) -> Vec<String> {
		self.queues.shift_remove(identity).map(|queue| queue.into_iter().collect()).unwrap_or_default()
	}

	/// Whether the identity has no buffered payloads.
	pub fn is_empty(&self, identity: &Identity) -> bool {
		self.queues.get(identity).is_none_or(|queue| queue.is_empty())
	}

	/// Number of payloads buffered for the identity.
	pub fn len(&self, identity: &Identity) -> usize {
		self.queues.get(identity).map(|queue| queue.len()).unwrap_or(0)
	}

	/// Identities with buffered payloads, in insertion order.
	pub fn identities(&self) -> Vec<Identity> {
		self.queues.keys().cloned().collect()
	}

	/// Total number of buffered payloads across all identities.
	pub fn total(&self) -> usize {
		self.queues.values().map(|queue| queue.len()).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_append_drain_preserves_order() {
		let mut queue = PendingQueue::new();
		let identity = Identity::new("a");

		queue.append(identity.clone(), "one".to_string());
		queue.append(identity.clone(), "two".to_string());
		queue.append(identity.clone(), "three".to_string());

		assert_eq!(queue.len(&identity), 3);
		assert_eq!(queue.drain(&identity), vec!["one", "two", "three"]);
		assert!(queue.is_empty(&identity));
	}

	#[test]
	fn test_drain_removes_whole_batch() {
		let mut queue = PendingQueue::new();
		let identity = Identity::new("a");

		queue.append(identity.clone(), "x".to_string());
		queue.drain(&identity);

		assert_eq!(queue.drain(&identity), Vec::<String>::new());
		assert_eq!(queue.total(), 0);
	}

	#[test]
	fn test_identities_in_insertion_order() {
		let mut queue = PendingQueue::new();
		queue.append(Identity::new("b"), "1".to_string());
		queue.append(Identity::new("a"), "2".to_string());
		queue.append(Identity::new("b"), "3".to_string());
		queue.append(Identity::new("c"), "4".to_string());

		let identities = queue.identities();
		assert_eq!(identities, vec![Identity::new("b"), Identity::new("a"), Identity::new("c")]);
	}

	#[test]
	fn test_no_dedup() {
		let mut queue = PendingQueue::new();
		let identity = Identity::new("a");

		queue.append(identity.clone(), "same".to_string());
		queue.append(identity.clone(), "same".to_string());

		assert_eq!(queue.drain(&identity), vec!["same", "same"]);
	}
}
