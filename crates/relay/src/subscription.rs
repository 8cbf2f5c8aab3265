// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Subscription registry tracking identities entitled to notifications.
//!
//! Membership is monotonic for the process lifetime: there is no unsubscribe
//! operation, and subscriptions survive delivery channel disconnects.

use std::collections::HashSet;

use chime_core::Identity;

/// Set of identities that have issued a subscribe request.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
	identities: HashSet<Identity>,
}

impl SubscriptionRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an identity to the registry.
	///
	/// Idempotent; returns false if the identity was already subscribed.
	pub fn subscribe(&mut self, identity: Identity) -> bool {
		self.identities.insert(identity)
	}

	pub fn is_subscribed(&self, identity: &Identity) -> bool {
		self.identities.contains(identity)
	}

	pub fn len(&self) -> usize {
		self.identities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.identities.is_empty()
	}
}
