// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Opaque caller identity.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque, externally supplied token scoping subscriptions and notifications.
///
/// The relay never creates or destroys identities; they exist only as keys in
/// the registries. Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for Identity {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl From<String> for Identity {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Identity {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}
