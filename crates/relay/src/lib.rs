// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Delivery core of the Chime notification relay.
//!
//! The relay guarantees that no notification destined for a subscribed
//! identity is silently dropped because the streaming connection was
//! momentarily absent, while never delivering to identities that never
//! subscribed. Four parts cooperate:
//!
//! - [`SubscriptionRegistry`] - identities entitled to receive notifications
//! - [`PendingQueue`] - per-identity FIFO of wire payloads buffered while no
//!   live channel exists
//! - [`TimerRegistry`] - in-flight countdowns that emit completion events
//! - [`Relay`] - the dispatcher coordinating the above with the single
//!   shared delivery channel
//!
//! All shared state lives behind one mutex inside [`Relay`]; every operation
//! runs to completion under the lock, so the dispatch and flush algorithms
//! never observe a mid-operation mutation.

pub mod channel;
pub mod config;
pub mod queue;
pub mod relay;
pub mod subscription;
pub mod timer;

pub use channel::ChannelStream;
pub use config::RelayConfig;
pub use queue::PendingQueue;
pub use relay::{Relay, TimerSpec};
pub use subscription::SubscriptionRegistry;
pub use timer::{TimerEntry, TimerRegistry};
