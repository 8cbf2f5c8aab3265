// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Core data model for the Chime notification relay.
//!
//! This crate defines the types shared by the delivery core and the server
//! subsystems: opaque caller identities, notification payloads, the JSON-RPC
//! wire envelope, and the error taxonomy.

pub mod error;
pub mod identity;
pub mod notification;

pub use error::{Error, Result};
pub use identity::Identity;
pub use notification::{Envelope, EventBody, Notification, NotificationPayload};
