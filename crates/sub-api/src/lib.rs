// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Subsystem API crate providing common interfaces for Chime subsystems.
//!
//! This crate contains the lifecycle trait that server subsystems implement
//! so the process entry point can start, monitor, and shut them down
//! uniformly.

pub mod subsystem;

pub use subsystem::{HealthStatus, Subsystem};
