// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! Subsystem lifecycle trait and health reporting.

use std::any::Any;

use async_trait::async_trait;

/// Health of a running subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
	/// Operating normally.
	Healthy,
	/// Operating, but degraded or still starting.
	Warning {
		description: String,
	},
	/// Not operating.
	Failed {
		description: String,
	},
}

/// Lifecycle interface implemented by server subsystems.
#[async_trait]
pub trait Subsystem: Send + Sync {
	/// Short name used in logs.
	fn name(&self) -> &'static str;

	/// Start the subsystem. Idempotent: starting a running subsystem is a
	/// no-op returning success.
	async fn start(&mut self) -> chime_core::Result<()>;

	/// Gracefully stop the subsystem, waiting for in-flight work to finish.
	async fn shutdown(&mut self) -> chime_core::Result<()>;

	fn is_running(&self) -> bool;

	fn health_status(&self) -> HealthStatus;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}
