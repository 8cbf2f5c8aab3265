// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

//! HTTP server subsystem for the Chime notification relay.
//!
//! This crate provides an Axum-based HTTP server exposing the relay's
//! control boundary and its streaming delivery channel. It implements the
//! standard Chime `Subsystem` trait for lifecycle management.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /mcp` - Control requests (subscribe, set-timer)
//! - `GET /sse` - The single shared Server-Sent Events delivery channel

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod subsystem;

pub use config::HttpConfig;
pub use error::{AppError, ErrorResponse};
pub use handlers::{ContentItem, ControlRequest, ControlResponse};
pub use routes::router;
pub use state::AppState;
pub use subsystem::HttpSubsystem;
