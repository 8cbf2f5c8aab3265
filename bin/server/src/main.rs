// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Chime

use std::sync::Arc;

use chime_relay::{Relay, RelayConfig};
use chime_sub_api::Subsystem;
use chime_sub_server_http::{AppState, HttpConfig, HttpSubsystem};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let bind_addr = std::env::var("CHIME_BIND_ADDR").unwrap_or_else(|_| HttpConfig::default().bind_addr);

	let relay = Arc::new(Relay::new(RelayConfig::default()));
	let state = AppState::new(relay);

	let mut http = HttpSubsystem::new(
		HttpConfig {
			bind_addr,
		},
		state,
	);
	http.start().await.unwrap();

	tracing::info!("Chime relay running on {}", http.local_addr().unwrap());
	tracing::info!("POST http://{}/mcp", http.local_addr().unwrap());
	tracing::info!("GET  http://{}/sse", http.local_addr().unwrap());

	tokio::signal::ctrl_c().await.unwrap();

	tracing::info!("Shutting down...");
	http.shutdown().await.unwrap();
}
