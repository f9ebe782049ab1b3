//! # estimate_server - HTTP front end for Tantya
//!
//! A thin JSON API over `estimate_core`: the catalog is loaded once at
//! start-up and shared read-only between requests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_level`. Can only be called once.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
