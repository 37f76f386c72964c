//! Shared runtime plumbing for the book store and counter services.
//!
//! # Overview
//! Both services are small axum apps that own a single piece of in-memory
//! state. Everything that is not that state lives here: environment-driven
//! bind configuration, tracing setup, the per-request trace layer, the
//! `/openapi.json` route and the serve loop with graceful shutdown.
//!
//! # Design
//! - Service crates expose `app()` / `run(listener)` and keep `main` thin;
//!   `main` only loads `.env`, initializes logging, reads `ServerConfig` and
//!   binds.
//! - Nothing in this crate knows about books or counters.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError};
