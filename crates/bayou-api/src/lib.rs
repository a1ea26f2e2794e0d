//! HTTP API for Cyber Bayou.
//!
//! This crate exposes the reward/state engine to the mobile web client
//! over a JSON REST API built on Axum. Every route is a thin wrapper over
//! one [`Engine`](bayou_core::Engine) operation; the engine owns all
//! locking and persistence.
//!
//! Errors come back as `{"error": "...", "status": <code>}`: unknown
//! players are 404, invalid registrations are 400, bets over the balance
//! are 409, store failures are 500.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{HttpError, serve, start_server};
pub use state::{AppState, BayouEngine};
