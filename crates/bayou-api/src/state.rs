//! Shared application state for the API server.

use bayou_core::{CannedOracle, Engine, InMemorySessionStore};

/// The engine as served over HTTP: in-memory sessions, offline oracle.
pub type BayouEngine = Engine<InMemorySessionStore, CannedOracle>;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The engine does its own per-player locking, so handlers
/// never take a lock here.
pub struct AppState {
    /// The game engine.
    pub engine: BayouEngine,
}

impl AppState {
    /// Wrap an engine.
    pub const fn new(engine: BayouEngine) -> Self {
        Self { engine }
    }
}
