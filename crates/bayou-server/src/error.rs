//! Error types for the server binary.
//!
//! [`ServerError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: bayou_core::ConfigError,
    },

    /// Launch content failed validation.
    #[error("content error: {source}")]
    Content {
        /// The underlying world error.
        #[from]
        source: bayou_world::WorldError,
    },

    /// Seeding the demo player failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: bayou_core::EngineError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("http error: {source}")]
    Http {
        /// The underlying server error.
        #[from]
        source: bayou_api::HttpError,
    },
}
