//! Reward/state engine for Cyber Bayou.
//!
//! This crate owns every gameplay rule: how an NFC scan resolves, what a
//! venue check-in pays, how the slot reels settle, when lore unlocks, and
//! how the friend graph changes. It also owns the multi-player registry
//! that serializes operations per player and persists their state.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `bayou-config.yaml` into
//!   strongly-typed structs.
//! - [`chance`] -- [`Chance`] trait, [`RngChance`] and [`ScriptedChance`].
//! - [`oracle`] -- [`FlavorOracle`] trait, timeout and fallback handling.
//! - [`state`] -- [`PlayerState`], the persisted per-player record.
//! - [`session`] -- [`BayouSession`], the single-player engine.
//! - [`store`] -- [`SessionStore`] trait and the in-memory store.
//! - [`engine`] -- [`Engine`], the per-player session registry.
//! - [`error`] -- [`EngineError`].

pub mod chance;
pub mod config;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod session;
pub mod state;
pub mod store;

pub use chance::{Chance, RngChance, ScriptedChance};
pub use config::{BayouConfig, ConfigError};
pub use engine::{ChanceFactory, Engine};
pub use error::EngineError;
pub use oracle::{CannedOracle, FlavorOracle, OracleError, SilentOracle, generate_flavor};
pub use session::{BayouSession, SpinOutcome};
pub use state::PlayerState;
pub use store::{InMemorySessionStore, SessionStore, StoreError};
