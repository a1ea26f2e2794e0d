//! The multi-player engine: a registry of per-user sessions.
//!
//! [`Engine`] owns the shared content tables, the economy and oracle
//! settings, a [`SessionStore`], and a [`FlavorOracle`]. Each player's
//! [`BayouSession`] sits behind its own `tokio` mutex, so operations for
//! one player are serialized while different players proceed in parallel.
//!
//! Every mutating call holds the player's lock for the whole
//! check-then-mutate sequence and saves the new [`PlayerState`] before
//! releasing it. An operation that fails, or whose save fails, is rolled
//! back to the state it started from. Slot flavor text is requested only
//! after the lock is released.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use bayou_types::{
    DiscoverableUser, LedgerEntry, LoreEntry, LoreId, NewLoreEntry, ScanResponse, SlotResult,
    SlotSymbol, TagId, User, UserId, Venue, VenueId,
};
use bayou_world::ContentTables;

use crate::chance::{Chance, RngChance};
use crate::config::{BayouConfig, EconomyConfig, LedgerConfig, OracleConfig};
use crate::error::EngineError;
use crate::oracle::{FlavorOracle, generate_flavor};
use crate::session::BayouSession;
use crate::state::PlayerState;
use crate::store::SessionStore;

/// Builds the randomness source for a newly opened session.
pub type ChanceFactory = Arc<dyn Fn(&UserId) -> Box<dyn Chance> + Send + Sync>;

type SessionHandle = Arc<Mutex<BayouSession>>;

/// Highest trust score a player can hold.
pub const MAX_TRUST_SCORE: u8 = 100;

/// The shared game engine.
pub struct Engine<S, O> {
    content: Arc<ContentTables>,
    economy: EconomyConfig,
    ledger: LedgerConfig,
    oracle_config: OracleConfig,
    store: S,
    oracle: O,
    chance: ChanceFactory,
    sessions: Mutex<BTreeMap<UserId, SessionHandle>>,
}

impl<S: SessionStore, O: FlavorOracle> Engine<S, O> {
    /// Build an engine from config.
    ///
    /// With `rng.seed` set, each session's generator is seeded from the
    /// configured seed and its user id, so runs are reproducible.
    pub fn new(content: ContentTables, config: &BayouConfig, store: S, oracle: O) -> Self {
        let chance: ChanceFactory = match config.rng.seed {
            Some(seed) => Arc::new(move |user: &UserId| {
                Box::new(RngChance::seeded(seed_for(seed, user))) as Box<dyn Chance>
            }),
            None => Arc::new(|_: &UserId| Box::new(RngChance::from_entropy()) as Box<dyn Chance>),
        };

        Self {
            content: Arc::new(content),
            economy: config.economy,
            ledger: config.ledger,
            oracle_config: config.oracle.clone(),
            store,
            oracle,
            chance,
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Replace the randomness source used for sessions opened from now on.
    #[must_use]
    pub fn with_chance(mut self, factory: ChanceFactory) -> Self {
        self.chance = factory;
        self
    }

    /// The shared content tables.
    pub const fn content(&self) -> &Arc<ContentTables> {
        &self.content
    }

    /// The session store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Registry
    // -----------------------------------------------------------------------

    /// Register a new player with fresh state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidUser`] if the profile breaks the user
    /// invariants, [`EngineError::AlreadyRegistered`] if the id is taken,
    /// or [`EngineError::Store`] if the store fails.
    pub async fn register(&self, user: User) -> Result<User, EngineError> {
        validate_user(&user)?;

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&user.id) || self.store.load(&user.id)?.is_some() {
            return Err(EngineError::AlreadyRegistered(user.id));
        }

        let state = PlayerState::new(user, &self.content);
        self.store.save(&state)?;
        let snapshot = state.user.clone();
        let session = self.open(state);
        sessions.insert(snapshot.id.clone(), Arc::new(Mutex::new(session)));

        info!(user = %snapshot.id, balance = snapshot.fux_balance, "player registered");
        Ok(snapshot)
    }

    /// All registered user ids.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store fails.
    pub fn players(&self) -> Result<Vec<UserId>, EngineError> {
        Ok(self.store.list()?)
    }

    fn open(&self, state: PlayerState) -> BayouSession {
        let chance = (self.chance)(&state.user.id);
        BayouSession::new(state, Arc::clone(&self.content), self.economy, chance)
    }

    async fn session(&self, user: &UserId) -> Result<SessionHandle, EngineError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(handle) = sessions.get(user) {
            return Ok(Arc::clone(handle));
        }

        let state = self
            .store
            .load(user)?
            .ok_or_else(|| EngineError::UnknownUser(user.clone()))?;
        debug!(%user, "session resumed from store");
        let handle = Arc::new(Mutex::new(self.open(state)));
        sessions.insert(user.clone(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Run a mutating operation under the player's lock and persist the
    /// result. Failed operations leave state untouched and save nothing.
    async fn mutate<T>(
        &self,
        user: &UserId,
        op: impl FnOnce(&mut BayouSession) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let handle = self.session(user).await?;
        let mut session = handle.lock().await;
        let snapshot = session.state().clone();

        let result = self.commit(&mut session, op);
        if result.is_err() {
            session.restore(snapshot);
        }
        result
    }

    fn commit<T>(
        &self,
        session: &mut BayouSession,
        op: impl FnOnce(&mut BayouSession) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let out = op(session)?;
        session.compact_ledger(self.ledger.max_entries);
        if let Err(e) = self.store.save(session.state()) {
            error!(user = %session.state().user.id, error = %e, "failed to persist player state");
            return Err(e.into());
        }
        Ok(out)
    }

    async fn read<T>(
        &self,
        user: &UserId,
        op: impl FnOnce(&BayouSession) -> T,
    ) -> Result<T, EngineError> {
        let handle = self.session(user).await?;
        let session = handle.lock().await;
        Ok(op(&session))
    }

    // -----------------------------------------------------------------------
    // Content reads
    // -----------------------------------------------------------------------

    /// All venues.
    pub fn venues(&self) -> Vec<Venue> {
        self.content.venues().to_vec()
    }

    /// The slot symbol table.
    pub fn symbols(&self) -> Vec<SlotSymbol> {
        self.content.symbols().symbols().to_vec()
    }

    // -----------------------------------------------------------------------
    // Player operations
    // -----------------------------------------------------------------------

    /// Snapshot of a player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn user(&self, user: &UserId) -> Result<User, EngineError> {
        self.read(user, BayouSession::user).await
    }

    /// Resolve a scanned NFC tag for a player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn scan_tag(&self, user: &UserId, tag: &TagId) -> Result<ScanResponse, EngineError> {
        self.mutate(user, |s| s.scan_tag(tag)).await
    }

    /// Spin the slots.
    ///
    /// The wallet is settled under the player's lock; flavor text is
    /// fetched afterwards and falls back to the configured line on any
    /// oracle failure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientFunds`] if the bet exceeds the
    /// balance, and [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn spin_slots(&self, user: &UserId, bet: u64) -> Result<SlotResult, EngineError> {
        let outcome = self.mutate(user, |s| s.spin_reels(bet)).await?;
        let message =
            generate_flavor(&self.oracle, &outcome.flavor_prompt(), &self.oracle_config).await;
        Ok(outcome.into_result(message))
    }

    /// Flip a player's location sharing and return the new value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn toggle_visibility(&self, user: &UserId) -> Result<bool, EngineError> {
        self.mutate(user, |s| Ok(s.toggle_visibility())).await
    }

    /// A player's lore journal, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn lore(&self, user: &UserId) -> Result<Vec<LoreEntry>, EngineError> {
        self.read(user, BayouSession::lore).await
    }

    /// Unlock a lore entry for a player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn unlock_lore(
        &self,
        user: &UserId,
        lore: &LoreId,
    ) -> Result<Option<LoreId>, EngineError> {
        self.mutate(user, |s| Ok(s.unlock_lore(lore))).await
    }

    /// Add an entry to the front of a player's journal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn add_lore_entry(
        &self,
        user: &UserId,
        entry: NewLoreEntry,
    ) -> Result<Vec<LoreEntry>, EngineError> {
        self.mutate(user, |s| Ok(s.add_lore_entry(entry))).await
    }

    /// Venues a player has checked in to.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn visited_venues(&self, user: &UserId) -> Result<Vec<VenueId>, EngineError> {
        self.read(user, BayouSession::visited_venues).await
    }

    /// Replace a player's display name and avatar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn update_profile(
        &self,
        user: &UserId,
        display_name: String,
        avatar_url: String,
    ) -> Result<User, EngineError> {
        self.mutate(user, |s| Ok(s.update_profile(display_name, avatar_url)))
            .await
    }

    /// Accept a friend request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn accept_friend(&self, user: &UserId, friend: &UserId) -> Result<User, EngineError> {
        self.mutate(user, |s| Ok(s.accept_friend(friend))).await
    }

    /// Send a friend request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn send_request(&self, user: &UserId, friend: &UserId) -> Result<User, EngineError> {
        self.mutate(user, |s| Ok(s.send_request(friend))).await
    }

    /// Directory users a player could befriend.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn discover_users(
        &self,
        user: &UserId,
    ) -> Result<Vec<DiscoverableUser>, EngineError> {
        self.read(user, BayouSession::discover_users).await
    }

    /// A player's FuX ledger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownUser`] for an unregistered id.
    pub async fn ledger(&self, user: &UserId) -> Result<Vec<LedgerEntry>, EngineError> {
        self.read(user, BayouSession::ledger_entries).await
    }
}

/// Check a registration against the user invariants.
fn validate_user(user: &User) -> Result<(), EngineError> {
    let invalid = |reason: String| EngineError::InvalidUser {
        user: user.id.clone(),
        reason,
    };

    if user.trust_score > MAX_TRUST_SCORE {
        return Err(invalid(format!(
            "trust score {} is above {MAX_TRUST_SCORE}",
            user.trust_score
        )));
    }
    if let Some(both) = user.friends.intersection(&user.pending_requests).next() {
        return Err(invalid(format!("{both} is both a friend and pending")));
    }
    if user.friends.contains(&user.id) || user.pending_requests.contains(&user.id) {
        return Err(invalid("a player cannot befriend themself".to_owned()));
    }
    Ok(())
}

/// Mix the configured seed with the user id (FNV-1a).
fn seed_for(seed: u64, user: &UserId) -> u64 {
    user.as_str().bytes().fold(seed ^ 0xcbf2_9ce4_8422_2325, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}
