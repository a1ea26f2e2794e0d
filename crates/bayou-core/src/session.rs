//! The reward/state engine for a single player.
//!
//! A [`BayouSession`] owns one player's [`PlayerState`] and applies every
//! gameplay operation to it: NFC scans, slot spins, the stealth toggle,
//! lore unlocks, profile edits and the friend graph. All FuX movement goes
//! through the player's [`Ledger`](bayou_ledger::Ledger).
//!
//! Operations here are synchronous and never await. Callers that share a
//! session across tasks wrap it in a lock (see [`Engine`](crate::Engine)).
//!
//! # Scan resolution
//!
//! A scanned tag is matched in order, first match wins:
//!
//! 1. the player's own patch toggles stealth mode,
//! 2. a venue sticker checks the player in,
//! 3. anything else is a mystery: a hidden cache, a curse, or a blessing.
//!
//! Unknown tags are never an error.

use std::sync::Arc;

use tracing::{debug, info};

use bayou_ledger::{LedgerError, can_afford};
use bayou_types::{
    DiscoverableUser, LedgerEntry, LedgerEntryKind, LoreEntry, LoreId, MysteryOutcome,
    NewLoreEntry, ScanResponse, SlotResult, SymbolId, TagId, TagType, User, UserId, Venue,
    VenueId,
};
use bayou_world::ContentTables;

use crate::chance::Chance;
use crate::config::EconomyConfig;
use crate::error::EngineError;
use crate::oracle::flavor_prompt;
use crate::state::PlayerState;

/// Reel grid size (rows and columns).
pub const REELS: usize = 3;

/// The settled economics of a spin, before flavor text is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    /// The 3x3 grid of drawn symbols, row-major.
    pub grid: Vec<Vec<SymbolId>>,
    /// Total FuX won.
    pub win_amount: u64,
    /// Balance after the bet and the win.
    pub new_balance: u64,
    /// Indices of the winning rows.
    pub lines_hit: Vec<u8>,
    /// Lore newly unlocked by this spin.
    pub lore_unlocked: Option<LoreId>,
}

impl SpinOutcome {
    /// Prompt for the flavor oracle describing this spin.
    pub fn flavor_prompt(&self) -> String {
        flavor_prompt(&self.grid, self.win_amount)
    }

    /// Attach flavor text and produce the public result.
    pub fn into_result(self, lore_message: String) -> SlotResult {
        SlotResult {
            grid: self.grid,
            win_amount: self.win_amount,
            new_balance: self.new_balance,
            lines_hit: self.lines_hit,
            lore_message,
            lore_unlocked: self.lore_unlocked,
        }
    }
}

/// One player's live game session.
pub struct BayouSession {
    state: PlayerState,
    content: Arc<ContentTables>,
    economy: EconomyConfig,
    chance: Box<dyn Chance>,
}

impl std::fmt::Debug for BayouSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BayouSession")
            .field("user", &self.state.user.id)
            .field("balance", &self.state.user.fux_balance)
            .finish_non_exhaustive()
    }
}

impl BayouSession {
    /// Resume a session from saved state.
    pub fn new(
        state: PlayerState,
        content: Arc<ContentTables>,
        economy: EconomyConfig,
        chance: Box<dyn Chance>,
    ) -> Self {
        Self {
            state,
            content,
            economy,
            chance,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The persisted state, for saving.
    pub const fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Replace the live state with an earlier snapshot, discarding
    /// everything since.
    pub fn restore(&mut self, state: PlayerState) {
        self.state = state;
    }

    /// Trim the ledger to its newest `max_entries`. Returns how many
    /// entries were folded away.
    pub fn compact_ledger(&mut self, max_entries: usize) -> usize {
        self.state.ledger.compact(max_entries)
    }

    /// Snapshot of the player's profile and wallet.
    pub fn user(&self) -> User {
        self.state.user.clone()
    }

    /// Snapshot of all venues.
    pub fn venues(&self) -> Vec<Venue> {
        self.content.venues().to_vec()
    }

    /// Snapshot of the lore journal, newest first.
    pub fn lore(&self) -> Vec<LoreEntry> {
        self.state.lore.clone()
    }

    /// Snapshot of visited venue ids.
    pub fn visited_venues(&self) -> Vec<VenueId> {
        self.state.visited_venues.iter().cloned().collect()
    }

    /// Snapshot of the FuX ledger.
    pub fn ledger_entries(&self) -> Vec<LedgerEntry> {
        self.state.ledger.all_entries().to_vec()
    }

    // -----------------------------------------------------------------------
    // Scans
    // -----------------------------------------------------------------------

    /// Resolve a scanned NFC tag.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Ledger`] only if a credit would overflow the
    /// wallet.
    pub fn scan_tag(&mut self, tag: &TagId) -> Result<ScanResponse, EngineError> {
        if *tag == self.state.user.own_patch_id {
            return Ok(self.scan_patch());
        }

        let content = Arc::clone(&self.content);
        if let Some(venue) = content.venue_by_tag(tag) {
            return self.check_in(venue);
        }

        self.open_mystery(tag)
    }

    fn scan_patch(&mut self) -> ScanResponse {
        let (sharing, lore_unlocked) = self.flip_visibility();
        let message = if sharing {
            "Stealth Mode: OFF. Visibility Broadcasting."
        } else {
            "Stealth Mode: ON. Visibility Ghosted."
        };
        ScanResponse {
            tag_type: TagType::Patch,
            message: message.to_owned(),
            reward: None,
            penalty: None,
            lore_unlocked,
        }
    }

    fn check_in(&mut self, venue: &Venue) -> Result<ScanResponse, EngineError> {
        let reward = self
            .economy
            .venue_reward_per_tier
            .checked_mul(u64::from(venue.tier))
            .ok_or(LedgerError::Overflow)?;
        self.credit(LedgerEntryKind::VenueCheckIn, reward)?;

        let mut lore_unlocked = None;
        if self.state.visited_venues.insert(venue.id.clone()) {
            self.state.user.total_venues_visited =
                self.state.user.total_venues_visited.saturating_add(1);

            let triggers = self.content.triggers().clone();
            lore_unlocked = self.unlock_lore(&triggers.first_visit);
            if venue.id == triggers.signature_venue {
                // The venue's own entry outranks the generic one.
                lore_unlocked = self
                    .unlock_lore(&triggers.signature_lore)
                    .or(lore_unlocked);
            }
        }

        info!(
            user = %self.state.user.id,
            venue = %venue.id,
            reward,
            balance = self.state.user.fux_balance,
            "venue check-in"
        );

        Ok(ScanResponse {
            tag_type: TagType::Venue,
            message: format!("Checked into {}. Earned {reward} FuX.", venue.name),
            reward: Some(reward),
            penalty: None,
            lore_unlocked,
        })
    }

    fn open_mystery(&mut self, tag: &TagId) -> Result<ScanResponse, EngineError> {
        let outcome = self.chance.mystery_outcome();
        debug!(user = %self.state.user.id, %tag, ?outcome, "mystery tag drawn");

        let response = match outcome {
            MysteryOutcome::Reward => {
                let reward = self.economy.hidden_cache_reward;
                self.credit(LedgerEntryKind::HiddenCache, reward)?;
                ScanResponse {
                    tag_type: TagType::Reward,
                    message: format!("Found a hidden cache. +{reward} FuX."),
                    reward: Some(reward),
                    penalty: None,
                    lore_unlocked: None,
                }
            }
            MysteryOutcome::Curse => {
                let penalty = self.economy.curse_penalty;
                let drained = self.state.ledger.drain(
                    &mut self.state.user,
                    LedgerEntryKind::Curse,
                    penalty,
                )?;
                debug!(penalty, drained, "curse applied");
                ScanResponse {
                    tag_type: TagType::Curse,
                    message: format!("A digital hex drains your wallet. -{penalty} FuX."),
                    reward: None,
                    penalty: Some(penalty),
                    lore_unlocked: None,
                }
            }
            MysteryOutcome::Blessing => ScanResponse {
                tag_type: TagType::Blessing,
                message: "The spirits favor you. Trust score increased.".to_owned(),
                reward: None,
                penalty: None,
                lore_unlocked: None,
            },
        };

        info!(
            user = %self.state.user.id,
            outcome = ?response.tag_type,
            balance = self.state.user.fux_balance,
            "mystery tag resolved"
        );
        Ok(response)
    }

    // -----------------------------------------------------------------------
    // Slots
    // -----------------------------------------------------------------------

    /// Settle a slot spin: check the bet, draw the grid, debit the bet,
    /// pay winning rows and unlock the slot lore on any hit.
    ///
    /// Flavor text is not part of this step; see
    /// [`Engine::spin_slots`](crate::Engine::spin_slots).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientFunds`] if `bet` exceeds the
    /// balance and [`EngineError::Ledger`] if the payout would overflow.
    /// Either way the session is left untouched.
    pub fn spin_reels(&mut self, bet: u64) -> Result<SpinOutcome, EngineError> {
        let balance = self.state.user.fux_balance;
        if !can_afford(&self.state.user, bet) {
            return Err(EngineError::InsufficientFunds { bet, balance });
        }

        let grid = self.draw_grid()?;
        let lines_hit = winning_rows(&grid);
        let win_amount = self.payout(bet, lines_hit.len())?;

        // The whole settlement must fit before the bet leaves the wallet.
        balance
            .checked_sub(bet)
            .and_then(|rest| rest.checked_add(win_amount))
            .ok_or(LedgerError::Overflow)?;
        self.state
            .user
            .total_fux_earned
            .checked_add(win_amount)
            .ok_or(LedgerError::Overflow)?;

        if bet > 0 {
            self.state
                .ledger
                .debit(&mut self.state.user, LedgerEntryKind::SlotBet, bet)?;
        }
        self.credit(LedgerEntryKind::SlotWin, win_amount)?;

        let lore_unlocked = if lines_hit.is_empty() {
            None
        } else {
            let slot_lore = self.content.triggers().slot_line.clone();
            self.unlock_lore(&slot_lore)
        };

        info!(
            user = %self.state.user.id,
            bet,
            win_amount,
            lines = lines_hit.len(),
            balance = self.state.user.fux_balance,
            "slot spin settled"
        );

        Ok(SpinOutcome {
            grid,
            win_amount,
            new_balance: self.state.user.fux_balance,
            lines_hit,
            lore_unlocked,
        })
    }

    fn payout(&self, bet: u64, lines: usize) -> Result<u64, LedgerError> {
        if lines == 0 {
            return Ok(0);
        }
        let lines = u64::try_from(lines).map_err(|_| LedgerError::Overflow)?;
        bet.checked_mul(self.economy.slot_line_multiplier)
            .and_then(|per_line| per_line.checked_mul(lines))
            .ok_or(LedgerError::Overflow)
    }

    fn draw_grid(&mut self) -> Result<Vec<Vec<SymbolId>>, EngineError> {
        let content = Arc::clone(&self.content);
        let symbols = content.symbols();
        (0..REELS)
            .map(|_| {
                (0..REELS)
                    .map(|_| {
                        let index = self.chance.symbol_index(symbols);
                        symbols
                            .get(index)
                            .map(|s| s.id.clone())
                            .ok_or(EngineError::SymbolOutOfRange {
                                index,
                                len: symbols.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Stealth and lore
    // -----------------------------------------------------------------------

    /// Flip location sharing and return the new value.
    ///
    /// Going dark unlocks the stealth lore; coming back never does.
    pub fn toggle_visibility(&mut self) -> bool {
        self.flip_visibility().0
    }

    fn flip_visibility(&mut self) -> (bool, Option<LoreId>) {
        let sharing = !self.state.user.location_sharing;
        self.state.user.location_sharing = sharing;

        let lore_unlocked = if sharing {
            None
        } else {
            let stealth = self.content.triggers().stealth.clone();
            self.unlock_lore(&stealth)
        };

        info!(user = %self.state.user.id, sharing, "visibility toggled");
        (sharing, lore_unlocked)
    }

    /// Unlock a lore entry.
    ///
    /// Returns the id only when the entry existed and was locked. Unknown
    /// and already-unlocked ids return `None` and change nothing.
    pub fn unlock_lore(&mut self, id: &LoreId) -> Option<LoreId> {
        let entry = self
            .state
            .lore
            .iter_mut()
            .find(|l| &l.id == id && !l.unlocked)?;
        entry.unlocked = true;
        info!(user = %self.state.user.id, lore = %id, title = %entry.title, "lore unlocked");
        Some(id.clone())
    }

    /// Add a new entry to the front of the journal and return the journal.
    pub fn add_lore_entry(&mut self, entry: NewLoreEntry) -> Vec<LoreEntry> {
        let entry = entry.with_id(LoreId::generate());
        debug!(user = %self.state.user.id, lore = %entry.id, "lore entry added");
        self.state.lore.insert(0, entry);
        self.lore()
    }

    // -----------------------------------------------------------------------
    // Profile and friends
    // -----------------------------------------------------------------------

    /// Replace the display name and avatar.
    pub fn update_profile(&mut self, display_name: String, avatar_url: String) -> User {
        self.state.user.display_name = display_name;
        self.state.user.avatar_url = avatar_url;
        self.user()
    }

    /// Accept a friend request. Ids that never asked are befriended anyway.
    pub fn accept_friend(&mut self, friend: &UserId) -> User {
        self.befriend(friend);
        self.user()
    }

    /// Send a friend request. Friendship is granted immediately.
    pub fn send_request(&mut self, friend: &UserId) -> User {
        self.befriend(friend);
        self.user()
    }

    fn befriend(&mut self, friend: &UserId) {
        if *friend == self.state.user.id {
            return;
        }
        self.state.user.pending_requests.remove(friend);
        if self.state.user.friends.insert(friend.clone()) {
            info!(user = %self.state.user.id, %friend, "friend added");
        }
    }

    /// Directory users who are not yet friends or pending.
    pub fn discover_users(&self) -> Vec<DiscoverableUser> {
        let user = &self.state.user;
        self.content
            .directory()
            .iter()
            .filter(|d| {
                d.id != user.id
                    && !user.friends.contains(&d.id)
                    && !user.pending_requests.contains(&d.id)
            })
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Credit through the ledger; zero amounts record nothing.
    fn credit(&mut self, kind: LedgerEntryKind, amount: u64) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        self.state
            .ledger
            .credit(&mut self.state.user, kind, amount)?;
        Ok(())
    }
}

/// Indices of rows whose three cells match.
fn winning_rows(grid: &[Vec<SymbolId>]) -> Vec<u8> {
    grid.iter()
        .enumerate()
        .filter(|(_, row)| matches!(row.as_slice(), [a, b, c] if a == b && b == c))
        .filter_map(|(idx, _)| u8::try_from(idx).ok())
        .collect()
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bayou_ledger::{ConservationResult, Ledger};
    use bayou_world::starting_content::ids;
    use bayou_world::{create_starting_content, demo_player};

    use super::*;
    use crate::chance::ScriptedChance;

    // Positions in the launch symbol table.
    const MASK: usize = 0;
    const FLEUR: usize = 1;
    const SKULL: usize = 2;
    const SERPENT: usize = 3;

    fn session_with(chance: ScriptedChance) -> BayouSession {
        let content = Arc::new(create_starting_content().unwrap());
        let state = PlayerState::new(demo_player(), &content);
        BayouSession::new(state, content, EconomyConfig::default(), Box::new(chance))
    }

    fn session() -> BayouSession {
        session_with(ScriptedChance::new())
    }

    fn assert_reconciles(session: &BayouSession) {
        let state = session.state();
        assert_eq!(
            state.ledger.verify_conservation(state.user.fux_balance),
            ConservationResult::Balanced
        );
    }

    /// Give the session a fresh wallet of `balance` FuX.
    fn fund(session: &mut BayouSession, balance: u64) {
        session.state.user.fux_balance = balance;
        session.state.user.total_fux_earned = balance;
        session.state.ledger = Ledger::new(balance);
    }

    /// A grid with no matching row.
    fn losing_cells() -> Vec<usize> {
        vec![MASK, FLEUR, SKULL, FLEUR, SKULL, MASK, SKULL, MASK, FLEUR]
    }

    /// A grid whose top row matches.
    fn top_row_cells() -> Vec<usize> {
        vec![SERPENT, SERPENT, SERPENT, MASK, FLEUR, SKULL, SKULL, FLEUR, MASK]
    }

    // -----------------------------------------------------------------------
    // Venues
    // -----------------------------------------------------------------------

    #[test]
    fn first_check_in_at_signature_venue() {
        let mut s = session();

        let response = s.scan_tag(&TagId::from("tag_v1")).unwrap();

        assert_eq!(response.tag_type, TagType::Venue);
        assert_eq!(response.reward, Some(50));
        assert_eq!(response.message, "Checked into The Iron Jester. Earned 50 FuX.");
        assert_eq!(response.lore_unlocked, Some(LoreId::from(ids::LORE_JESTER_GLITCH)));

        let user = s.user();
        assert_eq!(user.fux_balance, 1050);
        assert_eq!(user.total_fux_earned, 1050);
        assert_eq!(user.total_venues_visited, 1);

        // Both entries unlock even though only one id is reported.
        assert!(s.state().is_unlocked(&LoreId::from(ids::LORE_FIRST_PARADE)));
        assert!(s.state().is_unlocked(&LoreId::from(ids::LORE_JESTER_GLITCH)));
    }

    #[test]
    fn repeat_check_in_pays_but_unlocks_nothing() {
        let mut s = session();

        s.scan_tag(&TagId::from("tag_v3")).unwrap();
        let second = s.scan_tag(&TagId::from("tag_v3")).unwrap();

        assert_eq!(second.reward, Some(150));
        assert_eq!(second.lore_unlocked, None);

        let user = s.user();
        assert_eq!(user.fux_balance, 1300);
        assert_eq!(user.total_venues_visited, 1);
        assert_eq!(s.visited_venues(), vec![VenueId::from(ids::VOODOO_CIRCUIT)]);
        assert_reconciles(&s);
    }

    #[test]
    fn first_visit_lore_is_reported_once() {
        let mut s = session();

        let first = s.scan_tag(&TagId::from("tag_v2")).unwrap();
        let other = s.scan_tag(&TagId::from("tag_v3")).unwrap();

        assert_eq!(first.lore_unlocked, Some(LoreId::from(ids::LORE_FIRST_PARADE)));
        // Already unlocked by the previous venue.
        assert_eq!(other.lore_unlocked, None);
        assert_eq!(s.user().total_venues_visited, 2);
    }

    #[test]
    fn check_in_overflow_leaves_visit_unrecorded() {
        let mut s = session();
        fund(&mut s, u64::MAX);
        let before = s.state().clone();

        let result = s.scan_tag(&TagId::from("tag_v1"));

        assert_eq!(result.err(), Some(EngineError::Ledger(LedgerError::Overflow)));
        assert_eq!(s.state(), &before);
    }

    // -----------------------------------------------------------------------
    // Patch
    // -----------------------------------------------------------------------

    #[test]
    fn own_patch_toggles_stealth() {
        let mut s = session();
        let patch = TagId::from(ids::DEMO_PATCH);

        let off = s.scan_tag(&patch).unwrap();
        assert_eq!(off.message, "Stealth Mode: ON. Visibility Ghosted.");
        assert_eq!(off.lore_unlocked, Some(LoreId::from(ids::LORE_STEALTH_PROTOCOL)));
        assert!(!s.user().location_sharing);

        let on = s.scan_tag(&patch).unwrap();
        assert_eq!(on.tag_type, TagType::Patch);
        assert_eq!(on.message, "Stealth Mode: OFF. Visibility Broadcasting.");
        assert_eq!(on.lore_unlocked, None);
        assert!(s.user().location_sharing);

        // Patch scans never move FuX.
        assert_eq!(s.user().fux_balance, 1000);
        assert!(s.ledger_entries().is_empty());
    }

    #[test]
    fn toggling_back_on_never_unlocks() {
        let mut s = session();
        assert!(!s.toggle_visibility());
        assert!(s.toggle_visibility());
        assert!(!s.toggle_visibility());
        assert!(s.state().is_unlocked(&LoreId::from(ids::LORE_STEALTH_PROTOCOL)));
    }

    // -----------------------------------------------------------------------
    // Mystery tags
    // -----------------------------------------------------------------------

    #[test]
    fn hidden_cache_credits() {
        let mut s = session_with(ScriptedChance::new().with_mysteries([MysteryOutcome::Reward]));
        let response = s.scan_tag(&TagId::from("mock_tag")).unwrap();

        assert_eq!(response.tag_type, TagType::Reward);
        assert_eq!(response.reward, Some(100));
        assert_eq!(response.message, "Found a hidden cache. +100 FuX.");
        assert_eq!(s.user().fux_balance, 1100);
        assert_eq!(s.user().total_fux_earned, 1100);
    }

    #[test]
    fn curse_floors_at_zero_and_reports_nominal_penalty() {
        let mut s = session_with(ScriptedChance::new().with_mysteries([MysteryOutcome::Curse]));
        fund(&mut s, 30);

        let response = s.scan_tag(&TagId::from("mock_tag")).unwrap();

        assert_eq!(response.tag_type, TagType::Curse);
        assert_eq!(response.penalty, Some(50));
        assert_eq!(s.user().fux_balance, 0);
        assert_eq!(s.ledger_entries().first().unwrap().amount, 30);
        assert_reconciles(&s);
    }

    #[test]
    fn blessing_changes_nothing() {
        let mut s = session_with(ScriptedChance::new().with_mysteries([MysteryOutcome::Blessing]));
        let before = s.user();
        let response = s.scan_tag(&TagId::from("mock_tag")).unwrap();

        assert_eq!(response.tag_type, TagType::Blessing);
        assert_eq!(response.reward, None);
        assert_eq!(response.penalty, None);
        assert_eq!(s.user(), before);
    }

    // -----------------------------------------------------------------------
    // Slots
    // -----------------------------------------------------------------------

    #[test]
    fn bet_over_balance_is_rejected_without_change() {
        let mut s = session();
        let before = s.state().clone();

        let result = s.spin_reels(1001);

        assert_eq!(
            result.err(),
            Some(EngineError::InsufficientFunds {
                bet: 1001,
                balance: 1000,
            })
        );
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn losing_spin_debits_bet() {
        let mut s = session_with(ScriptedChance::new().with_cells(losing_cells()));
        let outcome = s.spin_reels(10).unwrap();

        assert_eq!(outcome.win_amount, 0);
        assert!(outcome.lines_hit.is_empty());
        assert_eq!(outcome.new_balance, 990);
        assert_eq!(outcome.lore_unlocked, None);
        assert_eq!(s.user().total_fux_earned, 1000);
        assert_reconciles(&s);
    }

    #[test]
    fn two_winning_rows_pay_twice() {
        let cells = vec![
            SERPENT, SERPENT, SERPENT, // row 0 wins
            MASK, FLEUR, SKULL, // row 1 loses
            MASK, MASK, MASK, // row 2 wins
        ];
        let mut s = session_with(ScriptedChance::new().with_cells(cells));
        let outcome = s.spin_reels(10).unwrap();

        assert_eq!(outcome.lines_hit, vec![0, 2]);
        assert_eq!(outcome.win_amount, 200);
        assert_eq!(outcome.new_balance, 1190);
        assert_eq!(outcome.lore_unlocked, Some(LoreId::from(ids::LORE_SERPENTS_COIL)));
        assert_eq!(s.user().total_fux_earned, 1200);
        assert_eq!(outcome.grid.len(), REELS);
        assert!(outcome.grid.iter().all(|row| row.len() == REELS));
        assert_reconciles(&s);
    }

    #[test]
    fn slot_lore_unlocks_once() {
        let cells = [SERPENT; 3]
            .into_iter()
            .chain([MASK, FLEUR, SKULL, SKULL, FLEUR, MASK])
            .chain([FLEUR; 3])
            .chain([MASK, FLEUR, SKULL, SKULL, FLEUR, MASK]);
        let mut s = session_with(ScriptedChance::new().with_cells(cells));
        let first = s.spin_reels(5).unwrap();
        let second = s.spin_reels(5).unwrap();

        assert!(first.lore_unlocked.is_some());
        assert_eq!(second.win_amount, 50);
        assert_eq!(second.lore_unlocked, None);
    }

    #[test]
    fn zero_bet_moves_nothing() {
        let mut s = session_with(ScriptedChance::new().with_cells([MASK; 9]));
        let outcome = s.spin_reels(0).unwrap();

        assert_eq!(outcome.lines_hit, vec![0, 1, 2]);
        assert_eq!(outcome.win_amount, 0);
        assert_eq!(outcome.new_balance, 1000);
        assert!(s.ledger_entries().is_empty());
    }

    #[test]
    fn whole_balance_can_be_bet() {
        let mut s = session_with(ScriptedChance::new().with_cells(losing_cells()));
        assert_eq!(s.spin_reels(1000).unwrap().new_balance, 0);
    }

    #[test]
    fn out_of_range_reel_position_leaves_wallet_alone() {
        let mut s = session_with(ScriptedChance::new().with_cells([99]));
        let before = s.state().clone();
        let result = s.spin_reels(10);
        assert_eq!(
            result.err(),
            Some(EngineError::SymbolOutOfRange { index: 99, len: 7 })
        );
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn overflowing_payout_keeps_the_bet() {
        let mut s = session_with(ScriptedChance::new().with_cells(top_row_cells()));
        fund(&mut s, u64::MAX);
        let before = s.state().clone();

        // bet x 10 does not fit in u64.
        let result = s.spin_reels(u64::MAX / 5);

        assert_eq!(result.err(), Some(EngineError::Ledger(LedgerError::Overflow)));
        assert_eq!(s.state(), &before);
        assert!(s.ledger_entries().is_empty());
    }

    #[test]
    fn payout_that_overflows_the_wallet_keeps_the_bet() {
        let mut s = session_with(ScriptedChance::new().with_cells(top_row_cells()));
        fund(&mut s, u64::MAX);
        let before = s.state().clone();

        // The win fits, but balance - 1 + 10 does not.
        let result = s.spin_reels(1);

        assert_eq!(result.err(), Some(EngineError::Ledger(LedgerError::Overflow)));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn huge_losing_bet_settles() {
        let mut s = session_with(ScriptedChance::new().with_cells(losing_cells()));
        fund(&mut s, u64::MAX);

        let outcome = s.spin_reels(u64::MAX / 5).unwrap();

        assert_eq!(outcome.win_amount, 0);
        assert_eq!(outcome.new_balance, u64::MAX.saturating_sub(u64::MAX / 5));
        assert_reconciles(&s);
    }

    // -----------------------------------------------------------------------
    // Lore
    // -----------------------------------------------------------------------

    #[test]
    fn unlock_is_idempotent() {
        let mut s = session();
        let id = LoreId::from(ids::LORE_SERPENTS_COIL);
        assert_eq!(s.unlock_lore(&id), Some(id.clone()));
        assert_eq!(s.unlock_lore(&id), None);
        assert_eq!(s.unlock_lore(&LoreId::from("lore_missing")), None);
    }

    #[test]
    fn added_lore_goes_to_front_with_fresh_id() {
        let mut s = session();
        let entry = NewLoreEntry {
            title: "Krewe of Static".to_owned(),
            content: "The floats run on stolen current.".to_owned(),
            unlocked: true,
            unlock_requirement: "Found it yourself.".to_owned(),
        };

        s.add_lore_entry(entry.clone());
        let journal = s.add_lore_entry(entry);

        assert_eq!(journal.len(), 6);
        let first = &journal.first().unwrap().id;
        let second = &journal.get(1).unwrap().id;
        assert!(first.as_str().starts_with("lore_"));
        assert_ne!(first, second);
        assert!(journal.first().unwrap().unlocked);
        assert_eq!(
            journal.last().unwrap().id.as_str(),
            ids::LORE_STEALTH_PROTOCOL
        );
    }

    // -----------------------------------------------------------------------
    // Profile and friends
    // -----------------------------------------------------------------------

    #[test]
    fn profile_is_replaced() {
        let mut s = session();
        let user = s.update_profile("Neon_Jester".to_owned(), String::new());
        assert_eq!(user.display_name, "Neon_Jester");
        assert_eq!(user.avatar_url, "");
        assert_eq!(user.fux_balance, 1000);
    }

    #[test]
    fn accepting_moves_pending_to_friends() {
        let mut s = session();
        let friend = UserId::from("user_002");

        let user = s.accept_friend(&friend);

        assert!(user.friends.contains(&friend));
        assert!(!user.pending_requests.contains(&friend));
    }

    #[test]
    fn accepting_a_stranger_still_befriends() {
        let mut s = session();
        let stranger = UserId::from("user_999");
        let user = s.accept_friend(&stranger);
        assert!(user.friends.contains(&stranger));
        assert_eq!(user.pending_requests.len(), 1);
    }

    #[test]
    fn request_grants_friendship_and_keeps_sets_disjoint() {
        let mut s = session();
        let pending = UserId::from("user_002");

        let user = s.send_request(&pending);

        assert!(user.friends.contains(&pending));
        assert!(user.pending_requests.is_disjoint(&user.friends));
    }

    #[test]
    fn cannot_befriend_yourself() {
        let mut s = session();
        let me = UserId::from(ids::DEMO_PLAYER);
        assert!(s.send_request(&me).friends.is_empty());
    }

    #[test]
    fn discover_hides_friends_and_pending() {
        let mut s = session();

        let found: Vec<_> = s.discover_users().into_iter().map(|d| d.id).collect();
        assert_eq!(found, vec![UserId::from("user_003"), UserId::from("user_004")]);

        s.send_request(&UserId::from("user_003"));
        let found: Vec<_> = s.discover_users().into_iter().map(|d| d.id).collect();
        assert_eq!(found, vec![UserId::from("user_004")]);
    }

    // -----------------------------------------------------------------------
    // Ledger
    // -----------------------------------------------------------------------

    #[test]
    fn mixed_session_reconciles() {
        let chance = ScriptedChance::new()
            .with_mysteries([
                MysteryOutcome::Reward,
                MysteryOutcome::Curse,
                MysteryOutcome::Blessing,
            ])
            .with_cells(top_row_cells());
        let mut s = session_with(chance);

        s.scan_tag(&TagId::from("tag_v2")).unwrap();
        s.scan_tag(&TagId::from("mock_a")).unwrap();
        s.spin_reels(25).unwrap();
        s.scan_tag(&TagId::from("mock_b")).unwrap();
        s.scan_tag(&TagId::from("mock_c")).unwrap();
        s.scan_tag(&TagId::from(ids::DEMO_PATCH)).unwrap();

        // 1000 + 100 + 100 - 25 + 250 - 50
        assert_eq!(s.user().fux_balance, 1375);
        assert_eq!(s.user().total_fux_earned, 1450);
        assert_reconciles(&s);
    }

    #[test]
    fn compacted_ledger_still_reconciles() {
        let mut s = session();
        for tag in ["tag_v1", "tag_v2", "tag_v3", "tag_v1"] {
            s.scan_tag(&TagId::from(tag)).unwrap();
        }

        assert_eq!(s.compact_ledger(2), 2);
        assert_eq!(s.ledger_entries().len(), 2);
        assert_eq!(s.state().ledger.opening_balance(), 1150);
        assert_reconciles(&s);
    }

    #[test]
    fn restore_discards_later_changes() {
        let mut s = session();
        let snapshot = s.state().clone();
        s.scan_tag(&TagId::from("tag_v3")).unwrap();

        s.restore(snapshot.clone());

        assert_eq!(s.state(), &snapshot);
        assert!(s.visited_venues().is_empty());
    }
}
