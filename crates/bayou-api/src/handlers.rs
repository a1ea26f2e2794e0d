//! REST API endpoint handlers.
//!
//! Every handler delegates to the shared [`Engine`](bayou_core::Engine)
//! and returns owned JSON snapshots.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/api/venues` | All venues |
//! | `GET` | `/api/symbols` | Slot symbol table |
//! | `POST` | `/api/users` | Register a player |
//! | `GET` | `/api/users/{id}` | Player snapshot |
//! | `PUT` | `/api/users/{id}/profile` | Replace name and avatar |
//! | `POST` | `/api/users/{id}/scan` | Resolve an NFC tag |
//! | `POST` | `/api/users/{id}/slots/spin` | Spin the slots |
//! | `POST` | `/api/users/{id}/visibility/toggle` | Flip stealth mode |
//! | `GET` | `/api/users/{id}/visited` | Visited venue ids |
//! | `GET` | `/api/users/{id}/lore` | Lore journal |
//! | `POST` | `/api/users/{id}/lore` | Add a lore entry |
//! | `POST` | `/api/users/{id}/lore/{lore_id}/unlock` | Unlock a lore entry |
//! | `GET` | `/api/users/{id}/discover` | Users to befriend |
//! | `POST` | `/api/users/{id}/friends/{friend_id}/accept` | Accept a request |
//! | `POST` | `/api/users/{id}/friends/{friend_id}/request` | Send a request |
//! | `GET` | `/api/users/{id}/ledger` | FuX ledger |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use bayou_types::{
    DiscoverableUser, LedgerEntry, LoreEntry, LoreId, NewLoreEntry, ScanResponse, SlotResult,
    SlotSymbol, TagId, User, UserId, Venue, VenueId,
};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body for `POST /api/users/{id}/scan`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// The scanned tag.
    pub tag_id: TagId,
}

/// Body for `POST /api/users/{id}/slots/spin`.
#[derive(Debug, Deserialize)]
pub struct SpinRequest {
    /// FuX wagered.
    pub bet: u64,
}

/// Body for `PUT /api/users/{id}/profile`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    pub display_name: String,
    /// New avatar URL.
    pub avatar_url: String,
}

/// Response for `POST /api/users/{id}/visibility/toggle`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResponse {
    /// Location sharing after the toggle.
    pub location_sharing: bool,
}

/// Response for `POST /api/users/{id}/lore/{lore_id}/unlock`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    /// The id, if the entry went from locked to unlocked.
    pub lore_unlocked: Option<LoreId>,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Liveness check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// All venues.
pub async fn list_venues(State(state): State<Arc<AppState>>) -> Json<Vec<Venue>> {
    Json(state.engine.venues())
}

/// The slot symbol table.
pub async fn list_symbols(State(state): State<Arc<AppState>>) -> Json<Vec<SlotSymbol>> {
    Json(state.engine.symbols())
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Register a player. A profile that breaks the user invariants is a 400.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.engine.register(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Player snapshot.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.engine.user(&UserId::from(id)).await?))
}

/// Replace display name and avatar.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .engine
        .update_profile(&UserId::from(id), body.display_name, body.avatar_url)
        .await?;
    Ok(Json(user))
}

/// Resolve a scanned NFC tag.
pub async fn scan_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    Ok(Json(state.engine.scan_tag(&UserId::from(id), &body.tag_id).await?))
}

/// Spin the slots. A bet over the balance is a 409.
pub async fn spin_slots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SpinRequest>,
) -> Result<Json<SlotResult>, ApiError> {
    Ok(Json(state.engine.spin_slots(&UserId::from(id), body.bet).await?))
}

/// Flip stealth mode.
pub async fn toggle_visibility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VisibilityResponse>, ApiError> {
    let location_sharing = state.engine.toggle_visibility(&UserId::from(id)).await?;
    Ok(Json(VisibilityResponse { location_sharing }))
}

/// Venues the player has checked in to.
pub async fn visited_venues(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<VenueId>>, ApiError> {
    Ok(Json(state.engine.visited_venues(&UserId::from(id)).await?))
}

// ---------------------------------------------------------------------------
// Lore
// ---------------------------------------------------------------------------

/// The player's lore journal.
pub async fn list_lore(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LoreEntry>>, ApiError> {
    Ok(Json(state.engine.lore(&UserId::from(id)).await?))
}

/// Add a lore entry; responds with the whole journal.
pub async fn add_lore(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(entry): Json<NewLoreEntry>,
) -> Result<(StatusCode, Json<Vec<LoreEntry>>), ApiError> {
    let journal = state.engine.add_lore_entry(&UserId::from(id), entry).await?;
    Ok((StatusCode::CREATED, Json(journal)))
}

/// Unlock a lore entry.
pub async fn unlock_lore(
    State(state): State<Arc<AppState>>,
    Path((id, lore_id)): Path<(String, String)>,
) -> Result<Json<UnlockResponse>, ApiError> {
    let lore_unlocked = state.engine.unlock_lore(&UserId::from(id), &LoreId::from(lore_id)).await?;
    Ok(Json(UnlockResponse { lore_unlocked }))
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

/// Users the player could befriend.
pub async fn discover_users(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DiscoverableUser>>, ApiError> {
    Ok(Json(state.engine.discover_users(&UserId::from(id)).await?))
}

/// Accept a friend request.
pub async fn accept_friend(
    State(state): State<Arc<AppState>>,
    Path((id, friend)): Path<(String, String)>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.engine.accept_friend(&UserId::from(id), &UserId::from(friend)).await?))
}

/// Send a friend request.
pub async fn send_request(
    State(state): State<Arc<AppState>>,
    Path((id, friend)): Path<(String, String)>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.engine.send_request(&UserId::from(id), &UserId::from(friend)).await?))
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The player's FuX ledger, oldest first.
pub async fn ledger(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    Ok(Json(state.engine.ledger(&UserId::from(id)).await?))
}
