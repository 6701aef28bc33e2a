use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Local};
use tracing::{info, warn};

use batepapo_db::ChatStore;
use batepapo_types::api::RegisterRequest;
use batepapo_types::models::{Message, Participant};

use crate::clock;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validate::{ValidationError, validate_participant};

/// POST /participants
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    let name = validate_participant(&req)?;

    state
        .with_store(move |store| register_participant(store, &name, Local::now()))
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /participants
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Participant>>, ApiError> {
    let participants = state
        .with_store(|store| Ok(store.list_participants()?))
        .await?;
    Ok(Json(participants))
}

/// Add `name` to the room and announce it.
///
/// The join notice is a second, independent write. If it fails the participant
/// stays registered without one.
pub fn register_participant(
    store: &dyn ChatStore,
    name: &str,
    now: DateTime<Local>,
) -> Result<(), ApiError> {
    if store.find_participant(name)?.is_some() {
        return Err(ApiError::Conflict(name.to_string()));
    }

    let participant = Participant {
        name: name.to_string(),
        last_status: clock::millis(now),
    };
    if !store.insert_participant(&participant)? {
        return Err(ApiError::Conflict(name.to_string()));
    }

    if let Err(e) = store.insert_message(&Message::joined(name, clock::message_time(now))) {
        warn!("Participant '{}' registered without join notice: {:#}", name, e);
    }

    info!("Participant '{}' joined", name);
    Ok(())
}
