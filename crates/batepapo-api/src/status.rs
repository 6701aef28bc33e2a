use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Local};
use tracing::debug;

use batepapo_db::ChatStore;

use crate::clock;
use crate::error::ApiError;
use crate::identity::requesting_user;
use crate::state::AppState;

/// POST /status
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let user = requesting_user(&headers);

    state
        .with_store(move |store| refresh_status(store, &user, Local::now()))
        .await?;

    Ok(StatusCode::OK)
}

/// Push back `name`'s inactivity deadline. Never registers anyone.
pub fn refresh_status(
    store: &dyn ChatStore,
    name: &str,
    now: DateTime<Local>,
) -> Result<(), ApiError> {
    if !store.touch_participant(name, clock::millis(now))? {
        return Err(ApiError::NotFound(name.to_string()));
    }
    debug!("Status refreshed for '{}'", name);
    Ok(())
}
