use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Local};
use tracing::debug;

use batepapo_db::ChatStore;
use batepapo_types::api::{MessageQuery, SendMessageRequest};
use batepapo_types::models::Message;

use crate::clock;
use crate::error::ApiError;
use crate::identity::requesting_user;
use crate::state::AppState;
use crate::validate::{OutgoingMessage, ValidationError, validate_message};
use crate::visibility::visible_messages;

/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    let outgoing = validate_message(&req)?;
    let from = requesting_user(&headers);

    state
        .with_store(move |store| post_message(store, &from, outgoing, Local::now()))
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /messages
pub async fn get_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let viewer = requesting_user(&headers);
    let limit = query.limit();

    let all = state.with_store(|store| Ok(store.list_messages()?)).await?;

    // Filtering is in-memory work, fine on the async thread.
    Ok(Json(visible_messages(all, &viewer, limit)))
}

/// Store a validated message from `from`, who must be a live participant.
pub fn post_message(
    store: &dyn ChatStore,
    from: &str,
    outgoing: OutgoingMessage,
    now: DateTime<Local>,
) -> Result<(), ApiError> {
    if store.find_participant(from)?.is_none() {
        return Err(ApiError::UnknownSender(from.to_string()));
    }

    let message = Message {
        from: from.to_string(),
        to: outgoing.to,
        text: outgoing.text,
        kind: outgoing.kind,
        time: clock::message_time(now),
    };
    store.insert_message(&message)?;

    debug!("Message from '{}' to '{}' ({})", message.from, message.to, message.kind);
    Ok(())
}
