use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::{messages, participants, status};

/// All chat routes bound to `state`. Cross-cutting layers (CORS, tracing) are
/// added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/participants", post(participants::register).get(participants::list))
        .route("/messages", post(messages::send_message).get(messages::get_messages))
        .route("/status", post(status::refresh))
        .with_state(state)
}
