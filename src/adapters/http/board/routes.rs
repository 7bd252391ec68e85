//! Axum router configuration for the board endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    consult_board, list_personas, route_query, session_status, BoardAppState,
};

/// Create the board API router.
///
/// # Routes
///
/// - `POST /router` - select the personas that should answer a query
/// - `POST /board` - consult the selected personas concurrently
/// - `GET /personas` - the default board definitions
/// - `GET /session` - current gate state for the calling session
///
/// Mount under `/api` and supply a [`BoardAppState`].
pub fn board_router() -> Router<BoardAppState> {
    Router::new()
        .route("/router", post(route_query))
        .route("/board", post(consult_board))
        .route("/personas", get(list_personas))
        .route("/session", get(session_status))
}
