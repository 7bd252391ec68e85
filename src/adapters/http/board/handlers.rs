//! HTTP handlers for the board endpoints.
//!
//! These handlers connect Axum routes to the routing and consultation
//! application handlers, and weave the session gate into the consultation
//! flow when the client identifies a session.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::{
    ConsultBoardCommand, ConsultBoardHandler, RouteQueryCommand, RouteQueryHandler,
};
use crate::domain::board::BoardError;
use crate::domain::persona::{Persona, PersonaRegistry};
use crate::ports::{CompletionProvider, SessionGate, SessionGateError};

use super::super::common::{optional_session_id, ErrorResponse, InvalidSessionHeader};
use super::dto::{
    BoardRequest, BoardResponse, GateDto, PersonaAnswerDto, PersonaDefinitionDto,
    PersonasResponse, RouteRequest, RouteResponse, SessionStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the board endpoints.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct BoardAppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub gate: Arc<dyn SessionGate>,
    pub registry: Arc<PersonaRegistry>,
}

impl BoardAppState {
    /// Create handlers on demand from the shared state.
    pub fn route_query_handler(&self) -> RouteQueryHandler {
        RouteQueryHandler::new(self.provider.clone())
    }

    pub fn consult_board_handler(&self) -> ConsultBoardHandler {
        ConsultBoardHandler::new(self.provider.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/router - Select the personas that should answer a query
pub async fn route_query(
    State(state): State<BoardAppState>,
    Json(request): Json<RouteRequest>,
) -> Result<impl IntoResponse, BoardApiError> {
    let personas = request
        .personas
        .into_iter()
        .map(|p| p.into_persona())
        .collect::<Result<Vec<Persona>, _>>()
        .map_err(|err| BoardApiError::validation("personas", err.to_string()))?;

    let handler = state.route_query_handler();
    let result = handler
        .handle(RouteQueryCommand {
            query: request.query,
            personas,
        })
        .await?;

    Ok(Json(RouteResponse {
        selected_persona_names: result.selected_names,
    }))
}

/// POST /api/board - Consult the selected personas concurrently
pub async fn consult_board(
    State(state): State<BoardAppState>,
    headers: HeaderMap,
    Json(request): Json<BoardRequest>,
) -> Result<impl IntoResponse, BoardApiError> {
    let session = optional_session_id(&headers)?;

    if let Some(ref session) = session {
        let view = state.gate.evaluate(session).await?;
        if !view.allowed {
            return Err(BoardApiError::LimitReached);
        }
    }

    let personas = request
        .personas
        .into_iter()
        .map(|p| p.into_persona())
        .collect::<Result<Vec<Persona>, _>>()
        .map_err(|err| BoardApiError::validation("personas", err.to_string()))?;

    let handler = state.consult_board_handler();
    let answers = handler
        .handle(ConsultBoardCommand {
            query: request.query,
            personas,
        })
        .await?;

    // The question counts as completed only once every outcome is in.
    let gate = match session {
        Some(session) => Some(GateDto::from(state.gate.record_question(&session).await?)),
        None => None,
    };

    Ok(Json(BoardResponse {
        responses: answers.into_iter().map(PersonaAnswerDto::from).collect(),
        gate,
    }))
}

/// GET /api/personas - The default board definitions
pub async fn list_personas(State(state): State<BoardAppState>) -> impl IntoResponse {
    Json(PersonasResponse {
        personas: state
            .registry
            .all()
            .iter()
            .map(PersonaDefinitionDto::from)
            .collect(),
    })
}

/// GET /api/session - Current gate state for the calling session
pub async fn session_status(
    State(state): State<BoardAppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BoardApiError> {
    let session = optional_session_id(&headers)?.ok_or_else(|| {
        BoardApiError::validation("session", "X-Session-Id header is required")
    })?;

    let view = state.gate.evaluate(&session).await?;
    Ok(Json(SessionStatusResponse {
        session_id: session.to_string(),
        gate: GateDto::from(view),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts workflow errors to HTTP responses.
#[derive(Debug)]
pub enum BoardApiError {
    /// Malformed client input.
    Validation { field: String, reason: String },
    /// The router model call failed; the whole query fails.
    Routing(String),
    /// The consultation could not be dispatched.
    Generation(String),
    /// The session is over budget and no email has been captured.
    LimitReached,
    /// The gate's backing state failed.
    Gate(String),
}

impl BoardApiError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<BoardError> for BoardApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Validation { field, reason } => Self::Validation { field, reason },
            BoardError::RoutingFailed(msg) => Self::Routing(msg),
            BoardError::GenerationFailed(msg) => Self::Generation(msg),
        }
    }
}

impl From<SessionGateError> for BoardApiError {
    fn from(err: SessionGateError) -> Self {
        Self::Gate(err.to_string())
    }
}

impl From<InvalidSessionHeader> for BoardApiError {
    fn from(_: InvalidSessionHeader) -> Self {
        Self::validation("session", "X-Session-Id must be a UUID")
    }
}

impl IntoResponse for BoardApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match &self {
            BoardApiError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                format!("Field '{}' is invalid: {}", field, reason),
            ),
            BoardApiError::Routing(detail) => {
                tracing::error!(detail = %detail, "routing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ROUTING_FAILED",
                    "Failed to route the query".to_string(),
                )
            }
            BoardApiError::Generation(detail) => {
                tracing::error!(detail = %detail, "board generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    "Failed to generate board responses".to_string(),
                )
            }
            BoardApiError::LimitReached => (
                StatusCode::FORBIDDEN,
                "QUESTION_LIMIT_REACHED",
                "Free question limit reached; submit an email to continue".to_string(),
            ),
            BoardApiError::Gate(detail) => {
                tracing::error!(detail = %detail, "session gate failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse::new(error_code, message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    use crate::adapters::ai::{MockCompletionProvider, MockError};
    use crate::adapters::http::common::SESSION_HEADER;
    use crate::adapters::session::InMemorySessionGate;
    use crate::domain::foundation::ClientSessionId;
    use crate::domain::session::QuestionPolicy;

    fn state_with(provider: MockCompletionProvider) -> BoardAppState {
        BoardAppState {
            provider: Arc::new(provider),
            gate: Arc::new(InMemorySessionGate::new(QuestionPolicy::new(3))),
            registry: Arc::new(PersonaRegistry::default_board().clone()),
        }
    }

    fn session_headers(session: &ClientSessionId) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_HEADER,
            HeaderValue::from_str(&session.to_string()).unwrap(),
        );
        headers
    }

    fn route_request() -> RouteRequest {
        serde_json::from_str(
            r#"{
                "query": "What's the best product strategy?",
                "personas": [
                    {"id": "steve-jobs", "name": "Steve Jobs", "systemPrompt": "You are Steve Jobs."},
                    {"id": "warren-buffett", "name": "Warren Buffett", "systemPrompt": "You are Warren Buffett."},
                    {"id": "elon-musk", "name": "Elon Musk", "systemPrompt": "You are Elon Musk."}
                ]
            }"#,
        )
        .unwrap()
    }

    fn board_request() -> BoardRequest {
        serde_json::from_str(
            r#"{
                "query": "What's the best product strategy?",
                "personas": [
                    {"id": "steve-jobs", "systemPrompt": "You are Steve Jobs."}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn route_query_returns_selected_names() {
        let state = state_with(MockCompletionProvider::new().with_response("Steve Jobs"));

        let response = route_query(State(state), Json(route_request()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn route_query_maps_upstream_failure_to_500() {
        let state = state_with(MockCompletionProvider::new().failing_with(
            MockError::Unavailable {
                message: "down".to_string(),
            },
        ));

        let err = route_query(State(state), Json(route_request()))
            .await
            .err()
            .unwrap();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn consult_board_without_session_skips_the_gate() {
        let state = state_with(MockCompletionProvider::new().with_response("Focus."));

        let response = consult_board(State(state), HeaderMap::new(), Json(board_request()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn consult_board_records_questions_until_blocked() {
        let state = state_with(MockCompletionProvider::new());
        let session = ClientSessionId::new();

        // Budget of 3: the fourth question is still allowed (count reaches 4
        // only after it completes), the fifth is blocked.
        for _ in 0..4 {
            consult_board(
                State(state.clone()),
                session_headers(&session),
                Json(board_request()),
            )
            .await
            .unwrap();
        }

        let err = consult_board(
            State(state),
            session_headers(&session),
            Json(board_request()),
        )
        .await
        .err()
            .unwrap();
        assert!(matches!(&err, BoardApiError::LimitReached));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn consult_board_rejects_malformed_session_header() {
        let state = state_with(MockCompletionProvider::new());
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_static("garbage"));

        let err = consult_board(State(state), headers, Json(board_request()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_status_requires_the_header() {
        let state = state_with(MockCompletionProvider::new());

        let err = session_status(State(state), HeaderMap::new())
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_status_reports_gate_state() {
        let state = state_with(MockCompletionProvider::new());
        let session = ClientSessionId::new();

        let response = session_status(State(state), session_headers(&session))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn list_personas_serves_the_default_board() {
        let state = state_with(MockCompletionProvider::new());
        let response = list_personas(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
