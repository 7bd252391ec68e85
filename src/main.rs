//! Advisory board server binary.
//!
//! Wires configuration, the PostgreSQL email store, the OpenAI completion
//! provider, and the in-memory session gate into the HTTP routers, then
//! serves the API.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use advisory_board::adapters::ai::{OpenAIConfig, OpenAIProvider};
use advisory_board::adapters::http::{
    board_router, contact_router, BoardAppState, ContactAppState,
};
use advisory_board::adapters::postgres::PgEmailStore;
use advisory_board::adapters::session::InMemorySessionGate;
use advisory_board::config::AppConfig;
use advisory_board::domain::persona::PersonaRegistry;
use advisory_board::domain::session::QuestionPolicy;
use advisory_board::ports::{CompletionProvider, EmailStore, SessionGate};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    let store: Arc<dyn EmailStore> = Arc::new(PgEmailStore::new(pool));
    store.ensure_schema().await?;

    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(config.ai.openai_api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    ));

    let gate: Arc<dyn SessionGate> = Arc::new(InMemorySessionGate::new(QuestionPolicy::new(
        config.board.max_free_questions,
    )));

    let board_state = BoardAppState {
        provider,
        gate: gate.clone(),
        registry: Arc::new(PersonaRegistry::default_board().clone()),
    };
    let contact_state = ContactAppState { store, gate };

    let api = Router::new()
        .merge(board_router().with_state(board_state))
        .merge(contact_router().with_state(contact_state));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "advisory board listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
