use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recyclai::classify::{handlers as classify_handlers, HttpInferenceBackend};
use recyclai::game::{handlers as game_handlers, GameService};
use recyclai::profile::{handlers as profile_handlers, InMemoryProfileStore};
use recyclai::shared::AppState;
use recyclai::stats::handlers as stats_handlers;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recyclai=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RecyclAI backend");

    // Create shared application state with dependency injection.
    // The in-memory profile store stands in for the hosted document
    // store during local runs.
    let profiles = Arc::new(InMemoryProfileStore::new());
    let games = Arc::new(GameService::new());

    let model_url = std::env::var("MODEL_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:5000/predict".to_string());
    info!(model_url = %model_url, "Using model server");
    let inference = Arc::new(HttpInferenceBackend::new(model_url));

    let app_state = AppState::new(profiles, games, inference);

    let app = Router::new()
        .route("/health", get(classify_handlers::health))
        .route("/classify", post(classify_handlers::classify_image))
        .route("/game/sessions", post(game_handlers::start_session))
        .route("/game/sessions/:player_id", get(game_handlers::get_session))
        .route(
            "/game/sessions/:player_id/answers",
            post(game_handlers::submit_answer),
        )
        .route(
            "/game/sessions/:player_id/restart",
            post(game_handlers::restart_session),
        )
        .route(
            "/profile/:uid/points",
            get(profile_handlers::get_points).post(profile_handlers::increment_points),
        )
        .route("/stats/:uid", get(stats_handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
