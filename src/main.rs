//! Dealerships Backend
//!
//! REST backend serving car dealerships and their customer reviews from SQLite,
//! seeded at startup from static JSON files.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod seed;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting Dealerships Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Reviews seed: {:?}", config.reviews_seed_path);
    tracing::info!("Dealerships seed: {:?}", config.dealerships_seed_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Seed before accepting traffic; failures are logged and the server still starts.
    let report = seed::seed_all(
        &repo,
        &config.reviews_seed_path,
        &config.dealerships_seed_path,
    )
    .await;
    if !report.is_complete() {
        tracing::warn!("Seeding incomplete, serving whatever the store currently holds");
    }

    let state = AppState { repo };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server is running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::welcome))
        // Reviews
        .route("/fetchReviews", get(api::fetch_reviews))
        .route("/fetchReviews/dealer/{id}", get(api::fetch_reviews_by_dealer))
        .route("/insert_review", post(api::insert_review))
        // Dealerships
        .route("/fetchDealers", get(api::fetch_dealers))
        .route("/fetchDealers/{state}", get(api::fetch_dealers_by_state))
        .route("/fetchDealer/{id}", get(api::fetch_dealer))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
