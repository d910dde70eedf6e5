use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod store;

use config::Config;
use services::ResourceService;
use store::{PgRecordStore, RecordStore};

#[derive(Clone)]
pub struct AppState<S: RecordStore> {
    pub journal: ResourceService<S>,
    pub todos: ResourceService<S>,
    pub affirmations: ResourceService<S>,
    pub gratitude: ResourceService<S>,
}

impl<S: RecordStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            journal: ResourceService::new(store.clone(), &services::JOURNAL),
            todos: ResourceService::new(store.clone(), &services::TODO),
            affirmations: ResourceService::new(store.clone(), &services::AFFIRMATION),
            gratitude: ResourceService::new(store, &services::GRATITUDE),
        }
    }
}

pub fn router<S: RecordStore>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/api/journal",
            post(handlers::journal::save_entry::<S>).get(handlers::journal::get_entry::<S>),
        )
        .route("/api/journal/history", get(handlers::journal::history::<S>))
        .route(
            "/api/todo",
            post(handlers::todo::save_entry::<S>).get(handlers::todo::get_entry::<S>),
        )
        .route("/api/todo/dates", get(handlers::todo::dates::<S>))
        .route(
            "/api/affirmation",
            post(handlers::affirmation::save_entry::<S>)
                .get(handlers::affirmation::get_entry::<S>),
        )
        .route(
            "/api/affirmation/dates",
            get(handlers::affirmation::dates::<S>),
        )
        .route(
            "/api/gratitude",
            post(handlers::gratitude::save_entry::<S>).get(handlers::gratitude::get_entry::<S>),
        )
        .route(
            "/api/gratitude/history",
            get(handlers::gratitude::history::<S>),
        )
        .route("/api/health", get(handlers::health::health_check))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindleaf_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();

    // Database
    let pool = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState::new(PgRecordStore::new(pool));

    let allow_origin = match &config.frontend_url {
        Some(origin) => AllowOrigin::exact(
            origin
                .parse::<HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        ),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
