#![warn(clippy::pedantic)]

mod error;
mod extract;
mod model;
mod repo;
mod route;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Sqlite>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access.
/// Here that is just the database pool; handlers take it through the
/// [`axum::extract::State`] extractor.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
}

/// Assembles the full application router.
///
/// The API lives under `/api/posts`; everything else falls back to the
/// static asset directory, which serves the frontend and never touches
/// post data.
fn app(state: State) -> Router {
	Router::new()
		.nest("/api/posts", route::posts::routes())
		.fallback_service(ServeDir::new("static").append_index_html_on_directories(true))
		.layer(CorsLayer::permissive())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt::init();
	dotenvy::dotenv().ok();

	let url = std::env::var("DATABASE_URL")
		.unwrap_or_else(|_| "sqlite://blog.db?mode=rwc".to_owned());

	let database = Database::connect(&url)
		.await
		.expect("failed to connect to database");

	// Schema must exist before the listener accepts traffic.
	repo::init(&database)
		.await
		.expect("failed to initialize database schema");

	let app = app(State { database });

	let port = std::env::var("PORT").map_or_else(
		|_| 5000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(listener, app).await.unwrap();
}
