//! HTTP API in front of Wikidata and the annotation store.

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use mp_core::AnnotationStore;
use mp_wikidata::RequestConfig;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
	pub wikidata: RequestConfig,
	pub store: Arc<dyn AnnotationStore>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(|| async { "Museum Passport API" }))
		.route("/health", get(|| async { "OK" }))
		.route("/api/museums", get(routes::museums::browse))
		.route("/api/search-museums", get(routes::museums::search))
		.route("/api/typeahead-museums", get(routes::museums::typeahead))
		.route(
			"/api/user-museums",
			get(routes::user_museums::fetch).put(routes::user_museums::save),
		)
		.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
		.layer(CorsLayer::permissive())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
