//! Museum Passport core
//!
//! Browsing and searching museums from Wikidata, keeping per-user annotations
//! (visited, wish to visit, notes) and reconciling both into client state.

use std::{path::Path, sync::Arc};

use tracing::info;

pub mod annotations;
pub mod common;
pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod session;
pub mod state;
pub mod typeahead;

pub use annotations::{AnnotationStore, MemoryAnnotationStore, SqliteAnnotationStore};
pub use common::errors::{CoreError, Result};
pub use config::AppConfig;
pub use session::MuseumsContext;

use infra::db::Database;

/// Opens (and migrates) the annotation database configured for `config`.
pub async fn open_annotation_store(config: &AppConfig) -> Result<Arc<SqliteAnnotationStore>> {
	open_annotation_store_at(&config.database_path()).await
}

pub async fn open_annotation_store_at(path: &Path) -> Result<Arc<SqliteAnnotationStore>> {
	let db = Database::open(path).await?;
	db.migrate().await?;
	info!("Annotation store ready at {:?}", path);

	Ok(Arc::new(SqliteAnnotationStore::new(db)))
}

/// Builds a session context from configuration: SQLite annotations, the configured
/// Wikidata endpoint and the local user data cache.
pub async fn context_from_config(config: &AppConfig) -> Result<MuseumsContext> {
	let store = open_annotation_store(config).await?;
	let wikidata = config.wikidata.request_config()?;

	Ok(MuseumsContext::new(wikidata, store).with_local_cache(config.user_data_cache_path()))
}
