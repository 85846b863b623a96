//! User annotation store
//!
//! Annotations are documents keyed by [`mp_utils::composite_key`], so a user has at
//! most one per museum. Every save is an independent partial upsert: fields left out
//! keep their stored value, and nothing spans more than one document.

use async_trait::async_trait;

use crate::{
	common::errors::{CoreError, Result},
	domain::{is_entity_uri, SaveUserMuseum, UserMuseumRecord},
};

mod memory;
mod sqlite;

pub use memory::MemoryAnnotationStore;
pub use sqlite::SqliteAnnotationStore;

#[async_trait]
pub trait AnnotationStore: Send + Sync {
	/// Merges `save` into the stored annotation, creating it on first write.
	async fn save_user_museum(&self, save: SaveUserMuseum) -> Result<UserMuseumRecord>;

	async fn get_user_museum(
		&self,
		user_id: &str,
		museum_id: &str,
	) -> Result<Option<UserMuseumRecord>>;

	/// Every annotation owned by `user_id`, ordered by museum id.
	async fn get_all_user_museums(&self, user_id: &str) -> Result<Vec<UserMuseumRecord>>;
}

fn validate_ids(user_id: &str, museum_id: &str) -> Result<()> {
	if user_id.trim().is_empty() {
		return Err(CoreError::InvalidOperation("user id must not be empty".into()));
	}
	if !is_entity_uri(museum_id) {
		return Err(CoreError::InvalidOperation(format!(
			"museum id must be a Wikidata entity URI, got '{museum_id}'"
		)));
	}
	Ok(())
}
