use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{validate_ids, AnnotationStore};
use crate::{
	common::errors::Result,
	domain::{SaveUserMuseum, UserMuseumRecord},
};

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryAnnotationStore {
	documents: RwLock<HashMap<String, UserMuseumRecord>>,
}

#[async_trait]
impl AnnotationStore for MemoryAnnotationStore {
	async fn save_user_museum(&self, save: SaveUserMuseum) -> Result<UserMuseumRecord> {
		validate_ids(&save.user_id, &save.museum_id)?;

		let mut documents = self.documents.write().await;
		let key = save.key();
		let record = save.merge_into(documents.remove(&key));
		documents.insert(record.key(), record.clone());

		Ok(record)
	}

	async fn get_user_museum(
		&self,
		user_id: &str,
		museum_id: &str,
	) -> Result<Option<UserMuseumRecord>> {
		Ok(self
			.documents
			.read()
			.await
			.get(&mp_utils::composite_key(user_id, museum_id))
			.cloned())
	}

	async fn get_all_user_museums(&self, user_id: &str) -> Result<Vec<UserMuseumRecord>> {
		let mut records = self
			.documents
			.read()
			.await
			.values()
			.filter(|record| record.user_id == user_id)
			.cloned()
			.collect::<Vec<_>>();

		records.sort_by(|a, b| a.museum_id.cmp(&b.museum_id));

		Ok(records)
	}
}
