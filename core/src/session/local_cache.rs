//! On-disk copy of the user's annotations, read before the store answers.
//!
//! Entries not keyed by an entity URI are dropped on load, and a file left with none
//! (written before museums had entity ids) is deleted.

use std::path::Path;

use mp_utils::FileIOError;
use tokio::fs;
use tracing::{info, warn};

use crate::{common::errors::Result, domain::is_entity_uri, state::UserData};

/// `None` when there is no usable cache.
pub async fn load(path: &Path) -> Result<Option<UserData>> {
	let raw = match fs::read(path).await {
		Ok(raw) => raw,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(FileIOError::with_context(path, e, "reading user data cache").into()),
	};

	let cached = match serde_json::from_slice::<UserData>(&raw) {
		Ok(cached) => cached,
		Err(e) => {
			warn!("Clearing unreadable user data cache at {:?}: {e}", path);
			remove(path).await?;
			return Ok(None);
		}
	};

	let total = cached.len();
	let user_data = cached
		.into_iter()
		.filter(|(id, _)| is_entity_uri(id))
		.collect::<UserData>();

	if user_data.len() == total {
		return Ok(Some(user_data));
	}

	if user_data.is_empty() {
		info!("Clearing legacy user data cache at {:?}", path);
		remove(path).await?;
		return Ok(None);
	}

	info!(
		dropped = total - user_data.len(),
		"Dropping entries without an entity URI from user data cache at {:?}", path
	);
	store(path, &user_data).await?;

	Ok(Some(user_data))
}

pub async fn store(path: &Path, user_data: &UserData) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)
			.await
			.map_err(|e| FileIOError::with_context(parent, e, "creating user data cache dir"))?;
	}

	fs::write(path, serde_json::to_vec_pretty(user_data)?)
		.await
		.map_err(|e| FileIOError::with_context(path, e, "writing user data cache"))?;

	Ok(())
}

pub async fn remove(path: &Path) -> Result<()> {
	match fs::remove_file(path).await {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(FileIOError::with_context(path, e, "removing user data cache").into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::UserMuseumData;
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;
	use tracing_test::traced_test;

	#[tokio::test]
	async fn round_trips_entity_keyed_data() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("nested").join("user_data.json");
		let user_data = UserData::from([(
			"http://www.wikidata.org/entity/Q19675".to_string(),
			UserMuseumData {
				wish: true,
				visited: false,
				notes: "Mona Lisa".into(),
			},
		)]);

		store(&path, &user_data).await.unwrap();

		assert_eq!(load(&path).await.unwrap(), Some(user_data));
	}

	#[tokio::test]
	#[traced_test]
	async fn legacy_and_corrupt_caches_are_removed() {
		let dir = TempDir::new().unwrap();
		let legacy = dir.path().join("legacy.json");
		let corrupt = dir.path().join("corrupt.json");
		std::fs::write(&legacy, r#"{"Louvre|Paris|France":{"wish":true}}"#).unwrap();
		std::fs::write(&corrupt, "{not json").unwrap();

		assert_eq!(load(&legacy).await.unwrap(), None);
		assert_eq!(load(&corrupt).await.unwrap(), None);
		assert!(!legacy.exists());
		assert!(!corrupt.exists());
		assert!(logs_contain("Clearing legacy user data cache"));
		assert_eq!(load(&dir.path().join("missing.json")).await.unwrap(), None);
	}

	#[tokio::test]
	#[traced_test]
	async fn valid_entries_survive_next_to_invalid_ones() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("user_data.json");
		std::fs::write(
			&path,
			r#"{
				"http://www.wikidata.org/entity/Q19675": {"visited": true},
				"https://www.wikidata.org/entity/Q160236": {"wish": true},
				"Louvre|Paris|France": {"wish": true}
			}"#,
		)
		.unwrap();

		let expected = UserData::from([(
			"http://www.wikidata.org/entity/Q19675".to_string(),
			UserMuseumData {
				visited: true,
				..Default::default()
			},
		)]);

		assert_eq!(load(&path).await.unwrap(), Some(expected.clone()));
		assert!(logs_contain("Dropping entries without an entity URI"));

		// The pruned file is what the next start reads
		assert_eq!(load(&path).await.unwrap(), Some(expected));
	}
}
