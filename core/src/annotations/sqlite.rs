use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
	sea_query::OnConflict, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use super::{validate_ids, AnnotationStore};
use crate::{
	common::errors::{CoreError, Result},
	domain::{SaveUserMuseum, UserMuseumRecord},
	infra::db::{
		entities::{
			user_museum::{self, Column},
			UserMuseum,
		},
		Database,
	},
};

/// Annotations in the local SQLite database.
#[derive(Clone, Debug)]
pub struct SqliteAnnotationStore {
	db: Database,
}

impl SqliteAnnotationStore {
	/// `db` must already be migrated.
	pub fn new(db: Database) -> Self {
		Self { db }
	}
}

#[async_trait]
impl AnnotationStore for SqliteAnnotationStore {
	async fn save_user_museum(&self, save: SaveUserMuseum) -> Result<UserMuseumRecord> {
		validate_ids(&save.user_id, &save.museum_id)?;

		let key = save.key();
		let now = Utc::now();

		// Only the columns present in `save` are touched when the row already exists
		let mut update_columns = vec![Column::UpdatedAt];
		if save.visited.is_some() {
			update_columns.push(Column::Visited);
		}
		if save.wish.is_some() {
			update_columns.push(Column::Wish);
		}
		if save.notes.is_some() {
			update_columns.push(Column::Notes);
		}

		let row = user_museum::ActiveModel {
			id: Set(key.clone()),
			user_id: Set(save.user_id.clone()),
			museum_id: Set(save.museum_id.clone()),
			visited: Set(save.visited.unwrap_or_default()),
			wish: Set(save.wish.unwrap_or_default()),
			notes: Set(save.notes.clone().unwrap_or_default()),
			created_at: Set(now),
			updated_at: Set(now),
		};

		UserMuseum::insert(row)
			.on_conflict(
				OnConflict::column(Column::Id)
					.update_columns(update_columns)
					.to_owned(),
			)
			.exec_without_returning(self.db.conn())
			.await?;

		debug!(%key, "Saved user museum");

		UserMuseum::find_by_id(key.clone())
			.one(self.db.conn())
			.await?
			.map(Into::into)
			.ok_or_else(|| CoreError::NotFound(format!("user museum '{key}' after save")))
	}

	async fn get_user_museum(
		&self,
		user_id: &str,
		museum_id: &str,
	) -> Result<Option<UserMuseumRecord>> {
		Ok(
			UserMuseum::find_by_id(mp_utils::composite_key(user_id, museum_id))
				.one(self.db.conn())
				.await?
				.map(Into::into),
		)
	}

	async fn get_all_user_museums(&self, user_id: &str) -> Result<Vec<UserMuseumRecord>> {
		Ok(UserMuseum::find()
			.filter(Column::UserId.eq(user_id))
			.order_by_asc(Column::MuseumId)
			.all(self.db.conn())
			.await?
			.into_iter()
			.map(Into::into)
			.collect())
	}
}
