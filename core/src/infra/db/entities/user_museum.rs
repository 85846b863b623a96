//! User museum entity
//!
//! One row per (user, museum) annotation, keyed by the composite document id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::UserMuseumRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_museums")]
pub struct Model {
	/// `encode(user_id) + "_" + encode(museum_id)`
	#[sea_orm(primary_key, auto_increment = false)]
	pub id: String,
	pub user_id: String,
	pub museum_id: String,
	pub visited: bool,
	pub wish: bool,
	pub notes: String,
	pub created_at: DateTimeUtc,
	pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserMuseumRecord {
	fn from(model: Model) -> Self {
		Self {
			user_id: model.user_id,
			museum_id: model.museum_id,
			visited: model.visited,
			wish: model.wish,
			notes: model.notes,
		}
	}
}
