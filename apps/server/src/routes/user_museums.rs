use axum::{
	extract::{Query, State},
	response::{IntoResponse, Response},
	Json,
};
use mp_core::domain::{SaveUserMuseum, UserMuseumRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
	error::{ApiError, ApiResult, Payload},
	AppState,
};

#[derive(Deserialize, Debug, Default)]
pub struct UserParams {
	pub user: Option<String>,
	pub museum: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct RecordBody {
	pub record: Option<UserMuseumRecord>,
}

#[derive(Serialize, Debug)]
pub struct Records {
	pub records: Vec<UserMuseumRecord>,
}

/// All of a user's annotations, or one of them when `museum` is given.
pub async fn fetch(
	State(state): State<AppState>,
	Query(params): Query<UserParams>,
) -> ApiResult<Response> {
	let user = params
		.user
		.filter(|user| !user.trim().is_empty())
		.ok_or_else(|| ApiError::bad_request(Payload::Bare).with_message("missing 'user'"))?;

	match params.museum {
		Some(museum) => {
			let record = state
				.store
				.get_user_museum(&user, &museum)
				.await
				.map_err(|e| ApiError::from_core(Payload::Record, e))?;

			Ok(Json(RecordBody { record }).into_response())
		}
		None => {
			let records = state
				.store
				.get_all_user_museums(&user)
				.await
				.map_err(|e| ApiError::from_core(Payload::Bare, e))?;

			Ok(Json(Records { records }).into_response())
		}
	}
}

/// Merges the given fields into the stored annotation.
pub async fn save(
	State(state): State<AppState>,
	Json(save): Json<SaveUserMuseum>,
) -> ApiResult<Json<RecordBody>> {
	let record = state
		.store
		.save_user_museum(save)
		.await
		.map_err(|e| ApiError::from_core(Payload::Record, e))?;

	info!(user_id = %record.user_id, museum_id = %record.museum_id, "Saved annotation");

	Ok(Json(RecordBody {
		record: Some(record),
	}))
}
