use axum::{
	extract::{Query, State},
	response::{IntoResponse, Response},
	Json,
};
use mp_wikidata::{museums, Museum, MuseumPage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::parse_offset;
use crate::{
	error::{ApiError, ApiResult, Payload},
	AppState,
};

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
	pub id: Option<String>,
	pub q: Option<String>,
	pub offset: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct BrowseParams {
	pub offset: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct MuseumBody {
	pub museum: Option<Museum>,
}

#[derive(Serialize, Debug)]
pub struct Suggestions {
	pub museums: Vec<Museum>,
}

/// A single museum by entity URI, or a page of label matches.
pub async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> ApiResult<Response> {
	if let Some(id) = params.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
		debug!(%id, "Museum lookup");
		let museum = museums::by_ids(&state.wikidata, &[id])
			.await
			.map_err(|e| ApiError::from_wikidata(Payload::Museum, e))?
			.into_iter()
			.next();

		return Ok(Json(MuseumBody { museum }).into_response());
	}

	let q = params
		.q
		.filter(|q| !q.trim().is_empty())
		.ok_or_else(|| ApiError::bad_request(Payload::Museums))?;
	let offset = parse_offset(params.offset.as_deref());

	let page = museums::search(&state.wikidata, &q, offset)
		.await
		.map_err(|e| ApiError::from_wikidata(Payload::Museums, e))?;

	Ok(Json(page).into_response())
}

pub async fn typeahead(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> ApiResult<Json<Suggestions>> {
	let q = params
		.q
		.filter(|q| !q.trim().is_empty())
		.ok_or_else(|| ApiError::bad_request(Payload::Museums))?;

	let museums = museums::typeahead(&state.wikidata, &q)
		.await
		.map_err(|e| ApiError::from_wikidata(Payload::Museums, e))?;

	Ok(Json(Suggestions { museums }))
}

pub async fn browse(
	State(state): State<AppState>,
	Query(params): Query<BrowseParams>,
) -> ApiResult<Json<MuseumPage>> {
	museums::page(&state.wikidata, parse_offset(params.offset.as_deref()))
		.await
		.map(Json)
		.map_err(|e| ApiError::from_wikidata(Payload::Museums, e))
}
