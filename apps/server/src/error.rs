//! API error type and its JSON rendering.
//!
//! Error bodies keep the shape of the successful answer of the route, with an empty
//! payload, so a client can read `museums`, `museum` or `record` without checking
//! the status first.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use mp_core::CoreError;
use serde_json::{json, Map, Value};
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Which empty payload goes with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
	/// `{"museums": []}`
	Museums,
	/// `{"museum": null}`
	Museum,
	/// `{"record": null}`
	Record,
	/// No payload, only `error`
	Bare,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	payload: Payload,
	message: Option<String>,
}

impl ApiError {
	pub fn bad_request(payload: Payload) -> Self {
		Self {
			status: StatusCode::BAD_REQUEST,
			payload,
			message: None,
		}
	}

	pub fn internal(payload: Payload, message: impl Into<String>) -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			payload,
			message: Some(message.into()),
		}
	}

	#[must_use]
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Maps a core failure, invalid input is the caller's fault and everything else ours.
	pub fn from_core(payload: Payload, e: CoreError) -> Self {
		match e {
			CoreError::InvalidOperation(message) => Self::bad_request(payload).with_message(message),
			CoreError::Wikidata(e) => Self::from_wikidata(payload, e),
			e => Self::internal(payload, e.to_string()),
		}
	}

	pub fn from_wikidata(payload: Payload, e: mp_wikidata::Error) -> Self {
		match e {
			mp_wikidata::Error::InvalidId(_) => Self::bad_request(payload).with_message(e.to_string()),
			e => Self::internal(payload, e.to_string()),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			error!(status = %self.status, "Request failed: {}", self.message.as_deref().unwrap_or_default());
		}

		let mut body = match self.payload {
			Payload::Museums => json!({ "museums": [] }),
			Payload::Museum => json!({ "museum": null }),
			Payload::Record => json!({ "record": null }),
			Payload::Bare => Value::Object(Map::new()),
		};

		if let (Some(message), Value::Object(fields)) = (self.message, &mut body) {
			fields.insert("error".to_string(), Value::String(message));
		}

		(self.status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::body::to_bytes;
	use pretty_assertions::assert_eq;

	async fn render(error: ApiError) -> (StatusCode, Value) {
		let response = error.into_response();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[tokio::test]
	async fn bad_request_without_message_is_just_the_empty_payload() {
		assert_eq!(
			render(ApiError::bad_request(Payload::Museums)).await,
			(StatusCode::BAD_REQUEST, json!({ "museums": [] }))
		);
	}

	#[tokio::test]
	async fn upstream_failures_carry_the_message() {
		let error = ApiError::from_wikidata(Payload::Museum, mp_wikidata::Error::Status(503));

		assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			render(error).await.1,
			json!({
				"museum": null,
				"error": "Wikidata query service answered with HTTP 503"
			})
		);
	}

	#[tokio::test]
	async fn invalid_ids_are_client_errors() {
		let error = ApiError::from_wikidata(
			Payload::Museum,
			mp_wikidata::Error::InvalidId("<nope>".into()),
		);

		assert_eq!(error.status(), StatusCode::BAD_REQUEST);
	}
}
