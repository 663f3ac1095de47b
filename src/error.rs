use std::borrow::Cow;

use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use serde::Serialize;

/// Error type for the application.
///
/// Discriminates the three kinds every operation can fail with: invalid
/// input, unknown post, and storage failure. The Display output is not
/// sent to the client, so it can show sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("unknown post {0}")]
	UnknownPost(i64),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Error::Validation(errors) => {
				let message = errors
					.field_errors()
					.into_values()
					.flatten()
					.find_map(|error| error.message.clone())
					.unwrap_or(Cow::Borrowed("invalid input"));

				(
					StatusCode::BAD_REQUEST,
					Json(ErrorResponse {
						error: message.into_owned(),
					}),
				)
					.into_response()
			}
			Error::Json(error) => (
				StatusCode::BAD_REQUEST,
				Json(ErrorResponse {
					error: error.to_string(),
				}),
			)
				.into_response(),
			Error::UnknownPost(..) => (
				StatusCode::NOT_FOUND,
				Json(ErrorResponse {
					error: "Post not found".to_owned(),
				}),
			)
				.into_response(),
			Error::Database(error) => {
				tracing::error!(%error, "database error");

				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorResponse {
						error: "internal server error".to_owned(),
					}),
				)
					.into_response()
			}
		}
	}
}
