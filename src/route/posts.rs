use axum::{
	extract::{Path, State},
	http::StatusCode,
	routing::get,
	Router,
};
use serde::Serialize;

use crate::{
	extract::Json,
	model::{Post, PostInput},
	repo, AppState, Database,
};

/// Confirmation body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
	pub message: String,
}

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_posts).post(create_post))
		.route(
			"/:id",
			get(get_post).put(update_post).delete(delete_post),
		)
}

/// Returns all posts, newest first.
async fn get_posts(State(database): State<Database>) -> Result<Json<Vec<Post>>, crate::Error> {
	let posts = repo::list(&database).await?;

	Ok(Json(posts))
}

/// Returns a single post by its unique id.
async fn get_post(
	State(database): State<Database>,
	Path(id): Path<i64>,
) -> Result<Json<Post>, crate::Error> {
	let post = repo::get(&database, id).await?;

	Ok(Json(post))
}

/// Creates a new post from a title and content.
async fn create_post(
	State(database): State<Database>,
	Json(input): Json<PostInput>,
) -> Result<(StatusCode, Json<Post>), crate::Error> {
	let post = repo::create(&database, &input).await?;

	Ok((StatusCode::CREATED, Json(post)))
}

/// Replaces the title and content of an existing post.
async fn update_post(
	State(database): State<Database>,
	Path(id): Path<i64>,
	Json(input): Json<PostInput>,
) -> Result<Json<Post>, crate::Error> {
	let post = repo::update(&database, id, &input).await?;

	Ok(Json(post))
}

/// Deletes an existing post by its unique id.
async fn delete_post(
	State(database): State<Database>,
	Path(id): Path<i64>,
) -> Result<Json<Deleted>, crate::Error> {
	repo::delete(&database, id).await?;

	Ok(Json(Deleted {
		message: "Post deleted successfully".to_owned(),
	}))
}
