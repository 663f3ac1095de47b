use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single blog post.
///
/// `id` and `date` are assigned by the server at creation time and are
/// immutable afterwards; updates replace `title` and `content` only.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	pub id: i64,
	/// The title of the post.
	pub title: String,
	/// The content of the post.
	pub content: String,
	/// The creation time of the post, as a sortable ISO-8601 timestamp.
	pub date: String,
}

/// The client-supplied payload for creating or updating a post.
///
/// Absent fields deserialize to the empty string, so a missing field and
/// an empty one fail the same non-empty check.
#[derive(Debug, Deserialize, Validate)]
pub struct PostInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Title and content are required"))]
	pub title: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Title and content are required"))]
	pub content: String,
}
