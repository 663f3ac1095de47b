use validator::Validate;

use crate::{
	error::Error,
	model::{Post, PostInput},
	Database,
};

/// Ensures the `post` table exists.
///
/// Idempotent and never destructive; existing rows and schema are left
/// untouched. Called once at startup before the server accepts traffic.
pub async fn init(database: &Database) -> Result<(), sqlx::Error> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS post (
			id      INTEGER PRIMARY KEY AUTOINCREMENT,
			title   TEXT NOT NULL,
			content TEXT NOT NULL,
			date    TEXT NOT NULL
		)
		"#,
	)
	.execute(database)
	.await?;

	Ok(())
}

/// Stamps creation time as a sortable ISO-8601 timestamp with microsecond
/// precision, e.g. `2024-01-01T12:00:00.000000`.
fn timestamp() -> String {
	chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Returns every post, newest first.
pub async fn list(database: &Database) -> Result<Vec<Post>, Error> {
	let posts = sqlx::query_as::<_, Post>(
		r#"
		SELECT id, title, content, date FROM post
		ORDER BY date DESC
		"#,
	)
	.fetch_all(database)
	.await?;

	Ok(posts)
}

/// Returns a single post by its unique id.
pub async fn get(database: &Database, id: i64) -> Result<Post, Error> {
	let post = sqlx::query_as::<_, Post>(
		r#"
		SELECT id, title, content, date FROM post
		WHERE id = ?
		"#,
	)
	.bind(id)
	.fetch_optional(database)
	.await?;

	post.ok_or(Error::UnknownPost(id))
}

/// Creates a new post, assigning its id and creation date.
pub async fn create(database: &Database, input: &PostInput) -> Result<Post, Error> {
	input.validate()?;

	let post = sqlx::query_as::<_, Post>(
		r#"
		INSERT INTO post (title, content, date)
		VALUES (?, ?, ?)
		RETURNING id, title, content, date
		"#,
	)
	.bind(&input.title)
	.bind(&input.content)
	.bind(timestamp())
	.fetch_one(database)
	.await?;

	Ok(post)
}

/// Replaces the title and content of an existing post.
///
/// Validation runs before the existence check, so invalid input reports
/// invalid input even for an id that does not exist. The creation date
/// is never re-stamped.
pub async fn update(database: &Database, id: i64, input: &PostInput) -> Result<Post, Error> {
	input.validate()?;

	let post = sqlx::query_as::<_, Post>(
		r#"
		UPDATE post
		SET title = ?, content = ?
		WHERE id = ?
		RETURNING id, title, content, date
		"#,
	)
	.bind(&input.title)
	.bind(&input.content)
	.bind(id)
	.fetch_optional(database)
	.await?;

	post.ok_or(Error::UnknownPost(id))
}

/// Permanently removes a post by its unique id.
pub async fn delete(database: &Database, id: i64) -> Result<(), Error> {
	let result = sqlx::query("DELETE FROM post WHERE id = ?")
		.bind(id)
		.execute(database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::UnknownPost(id));
	}

	Ok(())
}

#[cfg(test)]
mod test {
	use crate::{model::PostInput, Database, Error};

	async fn database() -> Database {
		let database = sqlx::sqlite::SqlitePoolOptions::new()
			.max_connections(1)
			.connect("sqlite::memory:")
			.await
			.unwrap();

		super::init(&database).await.unwrap();

		database
	}

	fn input(title: &str, content: &str) -> PostInput {
		PostInput {
			title: title.to_owned(),
			content: content.to_owned(),
		}
	}

	#[tokio::test]
	async fn test_init_is_idempotent() {
		let database = database().await;

		super::create(&database, &input("Hello", "World"))
			.await
			.unwrap();

		super::init(&database).await.unwrap();

		assert_eq!(super::list(&database).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_create_assigns_increasing_ids() {
		let database = database().await;

		let first = super::create(&database, &input("a", "b")).await.unwrap();
		let second = super::create(&database, &input("c", "d")).await.unwrap();

		assert!(second.id > first.id);
	}

	#[tokio::test]
	async fn test_create_rejects_empty_fields() {
		let database = database().await;

		let result = super::create(&database, &input("", "content")).await;

		assert!(matches!(result, Err(Error::Validation(_))));
		assert!(super::list(&database).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_list_orders_by_date_descending() {
		let database = database().await;

		// Insert directly with fixed dates, out of order, to pin the sort.
		for (title, date) in [
			("middle", "2024-01-02T00:00:00.000000"),
			("newest", "2024-01-03T00:00:00.000000"),
			("oldest", "2024-01-01T00:00:00.000000"),
		] {
			sqlx::query("INSERT INTO post (title, content, date) VALUES (?, 'x', ?)")
				.bind(title)
				.bind(date)
				.execute(&database)
				.await
				.unwrap();
		}

		let titles: Vec<String> = super::list(&database)
			.await
			.unwrap()
			.into_iter()
			.map(|post| post.title)
			.collect();

		assert_eq!(titles, ["newest", "middle", "oldest"]);
	}

	#[tokio::test]
	async fn test_update_preserves_id_and_date() {
		let database = database().await;

		let post = super::create(&database, &input("Hello", "World"))
			.await
			.unwrap();

		let updated = super::update(&database, post.id, &input("New", "Body"))
			.await
			.unwrap();

		assert_eq!(updated.id, post.id);
		assert_eq!(updated.date, post.date);
		assert_eq!(updated.title, "New");
		assert_eq!(updated.content, "Body");
	}

	#[tokio::test]
	async fn test_update_validates_before_existence() {
		let database = database().await;

		let result = super::update(&database, 999, &input("", "")).await;

		assert!(matches!(result, Err(Error::Validation(_))));

		let result = super::update(&database, 999, &input("valid", "valid")).await;

		assert!(matches!(result, Err(Error::UnknownPost(999))));
	}

	#[tokio::test]
	async fn test_delete_twice_reports_unknown_post() {
		let database = database().await;

		let post = super::create(&database, &input("Hello", "World"))
			.await
			.unwrap();

		super::delete(&database, post.id).await.unwrap();

		let result = super::delete(&database, post.id).await;

		assert!(matches!(result, Err(Error::UnknownPost(_))));
	}

	#[tokio::test]
	async fn test_get_round_trip() {
		let database = database().await;

		let created = super::create(&database, &input("Hello", "World"))
			.await
			.unwrap();
		let fetched = super::get(&database, created.id).await.unwrap();

		assert_eq!(fetched.id, created.id);
		assert_eq!(fetched.title, created.title);
		assert_eq!(fetched.content, created.content);
		assert_eq!(fetched.date, created.date);
	}
}
