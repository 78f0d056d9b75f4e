//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use quill_types::{Comment, Post};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the query layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, creating schema...");

        Self::create_schema(&pool)
            .await
            .context("Failed to create database schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Open an in-memory database. Used by tests; a single connection is
    /// shared so every query sees the same database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::create_schema(&pool)
            .await
            .context("Failed to create database schema")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn create_schema(pool: &SqlitePool) -> Result<()> {
        // Post table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS post (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(100) NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Comment table; post_id must resolve to an existing post
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                post_id INTEGER NOT NULL REFERENCES post(id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // Post operations

    /// Insert a post. No HTTP route reaches this; posts only enter the
    /// database through seeding.
    pub async fn create_post(&self, title: &str, content: &str) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO post (title, content) VALUES (?1, ?2)
            "#,
        )
        .bind(title)
        .bind(content)
        .execute(&*self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, StorageError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM post
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<Post>, StorageError> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM post WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    // Comment operations

    pub async fn create_comment(&self, post_id: i64, content: &str) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO comment (content, post_id) VALUES (?1, ?2)
            "#,
        )
        .bind(content)
        .bind(post_id)
        .execute(&*self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_comment(&self, id: i64) -> Result<Option<Comment>, StorageError> {
        let row: Option<CommentRow> = sqlx::query_as(
            r#"
            SELECT id, content, post_id FROM comment WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            DELETE FROM comment WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    /// Comments belonging to one post, in insertion order.
    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, StorageError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT id, content, post_id FROM comment
            WHERE post_id = ?1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Every comment across all posts, newest first. Ids are monotonic,
    /// so descending id is insertion order reversed.
    pub async fn list_comments_newest_first(&self) -> Result<Vec<Comment>, StorageError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT id, content, post_id FROM comment
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Seed demo posts and comments if the post table is empty.
    pub async fn seed_demo(&self) -> Result<(), StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post")
            .fetch_one(&*self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        tracing::info!("Seeding demo posts");

        let first = self
            .create_post("Post The First", "Content for the first post")
            .await?;
        let second = self
            .create_post("Post The Second", "Content for the Second post")
            .await?;
        self.create_post("Post The Third", "Content for the third post")
            .await?;

        self.create_comment(first, "Comment for the first post").await?;
        self.create_comment(second, "Comment for the second post").await?;
        self.create_comment(second, "Another comment for the second post")
            .await?;
        self.create_comment(first, "Another comment for the first post")
            .await?;

        Ok(())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            content: r.content,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    content: String,
    post_id: i64,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment {
            id: r.id,
            content: r.content,
            post_id: r.post_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_post_lookup() {
        let db = Database::in_memory().await.unwrap();

        let id = db.create_post("Hello", "World").await.unwrap();
        let post = db.get_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");

        // Absent ids come back as None, not an error
        assert!(db.get_post(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let db = Database::in_memory().await.unwrap();

        let a = db.create_post("a", "").await.unwrap();
        let b = db.create_post("b", "").await.unwrap();
        assert!(b > a);

        let c1 = db.create_comment(a, "one").await.unwrap();
        let c2 = db.create_comment(b, "two").await.unwrap();
        assert!(c2 > c1);
    }

    #[tokio::test]
    async fn test_comments_for_post_filters_by_parent() {
        let db = Database::in_memory().await.unwrap();

        let a = db.create_post("a", "").await.unwrap();
        let b = db.create_post("b", "").await.unwrap();
        db.create_comment(a, "on a").await.unwrap();
        db.create_comment(b, "on b").await.unwrap();
        db.create_comment(a, "also on a").await.unwrap();

        let comments = db.comments_for_post(a).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments.iter().all(|c| c.post_id == a));
        assert_eq!(comments[0].content, "on a");
        assert_eq!(comments[1].content, "also on a");
    }

    #[tokio::test]
    async fn test_list_comments_newest_first() {
        let db = Database::in_memory().await.unwrap();

        let a = db.create_post("a", "").await.unwrap();
        let b = db.create_post("b", "").await.unwrap();
        db.create_comment(a, "first").await.unwrap();
        db.create_comment(b, "second").await.unwrap();
        db.create_comment(a, "third").await.unwrap();

        let comments = db.list_comments_newest_first().await.unwrap();
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|x, y| y.cmp(x));
        assert_eq!(ids, sorted);
        assert_eq!(comments[0].content, "third");
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let db = Database::in_memory().await.unwrap();

        let result = db.create_comment(9999, "orphan").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_comment_leaves_post() {
        let db = Database::in_memory().await.unwrap();

        let post_id = db.create_post("a", "").await.unwrap();
        let comment_id = db.create_comment(post_id, "bye").await.unwrap();

        db.delete_comment(comment_id).await.unwrap();
        assert!(db.get_comment(comment_id).await.unwrap().is_none());
        assert!(db.get_post(post_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        Database::create_schema(&db.pool).await.unwrap();

        let posts = db.list_posts().await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_seed_demo_runs_once() {
        let db = Database::in_memory().await.unwrap();

        db.seed_demo().await.unwrap();
        assert_eq!(db.list_posts().await.unwrap().len(), 3);
        assert_eq!(db.list_comments_newest_first().await.unwrap().len(), 4);

        // Second run is a no-op
        db.seed_demo().await.unwrap();
        assert_eq!(db.list_posts().await.unwrap().len(), 3);
    }
}
