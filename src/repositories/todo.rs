//! Todo repository for database operations
//!
//! Ownership scoping lives here: every statement carries a
//! `user_id = $n` predicate, so a todo belonging to another user is
//! indistinguishable from one that does not exist. No query in this
//! module can touch a row the given user does not own.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Todo record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TodoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patch input for updating a todo; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Todo repository for database operations
pub struct TodoRepository;

impl TodoRepository {
    /// List all todos owned by a user, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TodoRecord>, sqlx::Error> {
        sqlx::query_as::<_, TodoRecord>(
            r#"
            SELECT id, user_id, title, completed, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Insert a todo owned by the given user.
    ///
    /// created_at and updated_at default to the same NOW(), so a fresh
    /// todo always has equal timestamps.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        title: &str,
    ) -> Result<TodoRecord, sqlx::Error> {
        sqlx::query_as::<_, TodoRecord>(
            r#"
            INSERT INTO todos (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, completed, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(pool)
        .await
    }

    /// Apply a patch to a todo owned by the given user.
    ///
    /// Returns None when no row matches both id and owner; the caller
    /// cannot tell (and must not reveal) which predicate failed.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
        patch: TodoPatch,
    ) -> Result<Option<TodoRecord>, sqlx::Error> {
        sqlx::query_as::<_, TodoRecord>(
            r#"
            UPDATE todos SET
                title = COALESCE($3, title),
                completed = COALESCE($4, completed),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, completed, created_at, updated_at
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.completed)
        .fetch_optional(pool)
        .await
    }

    /// Delete a todo owned by the given user.
    ///
    /// Same uniform semantics as `update`: false means "no such todo of
    /// yours", whether it never existed or belongs to someone else.
    pub async fn delete(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(todo_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
