//! Todo service
//!
//! Validates input and delegates to the owner-scoped repository. The
//! authenticated user id arrives as an explicit argument from the
//! identity gate; nothing here ever accepts a client-supplied owner.
//!
//! "Not found" and "not owned by you" are deliberately the same error:
//! the repository query cannot distinguish them and neither can a
//! caller probing for other users' todo ids.

use crate::error::ApiError;
use crate::repositories::{TodoPatch, TodoRecord, TodoRepository};
use sqlx::PgPool;
use uuid::Uuid;

const TITLE_MAX_LEN: usize = 500;

/// Patch input for updating a todo
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoInput {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Todo service for business logic
pub struct TodoService;

impl TodoService {
    /// List the user's todos, newest first. An empty list is a normal
    /// result, not an error.
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<TodoRecord>, ApiError> {
        Ok(TodoRepository::list_for_user(pool, user_id).await?)
    }

    /// Create a todo owned by the user
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        title: &str,
    ) -> Result<TodoRecord, ApiError> {
        let title = validate_title(title)?;
        Ok(TodoRepository::create(pool, user_id, title).await?)
    }

    /// Patch a todo owned by the user; absent fields are unchanged
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        todo_id: Uuid,
        input: UpdateTodoInput,
    ) -> Result<TodoRecord, ApiError> {
        let title = match input.title.as_deref() {
            Some(title) => Some(validate_title(title)?.to_string()),
            None => None,
        };

        let patch = TodoPatch {
            title,
            completed: input.completed,
        };

        TodoRepository::update(pool, user_id, todo_id, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
    }

    /// Delete a todo owned by the user
    pub async fn delete(pool: &PgPool, user_id: Uuid, todo_id: Uuid) -> Result<(), ApiError> {
        let deleted = TodoRepository::delete(pool, user_id, todo_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Todo not found".to_string()));
        }
        Ok(())
    }
}

/// Validate and normalize a todo title
fn validate_title(title: &str) -> Result<&str, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("Title must not be empty".to_string()));
    }
    if title.len() > TITLE_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("buy milk")]
    #[case("  trim me  ")]
    #[case("x")]
    fn test_valid_titles(#[case] title: &str) {
        assert!(validate_title(title).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_empty_titles_rejected(#[case] title: &str) {
        assert!(matches!(
            validate_title(title),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(validate_title("  buy milk  ").unwrap(), "buy milk");
    }

    #[test]
    fn test_overlong_title_rejected() {
        let title = "a".repeat(TITLE_MAX_LEN + 1);
        assert!(validate_title(&title).is_err());
    }
}
