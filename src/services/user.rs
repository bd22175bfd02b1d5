//! Account service: registration, login, account deletion
//!
//! Login failure is uniform: an unknown username and a wrong password
//! produce the same 401, so the endpoint cannot be used to probe which
//! usernames exist. Argon2 work always runs on the blocking pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 64;
const PASSWORD_MIN_LEN: usize = 8;

/// Argon2id hash of a throwaway input, verified against when the
/// username does not exist. Keeps the unknown-username login path as
/// expensive as a wrong-password one, so response timing cannot be
/// used to enumerate usernames.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$VE0e3g7DalWHgDwou3nuRA$uC6TER156UQpk0lNp5A2mzPnpMQp4y3uX/1wxwqq0ts";

/// Account service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and return a bearer token for the account
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let username = validate_username(username)?;

        if password.len() < PASSWORD_MIN_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LEN
            )));
        }

        if UserRepository::username_exists(pool, username).await? {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;

        // The exists check above races with concurrent registrations;
        // the unique constraint is the authority.
        let user = UserRepository::create(pool, username, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Username already taken".to_string())
                } else {
                    ApiError::Database(e)
                }
            })?;

        info!(user_id = %user.id, "user registered");

        Ok(jwt.issue(user.id).map_err(anyhow::Error::from)?)
    }

    /// Login with username and password, returning a bearer token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let user = match UserRepository::find_by_username(pool, username).await? {
            Some(user) => user,
            None => {
                // Burn the same hashing cost as a real verification
                let _ = PasswordService::verify_async(
                    password.to_string(),
                    DUMMY_PASSWORD_HASH.to_string(),
                )
                .await?;
                debug!("login rejected: unknown username");
                return Err(ApiError::Unauthorized);
            }
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;

        if !valid {
            debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(ApiError::Unauthorized);
        }

        Ok(jwt.issue(user.id).map_err(anyhow::Error::from)?)
    }

    /// Delete an account and everything it owns.
    ///
    /// The user row and all owned todos go in one transaction; a token
    /// for the deleted account stops authenticating immediately because
    /// the identity gate checks the subject still exists.
    pub async fn delete_account(pool: &PgPool, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = UserRepository::delete_with_todos(pool, user_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Account not found".to_string()));
        }
        info!(%user_id, "account deleted");
        Ok(())
    }
}

/// Validate and normalize a username at registration
fn validate_username(username: &str) -> Result<&str, ApiError> {
    let username = username.trim();
    if username.len() < USERNAME_MIN_LEN || username.len() > USERNAME_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(ApiError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(username)
}

/// Postgres unique-constraint violation (SQLSTATE 23505)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
