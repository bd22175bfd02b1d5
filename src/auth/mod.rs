//! Authentication module
//!
//! JWT bearer tokens with argon2 password hashing. `AuthUser` is the
//! request-level gate; `JwtService` and `PasswordService` are the
//! primitives behind it.

mod extract;
mod jwt;
mod password;

pub use extract::{bearer_token, AuthUser};
pub use jwt::{Claims, JwtService, TokenError};
pub use password::PasswordService;
