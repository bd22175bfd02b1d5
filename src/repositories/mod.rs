//! Data access layer
//!
//! Repositories own all SQL. They return raw `sqlx` errors; the service
//! layer reclassifies those into the API error taxonomy.

mod todo;
mod user;

pub use todo::{TodoPatch, TodoRecord, TodoRepository};
pub use user::{UserRecord, UserRepository};
