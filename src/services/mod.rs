//! Business logic layer

pub mod todo;
pub mod user;

pub use todo::{TodoService, UpdateTodoInput};
pub use user::UserService;
