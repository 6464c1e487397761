pub mod extract;
pub mod health_handlers;
pub mod todo_handlers;
pub mod user_handlers;

pub use extract::{ApiJson, ValidId};
pub use health_handlers::health_check;
pub use todo_handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};
pub use user_handlers::{create_user, delete_user, get_user, list_users, update_user};
