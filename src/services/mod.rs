pub mod todo_service;
pub mod user_service;

pub use todo_service::TodoService;
pub use user_service::UserService;
