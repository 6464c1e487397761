pub mod todo;
pub mod user;

pub use todo::{
    CreateTodoRequest, NewTodo, TodoChanges, TodoItem, TodoStatus, UpdateTodoRequest,
};
pub use user::{CreateUserRequest, NewUser, UpdateUserRequest, User};
