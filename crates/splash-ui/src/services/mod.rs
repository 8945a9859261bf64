pub mod todo_service;

pub use todo_service::{TodoCommand, TodoError, TodoService, TodoServiceMessage};
