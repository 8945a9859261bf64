#[cfg(test)]
mod controller;
mod error_mapping;
pub mod models;
pub mod services;
pub mod tui;
pub mod view;

pub use models::todo_model::{EditState, TodoModel};
pub use services::{TodoCommand, TodoError, TodoService, TodoServiceMessage};
pub use view::{render, TodoView};
