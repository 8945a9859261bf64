pub mod palette;
pub mod todo_model;
