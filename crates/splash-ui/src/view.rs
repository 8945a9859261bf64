//! Pure projection of [`TodoModel`] into what the screen shows.
//!
//! `render` looks only at the model's list, input text and edit state; the
//! terminal layer draws the result without consulting the model again.

use splash_services::TaskId;

use crate::models::palette::{card_style, palette_index, CardStyle};
use crate::models::todo_model::TodoModel;

pub const TITLE: &str = "ColorSplash Todo App";
pub const INPUT_PLACEHOLDER: &str = "Add a new task";
pub const EMPTY_MESSAGE: &str = "No tasks yet. Add one above!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub title: &'static str,
    pub input: InputView,
    pub rows: Vec<RowView>,
    /// Shown in place of the list when there are no tasks
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    /// Placeholder to show, present only while the input is empty
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub index: usize,
    pub palette_index: usize,
    pub style: CardStyle,
    pub completed: bool,
    pub content: RowContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    /// Task text with Edit and Delete actions
    Display(String),
    /// Edit buffer with a Save action
    Editing(String),
}

impl RowView {
    pub fn is_editing(&self) -> bool {
        matches!(self.content, RowContent::Editing(_))
    }
}

pub fn render(model: &TodoModel) -> TodoView {
    let editing_id = model.editing_id();

    let rows: Vec<RowView> = model
        .todos()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let content = if editing_id == Some(&task.id) {
                RowContent::Editing(model.edit_text().to_string())
            } else {
                RowContent::Display(task.text.clone())
            };
            RowView {
                id: task.id.clone(),
                index,
                palette_index: palette_index(index),
                style: card_style(index),
                completed: task.completed,
                content,
            }
        })
        .collect();

    TodoView {
        title: TITLE,
        input: InputView {
            text: model.text().to_string(),
            placeholder: model.text().is_empty().then_some(INPUT_PLACEHOLDER),
        },
        empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
        rows,
    }
}
