//! Todo list state and its transitions.
//!
//! `TodoModel` owns everything the screen shows: the cached collection,
//! the new-task input and the edit state. User intents return the
//! [`TodoCommand`] to run (if any); service replies go through
//! [`TodoModel::apply`], which may ask for a follow-up command. Every
//! transition bumps `revision`, and the UI redraws only when it changes.

use splash_core::AppError;
use splash_services::{Task, TaskId, TaskPayload};

use crate::services::{TodoCommand, TodoError, TodoServiceMessage};

/// Editing axis. At most one task is edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: TaskId, buffer: String },
}

#[derive(Debug, Clone, Default)]
pub struct TodoModel {
    todos: Vec<Task>,
    text: String,
    edit: EditState,
    revision: u64,
}

impl TodoModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Task] {
        &self.todos
    }

    /// Current new-task input
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn editing_id(&self) -> Option<&TaskId> {
        match &self.edit {
            EditState::Editing { id, .. } => Some(id),
            EditState::Idle => None,
        }
    }

    /// Edit buffer; empty while idle.
    pub fn edit_text(&self) -> &str {
        match &self.edit {
            EditState::Editing { buffer, .. } => buffer,
            EditState::Idle => "",
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    /// Replace the edit buffer. Ignored while idle.
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let EditState::Editing { buffer, .. } = &mut self.edit {
            *buffer = text.into();
            self.touch();
        }
    }

    /// Start editing `id`, seeding the buffer with its current text.
    ///
    /// Any edit already in progress is abandoned. Returns false (and changes
    /// nothing) when the id is not in the local list.
    pub fn start_edit(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.todos.iter().find(|t| &t.id == id) else {
            return false;
        };
        self.edit = EditState::Editing {
            id: task.id.clone(),
            buffer: task.text.clone(),
        };
        self.touch();
        true
    }

    pub fn cancel_edit(&mut self) {
        if self.edit != EditState::Idle {
            self.edit = EditState::Idle;
            self.touch();
        }
    }

    /// Create command for the current input, or `None` for blank input.
    ///
    /// The input is sent as typed; it is cleared once the create succeeds.
    pub fn submit_new(&self) -> Option<TodoCommand> {
        if self.text.trim().is_empty() {
            return None;
        }
        Some(TodoCommand::Create(TaskPayload::new(self.text.clone())))
    }

    /// Update command for the task being edited, or `None` when idle or the
    /// buffer is blank. Updates replace the whole task, so `completed` is
    /// reset to false.
    pub fn submit_edit(&self) -> Option<TodoCommand> {
        match &self.edit {
            EditState::Editing { id, buffer } if !buffer.trim().is_empty() => {
                Some(TodoCommand::Update {
                    id: id.clone(),
                    payload: TaskPayload::new(buffer.clone()),
                })
            }
            _ => None,
        }
    }

    /// Delete is always issued, even for ids missing locally.
    pub fn request_delete(&self, id: &TaskId) -> TodoCommand {
        TodoCommand::Delete(id.clone())
    }

    pub fn request_refresh(&self) -> TodoCommand {
        TodoCommand::Fetch
    }

    /// Fold a service reply into the model.
    ///
    /// Create and update are reconciled by refetching the whole list, so
    /// they return [`TodoCommand::Fetch`]. Delete is reconciled locally.
    /// Failures are logged and leave the model untouched.
    pub fn apply(&mut self, message: TodoServiceMessage) -> Option<TodoCommand> {
        match message {
            TodoServiceMessage::FetchDone(Ok(todos)) => {
                tracing::debug!("Replacing local list with {} todos", todos.len());
                self.todos = todos;
                self.touch();
                None
            }
            TodoServiceMessage::CreateDone(Ok(_)) => {
                tracing::debug!("Todo created, refetching");
                self.text.clear();
                self.touch();
                Some(TodoCommand::Fetch)
            }
            TodoServiceMessage::UpdateDone { id, result: Ok(_) } => {
                tracing::debug!("Todo {} saved, refetching", id);
                self.edit = EditState::Idle;
                self.touch();
                Some(TodoCommand::Fetch)
            }
            TodoServiceMessage::DeleteDone { id, result: Ok(()) } => {
                let before = self.todos.len();
                self.todos.retain(|t| t.id != id);
                if self.todos.len() != before {
                    self.touch();
                }
                None
            }
            TodoServiceMessage::FetchDone(Err(e)) => {
                log_failure("fetch todos", e);
                None
            }
            TodoServiceMessage::CreateDone(Err(e)) => {
                log_failure("create todo", e);
                None
            }
            TodoServiceMessage::UpdateDone { id, result: Err(e) } => {
                log_failure(&format!("update todo {}", id), e);
                None
            }
            TodoServiceMessage::DeleteDone { id, result: Err(e) } => {
                log_failure(&format!("delete todo {}", id), e);
                None
            }
        }
    }
}

fn log_failure(operation: &str, error: TodoError) {
    let error = AppError::from(error);
    tracing::error!(
        "Failed to {}: {} ({})",
        operation,
        error,
        error.user_message()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, text: &str) -> Task {
        Task {
            id: TaskId::new(id),
            text: text.to_string(),
            completed: false,
        }
    }

    fn loaded(todos: Vec<Task>) -> TodoModel {
        let mut model = TodoModel::new();
        model.apply(TodoServiceMessage::FetchDone(Ok(todos)));
        model
    }

    #[test]
    fn blank_input_produces_no_command() {
        let mut model = TodoModel::new();
        assert_eq!(model.submit_new(), None);
        model.set_text("   \t ");
        assert_eq!(model.submit_new(), None);
        assert_eq!(model.text(), "   \t ");
    }

    #[test]
    fn create_sends_text_as_typed() {
        let mut model = TodoModel::new();
        model.set_text("  Buy milk ");
        assert_eq!(
            model.submit_new(),
            Some(TodoCommand::Create(TaskPayload::new("  Buy milk ")))
        );
    }

    #[test]
    fn successful_create_clears_input_and_refetches() {
        let mut model = TodoModel::new();
        model.set_text("Buy milk");
        let next = model.apply(TodoServiceMessage::CreateDone(Ok(Some(task("1", "Buy milk")))));
        assert_eq!(next, Some(TodoCommand::Fetch));
        assert_eq!(model.text(), "");
    }

    #[test]
    fn create_without_echoed_task_still_refetches() {
        let mut model = TodoModel::new();
        model.set_text("Buy milk");
        let next = model.apply(TodoServiceMessage::CreateDone(Ok(None)));
        assert_eq!(next, Some(TodoCommand::Fetch));
        assert_eq!(model.text(), "");
    }

    #[test]
    fn failed_create_keeps_input() {
        let mut model = TodoModel::new();
        model.set_text("Buy milk");
        let revision = model.revision();
        let next = model.apply(TodoServiceMessage::CreateDone(Err(TodoError::Timeout)));
        assert_eq!(next, None);
        assert_eq!(model.text(), "Buy milk");
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn start_edit_seeds_buffer() {
        let mut model = loaded(vec![task("a", "Alpha"), task("b", "Beta")]);
        assert!(model.start_edit(&TaskId::new("a")));
        assert_eq!(model.editing_id(), Some(&TaskId::new("a")));
        assert_eq!(model.edit_text(), "Alpha");
    }

    #[test]
    fn starting_second_edit_replaces_first() {
        let mut model = loaded(vec![task("a", "Alpha"), task("b", "Beta")]);
        model.start_edit(&TaskId::new("a"));
        model.set_edit_text("Alpha changed");

        assert!(model.start_edit(&TaskId::new("b")));
        assert_eq!(
            model.edit_state(),
            &EditState::Editing {
                id: TaskId::new("b"),
                buffer: "Beta".to_string()
            }
        );
    }

    #[test]
    fn start_edit_on_unknown_id_is_ignored() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        let revision = model.revision();
        assert!(!model.start_edit(&TaskId::new("zzz")));
        assert_eq!(model.editing_id(), None);
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn set_edit_text_while_idle_is_ignored() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        let revision = model.revision();
        model.set_edit_text("stray");
        assert_eq!(model.edit_text(), "");
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn blank_edit_produces_no_command() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        assert_eq!(model.submit_edit(), None);
        model.start_edit(&TaskId::new("a"));
        model.set_edit_text("  ");
        assert_eq!(model.submit_edit(), None);
        assert_eq!(model.editing_id(), Some(&TaskId::new("a")));
    }

    #[test]
    fn edit_submits_full_replace() {
        let mut model = loaded(vec![Task {
            id: TaskId::new("a"),
            text: "Alpha".into(),
            completed: true,
        }]);
        model.start_edit(&TaskId::new("a"));
        model.set_edit_text("Alpha 2");
        assert_eq!(
            model.submit_edit(),
            Some(TodoCommand::Update {
                id: TaskId::new("a"),
                payload: TaskPayload {
                    text: "Alpha 2".into(),
                    completed: false
                }
            })
        );
    }

    #[test]
    fn successful_update_returns_to_idle_and_refetches() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.start_edit(&TaskId::new("a"));
        let next = model.apply(TodoServiceMessage::UpdateDone {
            id: TaskId::new("a"),
            result: Ok(Some(task("a", "Alpha 2"))),
        });
        assert_eq!(next, Some(TodoCommand::Fetch));
        assert_eq!(model.edit_state(), &EditState::Idle);
        assert_eq!(model.edit_text(), "");
    }

    #[test]
    fn update_without_echoed_task_leaves_edit_mode() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.start_edit(&TaskId::new("a"));
        let next = model.apply(TodoServiceMessage::UpdateDone {
            id: TaskId::new("a"),
            result: Ok(None),
        });
        assert_eq!(next, Some(TodoCommand::Fetch));
        assert_eq!(model.editing_id(), None);
    }

    #[test]
    fn failed_update_stays_editing() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.start_edit(&TaskId::new("a"));
        model.set_edit_text("Alpha 2");
        let next = model.apply(TodoServiceMessage::UpdateDone {
            id: TaskId::new("a"),
            result: Err(TodoError::Network("refused".into())),
        });
        assert_eq!(next, None);
        assert_eq!(model.edit_text(), "Alpha 2");
    }

    #[test]
    fn cancel_edit_returns_to_idle() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.start_edit(&TaskId::new("a"));
        model.cancel_edit();
        assert_eq!(model.editing_id(), None);
    }

    #[test]
    fn delete_filters_locally_without_refetch() {
        let mut model = loaded(vec![task("a", "Alpha"), task("b", "Beta")]);
        let next = model.apply(TodoServiceMessage::DeleteDone {
            id: TaskId::new("a"),
            result: Ok(()),
        });
        assert_eq!(next, None);
        assert_eq!(model.todos(), &[task("b", "Beta")]);
    }

    #[test]
    fn deleting_absent_id_changes_nothing() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        let revision = model.revision();
        model.apply(TodoServiceMessage::DeleteDone {
            id: TaskId::new("ghost"),
            result: Ok(()),
        });
        assert_eq!(model.todos().len(), 1);
        assert_eq!(model.revision(), revision);
    }

    #[test]
    fn failed_fetch_keeps_stale_list() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.apply(TodoServiceMessage::FetchDone(Err(TodoError::Status {
            status: 500,
            message: "boom".into(),
        })));
        assert_eq!(model.todos().len(), 1);
    }

    #[test]
    fn fetch_replaces_wholesale_in_server_order() {
        let mut model = loaded(vec![task("a", "Alpha")]);
        model.apply(TodoServiceMessage::FetchDone(Ok(vec![
            task("c", "Gamma"),
            task("b", "Beta"),
        ])));
        let ids: Vec<&str> = model.todos().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn every_transition_bumps_revision() {
        let mut model = TodoModel::new();
        let mut last = model.revision();
        let mut check = |model: &TodoModel| {
            assert!(model.revision() > last);
            last = model.revision();
        };

        model.set_text("x");
        check(&model);
        model.apply(TodoServiceMessage::FetchDone(Ok(vec![task("a", "Alpha")])));
        check(&model);
        model.start_edit(&TaskId::new("a"));
        check(&model);
        model.set_edit_text("y");
        check(&model);
        model.cancel_edit();
        check(&model);
    }
}
