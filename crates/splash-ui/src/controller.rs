//! Sequential driver for [`TodoModel`].
//!
//! Each user action awaits its store call and any follow-up refetch before
//! returning, so scripted flows read top to bottom. The terminal UI uses
//! [`TodoService`](crate::services::TodoService) instead so calls overlap.

use std::sync::Arc;

use splash_services::{TaskId, TodoStore};

use crate::models::todo_model::TodoModel;
use crate::services::todo_service::{execute, TodoCommand};
use crate::view::{render, TodoView};

pub struct TodoController<S: TodoStore> {
    store: Arc<S>,
    model: TodoModel,
}

impl<S: TodoStore> TodoController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            model: TodoModel::new(),
        }
    }

    pub fn model(&self) -> &TodoModel {
        &self.model
    }

    pub fn view(&self) -> TodoView {
        render(&self.model)
    }

    /// Initial load.
    pub async fn load(&mut self) {
        self.run(TodoCommand::Fetch).await;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.model.set_text(text);
    }

    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        self.model.set_edit_text(text);
    }

    pub fn start_edit(&mut self, id: &TaskId) -> bool {
        self.model.start_edit(id)
    }

    pub fn cancel_edit(&mut self) {
        self.model.cancel_edit();
    }

    /// Add the typed task. Blank input is a no-op.
    pub async fn add(&mut self) {
        if let Some(command) = self.model.submit_new() {
            self.run(command).await;
        }
    }

    /// Save the edited task. No-op when idle or the buffer is blank.
    pub async fn save(&mut self) {
        if let Some(command) = self.model.submit_edit() {
            self.run(command).await;
        }
    }

    pub async fn delete(&mut self, id: &TaskId) {
        let command = self.model.request_delete(id);
        self.run(command).await;
    }

    async fn run(&mut self, command: TodoCommand) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let message = execute(self.store.as_ref(), command).await;
            next = self.model.apply(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RowContent;
    use splash_services::{CallCounts, MemoryStore};

    fn controller() -> (Arc<MemoryStore>, TodoController<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let controller = TodoController::new(Arc::clone(&store));
        (store, controller)
    }

    fn texts(controller: &TodoController<MemoryStore>) -> Vec<String> {
        controller
            .model()
            .todos()
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn add_add_delete_scenario() {
        let (store, mut controller) = controller();

        controller.load().await;
        assert!(controller.view().rows.is_empty());

        controller.set_text("Buy milk");
        controller.add().await;
        assert_eq!(
            store.calls(),
            CallCounts {
                list: 2,
                create: 1,
                update: 0,
                delete: 0
            }
        );
        let view = controller.view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].palette_index, 0);
        assert_eq!(view.input.text, "");

        controller.set_text("Walk dog");
        controller.add().await;
        let view = controller.view();
        let slots: Vec<usize> = view.rows.iter().map(|r| r.palette_index).collect();
        assert_eq!(slots, [0, 1]);

        let first = view.rows[0].id.clone();
        let lists_before = store.calls().list;
        controller.delete(&first).await;

        let view = controller.view();
        assert_eq!(store.calls().list, lists_before, "delete must not refetch");
        assert_eq!(store.calls().delete, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].content, RowContent::Display("Walk dog".into()));
        assert_eq!(view.rows[0].palette_index, 0);
    }

    #[tokio::test]
    async fn blank_submissions_make_no_calls() {
        let (store, mut controller) = controller();
        controller.load().await;
        controller.set_text("Buy milk");
        controller.add().await;
        let calls = store.calls();

        controller.set_text("   ");
        controller.add().await;

        let id = controller.model().todos()[0].id.clone();
        controller.start_edit(&id);
        controller.set_edit_text("\t");
        controller.save().await;

        assert_eq!(store.calls(), calls);
        assert_eq!(controller.model().editing_id(), Some(&id));
        assert_eq!(texts(&controller), ["Buy milk"]);
    }

    #[tokio::test]
    async fn edit_then_save_round_trips() {
        let (store, mut controller) = controller();
        controller.load().await;
        controller.set_text("Buy milk");
        controller.add().await;

        let id = controller.model().todos()[0].id.clone();
        assert!(controller.start_edit(&id));
        assert_eq!(controller.model().edit_text(), "Buy milk");
        controller.set_edit_text("Buy oat milk");
        controller.save().await;

        assert_eq!(controller.model().editing_id(), None);
        assert_eq!(texts(&controller), ["Buy oat milk"]);
        assert_eq!(store.tasks(), controller.model().todos());
        assert_eq!(store.calls().update, 1);
    }

    #[tokio::test]
    async fn refetch_adopts_external_changes() {
        let (store, mut controller) = controller();
        controller.load().await;
        controller.set_text("one");
        controller.add().await;
        controller.set_text("two");
        controller.add().await;

        let first = controller.model().todos()[0].id.clone();
        store.remove_external(&first);

        controller.set_text("three");
        controller.add().await;
        assert_eq!(texts(&controller), ["two", "three"]);
    }

    #[tokio::test]
    async fn failures_leave_state_alone() {
        let (store, mut controller) = controller();
        controller.load().await;
        controller.set_text("Buy milk");
        controller.add().await;
        let id = controller.model().todos()[0].id.clone();

        store.set_offline(true);

        controller.set_text("Walk dog");
        controller.add().await;
        assert_eq!(controller.model().text(), "Walk dog");

        controller.delete(&id).await;
        assert_eq!(texts(&controller), ["Buy milk"]);

        controller.start_edit(&id);
        controller.set_edit_text("Buy oat milk");
        controller.save().await;
        assert_eq!(controller.model().editing_id(), Some(&id));
    }

    #[tokio::test]
    async fn deleting_unknown_id_keeps_rows() {
        let (store, mut controller) = controller();
        controller.load().await;
        controller.set_text("Buy milk");
        controller.add().await;

        controller.delete(&TaskId::new("ghost")).await;
        assert_eq!(controller.view().rows.len(), 1);
        assert_eq!(store.calls().delete, 1);
    }
}
