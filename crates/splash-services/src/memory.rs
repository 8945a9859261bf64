//! In-process [`TodoStore`] with call accounting.
//!
//! Behaves like a well-mannered todo server: ids are assigned sequentially,
//! list order is insertion order, and unknown ids answer 404.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TodoApiError;
use crate::store::TodoStore;
use crate::todo::{Task, TaskId, TaskPayload};

/// Number of calls each operation has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.list + self.create + self.update + self.delete
    }
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
    calls: CallCounts,
    offline: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with tasks; later ids continue after them.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.len() as u64;
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// While offline every call is counted and then fails with 503.
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    pub fn calls(&self) -> CallCounts {
        self.inner.lock().calls
    }

    /// Snapshot of the stored tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }

    /// Remove a task behind the client's back, as another client would.
    pub fn remove_external(&self, id: &TaskId) {
        self.inner.lock().tasks.retain(|t| &t.id != id);
    }
}

fn unavailable() -> TodoApiError {
    TodoApiError::Status {
        status: 503,
        message: "store offline".to_string(),
    }
}

fn not_found(id: &TaskId) -> TodoApiError {
    TodoApiError::Status {
        status: 404,
        message: format!("todo {} not found", id),
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, TodoApiError> {
        let mut inner = self.inner.lock();
        inner.calls.list += 1;
        if inner.offline {
            return Err(unavailable());
        }
        Ok(inner.tasks.clone())
    }

    async fn create(&self, payload: TaskPayload) -> Result<Option<Task>, TodoApiError> {
        let mut inner = self.inner.lock();
        inner.calls.create += 1;
        if inner.offline {
            return Err(unavailable());
        }
        inner.next_id += 1;
        let task = Task {
            id: TaskId::new(inner.next_id.to_string()),
            text: payload.text,
            completed: payload.completed,
        };
        inner.tasks.push(task.clone());
        Ok(Some(task))
    }

    async fn update(
        &self,
        id: &TaskId,
        payload: TaskPayload,
    ) -> Result<Option<Task>, TodoApiError> {
        let mut inner = self.inner.lock();
        inner.calls.update += 1;
        if inner.offline {
            return Err(unavailable());
        }
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| not_found(id))?;
        task.text = payload.text;
        task.completed = payload.completed;
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TodoApiError> {
        let mut inner = self.inner.lock();
        inner.calls.delete += 1;
        if inner.offline {
            return Err(unavailable());
        }
        let before = inner.tasks.len();
        inner.tasks.retain(|t| &t.id != id);
        if inner.tasks.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
