//! Todo backend: runs store calls off the UI thread.
//! Results come back to the UI thread over an mpsc channel.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use splash_services::{Task, TaskId, TaskPayload, TodoApiError, TodoStore};

/// Error type for todo operations, as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No usable answer from the server (refused, reset, DNS, TLS).
    Network(String),
    Timeout,
    /// The server answered with a non-2xx status.
    Status { status: u16, message: String },
    InvalidResponse(String),
}

impl std::fmt::Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoError::Network(s) => write!(f, "Network error: {}", s),
            TodoError::Timeout => write!(f, "Request timed out"),
            TodoError::Status { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            TodoError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
        }
    }
}

impl std::error::Error for TodoError {}

impl From<TodoApiError> for TodoError {
    fn from(e: TodoApiError) -> Self {
        if e.is_timeout() {
            return TodoError::Timeout;
        }
        match e {
            TodoApiError::Status { status, message } => TodoError::Status { status, message },
            TodoApiError::InvalidResponse(s) => TodoError::InvalidResponse(s),
            other => TodoError::Network(other.to_string()),
        }
    }
}

/// Work the model asks the service to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    Fetch,
    Create(TaskPayload),
    Update { id: TaskId, payload: TaskPayload },
    Delete(TaskId),
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoServiceMessage {
    FetchDone(Result<Vec<Task>, TodoError>),
    /// `Ok(None)` when the server accepted the task without echoing it.
    CreateDone(Result<Option<Task>, TodoError>),
    UpdateDone {
        id: TaskId,
        result: Result<Option<Task>, TodoError>,
    },
    DeleteDone {
        id: TaskId,
        result: Result<(), TodoError>,
    },
}

/// Run one command against the store and package the outcome.
pub async fn execute<S>(store: &S, command: TodoCommand) -> TodoServiceMessage
where
    S: TodoStore + ?Sized,
{
    match command {
        TodoCommand::Fetch => TodoServiceMessage::FetchDone(store.list().await.map_err(Into::into)),
        TodoCommand::Create(payload) => {
            TodoServiceMessage::CreateDone(store.create(payload).await.map_err(Into::into))
        }
        TodoCommand::Update { id, payload } => {
            let result = store.update(&id, payload).await.map_err(Into::into);
            TodoServiceMessage::UpdateDone { id, result }
        }
        TodoCommand::Delete(id) => {
            let result = store.delete(&id).await.map_err(Into::into);
            TodoServiceMessage::DeleteDone { id, result }
        }
    }
}

/// Fire-and-forget dispatcher.
///
/// Every command is spawned independently; nothing orders or cancels
/// in-flight requests, so replies arrive in completion order.
pub struct TodoService<S: TodoStore> {
    store: Arc<S>,
    runtime: tokio::runtime::Handle,
    tx: Sender<TodoServiceMessage>,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(
        store: Arc<S>,
        runtime: tokio::runtime::Handle,
    ) -> (Self, Receiver<TodoServiceMessage>) {
        let (tx, rx) = mpsc::channel();
        (Self { store, runtime, tx }, rx)
    }

    pub fn dispatch(&self, command: TodoCommand) {
        tracing::debug!("Dispatching {:?}", command);
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);

        self.runtime.spawn(async move {
            let message = execute(store.as_ref(), command).await;
            // The UI may already be gone on shutdown.
            let _ = tx.send(message);
        });
    }
}
