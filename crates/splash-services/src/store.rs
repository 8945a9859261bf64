use async_trait::async_trait;

use crate::error::TodoApiError;
use crate::todo::{Task, TaskId, TaskPayload};

/// The four operations the UI needs from wherever todos live.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Fetch the full collection, in the store's order.
    async fn list(&self) -> Result<Vec<Task>, TodoApiError>;

    /// Create a task; the store assigns the id.
    ///
    /// Success is the status alone. The stored task comes back only when
    /// the store echoes it in a shape we understand.
    async fn create(&self, payload: TaskPayload) -> Result<Option<Task>, TodoApiError>;

    /// Replace a task's mutable fields. Same reply contract as `create`.
    async fn update(
        &self,
        id: &TaskId,
        payload: TaskPayload,
    ) -> Result<Option<Task>, TodoApiError>;

    async fn delete(&self, id: &TaskId) -> Result<(), TodoApiError>;
}
