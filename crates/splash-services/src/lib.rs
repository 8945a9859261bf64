pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod store;
pub mod todo;

pub use client::TodoClient;
pub use error::TodoApiError;
#[cfg(any(test, feature = "test-support"))]
pub use memory::{CallCounts, MemoryStore};
pub use store::TodoStore;
pub use todo::{Task, TaskId, TaskPayload};
