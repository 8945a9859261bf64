use crate::services::todo_service::TodoError;
use splash_core::{AppError, NetworkError};

impl From<TodoError> for AppError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            TodoError::Timeout => AppError::Network(NetworkError::Timeout),
            TodoError::Status { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            TodoError::InvalidResponse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
