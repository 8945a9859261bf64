//! Maps UI service errors to splash_core::AppError for consistent user-facing messages.

mod todo;
