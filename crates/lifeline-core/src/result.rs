//! Convenience result type alias for Lifeline.

use crate::error::AppError;

/// A specialized `Result` type for Lifeline operations.
pub type AppResult<T> = Result<T, AppError>;
