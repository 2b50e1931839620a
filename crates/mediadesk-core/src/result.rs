//! Convenience result type alias for MediaDesk.

use crate::error::AppError;

/// A specialized `Result` type for MediaDesk operations.
pub type AppResult<T> = Result<T, AppError>;
