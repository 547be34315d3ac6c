use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to callers of the invocation pipeline.
///
/// Per-asset upload failures and generation failures are deliberately not
/// represented here: uploads are reported through the
/// [`Notifier`](crate::notify::Notifier) and skipped, and a failed
/// generation terminates the session in the `Failed` state carrying a
/// user-facing fallback message.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvokeError {
    #[error("input must not be empty")]
    EmptyInput,

    #[error("an invocation is already in progress")]
    Busy,

    #[error("agent not found: {0}")]
    NotFound(String),
}
