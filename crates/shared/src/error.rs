use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remote operation a failure can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAction {
    FetchPosts,
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl RemoteAction {
    /// User-facing text for a failed call, ready for a toast.
    pub fn failure_text(self) -> &'static str {
        match self {
            Self::FetchPosts => "Failed to fetch posts",
            Self::CreatePost => "Failed to create post",
            Self::UpdatePost => "Failed to update post",
            Self::DeletePost => "Failed to delete post",
        }
    }
}

/// Any transport or non-2xx failure from the remote endpoint. Never fatal:
/// callers convert it into a notification at the call boundary.
#[derive(Debug, Clone, Error)]
#[error("{}: {message}", .action.failure_text())]
pub struct RemoteError {
    pub action: RemoteAction,
    pub message: String,
}

impl RemoteError {
    pub fn new(action: RemoteAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
        }
    }
}

/// Field-level form error. Surfaced next to the offending field and blocks
/// submission; never reaches the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}
