use serde::{Deserialize, Serialize};

use crate::domain::PostId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

/// Response to a create. The demo endpoint assigns an id; a bare resource
/// endpoint may not, so the field is optional and the caller fills it in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}
