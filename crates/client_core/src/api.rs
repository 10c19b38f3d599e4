use reqwest::Client;
use shared::{
    domain::{Post, PostDraft, PostId, DEFAULT_OWNER_ID},
    error::{RemoteAction, RemoteError},
    protocol::{CreatePostRequest, CreatedPost, UpdatePostRequest},
};
use tracing::warn;

/// Thin wrapper over the remote posts resource. Every call returns the
/// decoded payload or a `RemoteError` naming the failed action; no raw
/// transport error leaks past this boundary.
pub struct PostsApi {
    http: Client,
    base_url: String,
}

impl PostsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Post>, RemoteError> {
        let action = RemoteAction::FetchPosts;
        self.http
            .get(format!("{}/posts", self.base_url))
            .send()
            .await
            .map_err(remote_err(action))?
            .error_for_status()
            .map_err(remote_err(action))?
            .json()
            .await
            .map_err(remote_err(action))
    }

    pub async fn create(&self, draft: &PostDraft) -> Result<CreatedPost, RemoteError> {
        let action = RemoteAction::CreatePost;
        self.http
            .post(format!("{}/posts", self.base_url))
            .json(&CreatePostRequest {
                title: draft.title.clone(),
                body: draft.body.clone(),
                user_id: DEFAULT_OWNER_ID,
            })
            .send()
            .await
            .map_err(remote_err(action))?
            .error_for_status()
            .map_err(remote_err(action))?
            .json()
            .await
            .map_err(remote_err(action))
    }

    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, RemoteError> {
        let action = RemoteAction::UpdatePost;
        self.http
            .put(format!("{}/posts/{}", self.base_url, id.0))
            .json(&UpdatePostRequest {
                id,
                title: draft.title.clone(),
                body: draft.body.clone(),
                user_id: DEFAULT_OWNER_ID,
            })
            .send()
            .await
            .map_err(remote_err(action))?
            .error_for_status()
            .map_err(remote_err(action))?
            .json()
            .await
            .map_err(remote_err(action))
    }

    /// The acknowledgement body is ignored; only the status matters.
    pub async fn delete(&self, id: PostId) -> Result<(), RemoteError> {
        let action = RemoteAction::DeletePost;
        self.http
            .delete(format!("{}/posts/{}", self.base_url, id.0))
            .send()
            .await
            .map_err(remote_err(action))?
            .error_for_status()
            .map_err(remote_err(action))?;
        Ok(())
    }
}

fn remote_err(action: RemoteAction) -> impl FnOnce(reqwest::Error) -> RemoteError {
    move |err| {
        warn!(?action, "posts api call failed: {err}");
        RemoteError::new(action, err.to_string())
    }
}
