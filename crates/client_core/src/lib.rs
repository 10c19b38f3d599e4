use std::{sync::Arc, time::Duration};

use shared::{
    domain::{Post, PostDraft, PostId, DEFAULT_OWNER_ID},
    error::RemoteError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod api;
pub mod routes;
pub mod session;
pub mod store;
pub mod validate;
pub mod view;

pub use api::PostsApi;
pub use session::{Account, AuthError, SessionGate};
pub use store::{PageSize, PostStore};
pub use view::{derive_view, PageView};

/// Retry budget for the initial fetch-all, after the first attempt.
const FETCH_RETRY_ATTEMPTS: usize = 5;
const FETCH_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Events the shell (or a test) can subscribe to.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Toast(Toast),
    EditingChanged(Option<PostId>),
}

/// Which branch an update took: reconciled from the server response, or
/// accepted locally after the remote write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Reconciled(Post),
    DegradedLocal(Post),
}

/// The record currently open in the edit form. At most one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingPost {
    pub id: PostId,
    pub title: String,
    pub body: String,
}

/// Coordinates remote mutations against the record cache. Remote calls go
/// first; the cache is reconciled afterwards, so a failed create or delete
/// leaves it untouched while a failed update degrades to local state.
///
/// Mutations are not coordinated against each other: this is a single-user
/// client, and a slow update resolving after a newer delete will re-insert
/// the record. Last write to the cache wins.
pub struct DashboardClient {
    api: PostsApi,
    store: Mutex<PostStore>,
    editing: Mutex<Option<EditingPost>>,
    events: broadcast::Sender<ClientEvent>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api: PostsApi::new(base_url),
            store: Mutex::new(PostStore::new()),
            editing: Mutex::new(None),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn toast(&self, toast: Toast) {
        let _ = self.events.send(ClientEvent::Toast(toast));
    }

    /// Initial fetch-all. Retries a fixed number of times with a constant
    /// delay; once the budget is spent the failure surfaces as a toast and
    /// the cache stays as it was.
    pub async fn load_posts(&self) -> Result<(), RemoteError> {
        let mut attempt = 0;
        loop {
            match self.api.fetch_all().await {
                Ok(posts) => {
                    info!(count = posts.len(), attempt = attempt + 1, "posts: load complete");
                    self.store.lock().await.replace_all(posts);
                    return Ok(());
                }
                Err(err) => {
                    attempt += 1;
                    if attempt > FETCH_RETRY_ATTEMPTS {
                        self.toast(Toast::error(err.action.failure_text()));
                        return Err(err);
                    }
                    warn!(attempt, "posts: fetch failed, retrying: {err}");
                    tokio::time::sleep(FETCH_RETRY_DELAY).await;
                }
            }
        }
    }

    /// Create flow: remote first, then an optimistic prepend. The id is the
    /// server's when it assigned one, otherwise the next local id. A failed
    /// create leaves the cache untouched.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, RemoteError> {
        let created = match self.api.create(&draft).await {
            Ok(created) => created,
            Err(err) => {
                self.toast(Toast::error(err.action.failure_text()));
                return Err(err);
            }
        };

        let post = {
            let mut store = self.store.lock().await;
            let id = created.id.unwrap_or_else(|| store.next_local_id());
            let post = Post {
                id,
                title: created.title,
                body: created.body,
                user_id: created.user_id,
            };
            store.insert_first(post.clone());
            post
        };

        info!(post_id = post.id.0, "posts: created");
        self.toast(Toast::success("Post created successfully"));
        Ok(post)
    }

    /// Update flow with the degrade-to-local policy: a successful remote
    /// write is reconciled from the server response; a failed one is accepted
    /// locally from the submitted fields instead of surfacing the error.
    /// Either branch closes the edit form when it targets the edited record.
    pub async fn update_post(&self, id: PostId, draft: PostDraft) -> UpdateOutcome {
        match self.api.update(id, &draft).await {
            Ok(updated) => {
                // Defensive merge: the cache keeps the target id no matter
                // what the server echoed back.
                let mut updated = updated;
                updated.id = id;
                self.store.lock().await.replace_post(id, updated.clone());
                self.clear_editing_for(id).await;
                info!(post_id = id.0, "posts: updated from server");
                self.toast(Toast::success("Post updated successfully"));
                UpdateOutcome::Reconciled(updated)
            }
            Err(err) => {
                warn!(post_id = id.0, "posts: remote update failed, keeping local copy: {err}");
                let local = Post {
                    id,
                    title: draft.title,
                    body: draft.body,
                    user_id: DEFAULT_OWNER_ID,
                };
                self.store.lock().await.replace_post(id, local.clone());
                self.clear_editing_for(id).await;
                self.toast(Toast::success("Post updated locally"));
                UpdateOutcome::DegradedLocal(local)
            }
        }
    }

    /// Delete flow: remote first; on success the record leaves the cache and
    /// any edit of it is cancelled. A failed delete changes nothing.
    pub async fn delete_post(&self, id: PostId) -> Result<(), RemoteError> {
        if let Err(err) = self.api.delete(id).await {
            self.toast(Toast::error(err.action.failure_text()));
            return Err(err);
        }

        self.store.lock().await.remove_post(id);
        self.clear_editing_for(id).await;
        info!(post_id = id.0, "posts: deleted");
        self.toast(Toast::success("Post deleted successfully"));
        Ok(())
    }

    /// Opens the edit form for a cached record, replacing any edit already in
    /// progress. Returns the fields to populate the form with, or None when
    /// the id is not in the cache.
    pub async fn start_edit(&self, id: PostId) -> Option<EditingPost> {
        let editing = {
            let store = self.store.lock().await;
            let post = store.post(id)?;
            EditingPost {
                id,
                title: post.title.clone(),
                body: post.body.clone(),
            }
        };
        *self.editing.lock().await = Some(editing.clone());
        let _ = self.events.send(ClientEvent::EditingChanged(Some(id)));
        Some(editing)
    }

    pub async fn cancel_edit(&self) {
        if self.editing.lock().await.take().is_some() {
            let _ = self.events.send(ClientEvent::EditingChanged(None));
        }
    }

    pub async fn editing(&self) -> Option<EditingPost> {
        self.editing.lock().await.clone()
    }

    async fn clear_editing_for(&self, id: PostId) {
        let mut editing = self.editing.lock().await;
        if editing.as_ref().is_some_and(|current| current.id == id) {
            *editing = None;
            drop(editing);
            let _ = self.events.send(ClientEvent::EditingChanged(None));
        }
    }

    /// Derives what the dashboard should render right now.
    pub async fn view(&self) -> PageView {
        derive_view(&*self.store.lock().await)
    }

    pub async fn set_page(&self, page: usize) {
        self.store.lock().await.set_page(page);
    }

    pub async fn set_page_size(&self, size: PageSize) {
        self.store.lock().await.set_page_size(size);
    }

    pub async fn set_search_term(&self, term: impl Into<String>) {
        self.store.lock().await.set_search_term(term);
    }

    pub async fn clear_search(&self) {
        self.store.lock().await.set_search_term("");
    }

    pub async fn reset_pagination(&self) {
        self.store.lock().await.reset_pagination();
    }

    /// Snapshot of the raw cached posts, for shells and tests.
    pub async fn posts(&self) -> Vec<Post> {
        self.store.lock().await.posts().to_vec()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
