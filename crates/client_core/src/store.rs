use shared::domain::{Post, PostId, EMPTY_CACHE_SEED_ID};

/// Rows shown per page. The selector in the dashboard offers exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Fifteen,
    Twenty,
}

impl PageSize {
    pub fn as_usize(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Twenty => 20,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        match rows {
            5 => Some(Self::Five),
            10 => Some(Self::Ten),
            15 => Some(Self::Fifteen),
            20 => Some(Self::Twenty),
            _ => None,
        }
    }
}

/// Single source of truth for the dashboard: the denormalized post list plus
/// pagination and search state. All writes go through the named transitions
/// below so the page-reset and id-uniqueness invariants are enforced in one
/// place; nothing else touches the fields.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    current_page: usize,
    page_size: PageSize,
    search_term: String,
}

impl Default for PostStore {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            current_page: 1,
            page_size: PageSize::Five,
            search_term: String::new(),
        }
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Pages are 1-based; 0 is clamped up rather than rejected.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Changing the page size invalidates the old page index, so it resets.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.current_page = 1;
    }

    /// Changing the search term invalidates the old page index, so it resets.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn reset_pagination(&mut self) {
        self.current_page = 1;
        self.page_size = PageSize::Five;
        self.search_term.clear();
    }

    /// Id for a locally-numbered post: one past the current maximum, or the
    /// fixed seed when the cache is empty.
    pub fn next_local_id(&self) -> PostId {
        self.posts
            .iter()
            .map(|post| post.id.0)
            .max()
            .map_or(PostId(EMPTY_CACHE_SEED_ID), |max| PostId(max + 1))
    }

    /// Prepends a post so it displays first. Any existing post with the same
    /// id is dropped first to keep ids unique.
    pub fn insert_first(&mut self, post: Post) {
        self.posts.retain(|existing| existing.id != post.id);
        self.posts.insert(0, post);
    }

    /// Replaces the entry with the given id in place, forcing the stored id
    /// to stay the target one. No-op when the id is not cached.
    pub fn replace_post(&mut self, id: PostId, mut post: Post) {
        post.id = id;
        if let Some(slot) = self.posts.iter_mut().find(|existing| existing.id == id) {
            *slot = post;
        }
    }

    pub fn remove_post(&mut self, id: PostId) {
        self.posts.retain(|existing| existing.id != id);
    }
}
