use shared::domain::Post;

use crate::store::PostStore;

/// Width of the page-number strip once there are more than three pages.
const PAGE_WINDOW: usize = 3;

/// What the dashboard renders for the current store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub page_posts: Vec<Post>,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
}

/// Pure read over the store: filter by the search term, paginate, and compute
/// the page-number strip. Never mutates anything, so deriving twice from the
/// same state yields the same view.
pub fn derive_view(store: &PostStore) -> PageView {
    let term = store.search_term().to_lowercase();
    let filtered: Vec<&Post> = store
        .posts()
        .iter()
        .filter(|post| {
            term.is_empty()
                || post.title.to_lowercase().contains(&term)
                || post.body.to_lowercase().contains(&term)
        })
        .collect();

    let page_size = store.page_size().as_usize();
    let total_pages = filtered.len().div_ceil(page_size);

    // A stale page index past the end yields an empty slice, never an error.
    let start = ((store.current_page() - 1) * page_size).min(filtered.len());
    let end = (start + page_size).min(filtered.len());
    let page_posts = filtered[start..end].iter().map(|post| (*post).clone()).collect();

    PageView {
        page_posts,
        total_pages,
        page_numbers: page_numbers(store.current_page(), total_pages),
    }
}

fn page_numbers(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW {
        (1..=total_pages).collect()
    } else if current_page == 1 {
        vec![1, 2, 3]
    } else if current_page >= total_pages {
        vec![total_pages - 2, total_pages - 1, total_pages]
    } else {
        vec![current_page - 1, current_page, current_page + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PageSize;
    use shared::domain::{PostId, DEFAULT_OWNER_ID};

    fn posts(count: usize) -> Vec<Post> {
        (1..=count as i64)
            .map(|id| Post {
                id: PostId(id),
                title: format!("title {id}"),
                body: format!("body {id}"),
                user_id: DEFAULT_OWNER_ID,
            })
            .collect()
    }

    fn store_with(count: usize, size: PageSize) -> PostStore {
        let mut store = PostStore::new();
        store.replace_all(posts(count));
        store.set_page_size(size);
        store
    }

    #[test]
    fn total_pages_is_the_ceiling_for_every_page_size() {
        for size in [PageSize::Five, PageSize::Ten, PageSize::Fifteen, PageSize::Twenty] {
            for count in [0usize, 1, 4, 5, 11, 23, 100] {
                let store = store_with(count, size);
                let view = derive_view(&store);
                assert_eq!(view.total_pages, count.div_ceil(size.as_usize()));
            }
        }
    }

    #[test]
    fn zero_results_means_zero_pages() {
        let view = derive_view(&PostStore::new());
        assert_eq!(view.total_pages, 0);
        assert!(view.page_posts.is_empty());
        assert!(view.page_numbers.is_empty());
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut store = store_with(23, PageSize::Five);
        store.set_page(3);
        assert_eq!(derive_view(&store), derive_view(&store));
    }

    #[test]
    fn filter_matches_title_or_body_case_insensitively() {
        let mut store = PostStore::new();
        store.replace_all(vec![
            Post {
                id: PostId(1),
                title: "Hello World".into(),
                body: "first".into(),
                user_id: DEFAULT_OWNER_ID,
            },
            Post {
                id: PostId(2),
                title: "second".into(),
                body: "also a WORLD".into(),
                user_id: DEFAULT_OWNER_ID,
            },
            Post {
                id: PostId(3),
                title: "third".into(),
                body: "nothing here".into(),
                user_id: DEFAULT_OWNER_ID,
            },
        ]);
        store.set_search_term("world");
        let view = derive_view(&store);
        assert_eq!(
            view.page_posts.iter().map(|p| p.id.0).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn unmatched_search_term_yields_an_empty_view() {
        let mut store = store_with(12, PageSize::Five);
        store.set_search_term("foo");
        let view = derive_view(&store);
        assert!(view.page_posts.is_empty());
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn page_past_the_end_yields_an_empty_slice() {
        let mut store = store_with(7, PageSize::Five);
        store.set_page(9);
        let view = derive_view(&store);
        assert!(view.page_posts.is_empty());
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn page_slice_covers_the_requested_window() {
        let mut store = store_with(12, PageSize::Five);
        store.set_page(2);
        let view = derive_view(&store);
        assert_eq!(
            view.page_posts.iter().map(|p| p.id.0).collect::<Vec<_>>(),
            vec![6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn page_numbers_show_everything_up_to_three_pages() {
        let mut store = store_with(12, PageSize::Five);
        store.set_page(2);
        assert_eq!(derive_view(&store).page_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn page_numbers_window_at_the_start() {
        let store = store_with(50, PageSize::Five);
        assert_eq!(derive_view(&store).page_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn page_numbers_window_in_the_middle() {
        let mut store = store_with(50, PageSize::Five);
        store.set_page(6);
        assert_eq!(derive_view(&store).page_numbers, vec![5, 6, 7]);
    }

    #[test]
    fn page_numbers_window_at_the_end() {
        let mut store = store_with(50, PageSize::Five);
        store.set_page(10);
        assert_eq!(derive_view(&store).page_numbers, vec![8, 9, 10]);
    }
}
