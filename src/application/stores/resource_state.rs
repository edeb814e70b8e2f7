//! State shared by the resource stores.
//!
//! Every operation follows the same lifecycle: [`ResourceState::begin`]
//! clears the error and raises `loading`, the call runs without holding the
//! lock, then the outcome is applied and [`ResourceState::finish`] lowers
//! `loading` whatever happened.

use serde::Serialize;

use crate::domain::entities::{Page, Pagination, Resource, DEFAULT_PAGE_SIZE};
use crate::domain::value_objects::NormalizedDetail;
use crate::shared::error::ClientError;

/// List, detail and request state of one resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub current: Option<NormalizedDetail<T>>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            pagination: Pagination::empty(DEFAULT_PAGE_SIZE),
        }
    }
}

impl<T: Resource> ResourceState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    /// Record the user-facing message of `error`.
    pub fn fail(&mut self, error: &ClientError) {
        self.error = Some(error.user_message());
    }

    /// Replace the list with a server page.
    pub fn apply_page(&mut self, page: Page<T>, requested_size: u32) {
        self.pagination = page.pagination(requested_size);
        self.items = page.content;
    }

    /// Empty the list and zero the pagination after a failed listing.
    pub fn reset_list(&mut self, size: u32) {
        self.items.clear();
        self.pagination = Pagination::empty(size);
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Splice `item` into the list and into `current` when ids match.
    pub fn replace(&mut self, item: T)
    where
        T: Clone,
    {
        let id = item.id();
        if let Some(current) = self.current.take() {
            self.current = Some(if current.id() == id {
                current.with_entity(item.clone())
            } else {
                current
            });
        }
        splice_by_id(&mut self.items, item);
    }

    /// Drop `id` from the list and from `current`.
    pub fn remove(&mut self, id: i64) {
        remove_by_id(&mut self.items, id);
        if self.current.as_ref().map(|c| c.id()) == Some(id) {
            self.current = None;
        }
    }

    pub fn clear_current(&mut self) {
        self.current = None;
        self.error = None;
    }
}

/// Replace the element with the same id in place. Returns `false` if absent.
pub fn splice_by_id<T: Resource>(items: &mut [T], item: T) -> bool {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Remove every element with `id`.
pub fn remove_by_id<T: Resource>(items: &mut Vec<T>, id: i64) {
    items.retain(|item| item.id() != id);
}

/// Parse a detail id taken from a route or form. Only positive integers are accepted.
pub fn parse_id(raw: &str, resource: &str) -> Result<i64, ClientError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ClientError::Validation(format!("Invalid {} id.", resource)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Post;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut state = ResourceState::default();
        state.items = vec![post(4, "a"), post(5, "old"), post(6, "c")];

        state.replace(post(5, "new"));

        let titles: Vec<_> = state.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "new", "c"]);
    }

    #[test]
    fn test_replace_updates_matching_current_only() {
        let mut state = ResourceState::default();
        let mut detail = NormalizedDetail::bare(post(5, "old"));
        detail.comment_count = 2;
        state.current = Some(detail);

        state.replace(post(6, "other"));
        assert_eq!(state.current.as_ref().unwrap().entity.title, "old");

        state.replace(post(5, "new"));
        let current = state.current.unwrap();
        assert_eq!(current.entity.title, "new");
        assert_eq!(current.comment_count, 2);
    }

    #[test]
    fn test_remove_clears_current() {
        let mut state = ResourceState::default();
        state.items = vec![post(1, "a"), post(2, "b")];
        state.current = Some(NormalizedDetail::bare(post(2, "b")));

        state.remove(2);

        assert_eq!(state.items.len(), 1);
        assert!(state.current.is_none());
    }

    #[test]
    fn test_reset_list() {
        let mut state = ResourceState::default();
        state.items = vec![post(1, "a")];
        state.reset_list(20);
        assert!(state.items.is_empty());
        assert_eq!(state.pagination, Pagination::empty(20));
    }

    #[test_case("5", Some(5) ; "numeric")]
    #[test_case(" 12 ", Some(12) ; "padded")]
    #[test_case("abc", None ; "word")]
    #[test_case("0", None ; "zero")]
    #[test_case("-3", None ; "negative")]
    #[test_case("", None ; "empty")]
    fn test_parse_id(raw: &str, expected: Option<i64>) {
        assert_eq!(parse_id(raw, "post").ok(), expected);
    }
}
