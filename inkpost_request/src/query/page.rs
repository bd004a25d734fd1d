use serde::Serialize;

use super::search::SearchQuery;

/// One page of search results together with the pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
    /// Number of records matching the filter, regardless of paging.
    pub total: u64,
}

impl<T> SearchPage<T> {
    pub fn new(items: Vec<T>, query: &SearchQuery, total: u64) -> Self {
        debug_assert!(items.len() as u64 <= query.per_page);
        Self {
            items,
            current_page: query.page,
            per_page: query.per_page,
            last_page: last_page(total, query.per_page),
            total,
        }
    }

    /// Converts the items, keeping the envelope intact.
    pub fn map<U, F>(self, f: F) -> SearchPage<U>
    where
        F: FnMut(T) -> U,
    {
        SearchPage {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            total: self.total,
        }
    }

    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// `ceil(total / per_page)`; zero when nothing matched.
pub const fn last_page(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}
