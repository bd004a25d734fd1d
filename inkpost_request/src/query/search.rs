//! # Search query.
//!
//! Normalizes a caller's search request into a query plan. Building a plan
//! never fails: out-of-range paging falls back to defaults and unknown sort
//! keys fall back to the configured default ordering, which is checked
//! against the schema once, when the builder is created.

use serde::Deserialize;

use crate::{
    filter::Filter,
    ordering::{Ordering, OrderingDirection, OrderingTerm},
    query::error::{QueryError, QueryResult},
    schema::Schema,
};

/// Page size used when the request leaves it out or gives a non-positive one.
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Search request as received from a caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<String>,
}

/// Normalized query plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub page: u64,
    pub per_page: u64,
    pub filter: Filter,
    pub ordering: Ordering,
}

/// Config for search query builder.
#[derive(Debug, Clone)]
pub struct SearchQueryConfig {
    pub default_page_size: u64,
    /// Used when the requested sort key is missing or not sortable.
    pub default_ordering_term: OrderingTerm,
    /// Appended after the primary term, in the same direction, so that equal
    /// keys still come back in a stable order across pages.
    pub tie_break_member: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    schema: Schema,
    options: SearchQueryConfig,
    searchable_members: Vec<String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: i64, per_page: i64) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn with_sort<S: Into<String>, D: Into<String>>(mut self, sort: S, sort_dir: D) -> Self {
        self.sort = Some(sort.into());
        self.sort_dir = Some(sort_dir.into());
        self
    }

    #[must_use]
    pub fn with_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

impl SearchQuery {
    /// Number of matching records skipped before this page.
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub const fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for SearchQueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            default_ordering_term: OrderingTerm::descending("createdAt"),
            tie_break_member: Some("id".into()),
        }
    }
}

impl SearchQueryBuilder {
    /// Both the default ordering term and the tie-break member must be
    /// ordered members of `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownOrderingMember`] naming the offending
    /// member.
    pub fn new(schema: Schema, options: SearchQueryConfig) -> QueryResult<Self> {
        let mut configured = vec![options.default_ordering_term.clone()];
        if let Some(tie_break_member) = options.tie_break_member.as_deref() {
            configured.push(OrderingTerm::ascending(tie_break_member));
        }
        Ordering::new(configured).check(&schema)?;

        let searchable_members = schema.searchable_members();
        Ok(Self {
            schema,
            options,
            searchable_members,
        })
    }

    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn build(&self, request: &SearchRequest) -> SearchQuery {
        let page = request
            .page
            .and_then(|page| u64::try_from(page).ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let per_page = request
            .per_page
            .and_then(|per_page| u64::try_from(per_page).ok())
            .filter(|per_page| *per_page >= 1)
            .unwrap_or_else(|| self.options.default_page_size.max(1));

        let primary_term = match request
            .sort
            .as_deref()
            .filter(|sort| self.schema.is_ordered(sort))
        {
            Some(sort) => OrderingTerm::new(
                sort,
                request
                    .sort_dir
                    .as_deref()
                    .and_then(OrderingDirection::parse)
                    .unwrap_or(OrderingDirection::Descending),
            ),
            None => self.options.default_ordering_term.clone(),
        };
        let mut terms = vec![primary_term];
        if let Some(tie_break_member) = self.options.tie_break_member.as_ref() {
            if terms[0].name != *tie_break_member {
                terms.push(OrderingTerm::new(
                    tie_break_member.as_str(),
                    terms[0].direction,
                ));
            }
        }

        let filter = request
            .filter
            .as_deref()
            .filter(|filter| !filter.is_empty())
            .map(|filter| Filter::new(filter, self.searchable_members.iter().cloned()))
            .unwrap_or_default();

        SearchQuery {
            page,
            per_page,
            filter,
            ordering: Ordering::new(terms),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::schema::UserItem;

    use super::*;

    fn get_query_builder() -> SearchQueryBuilder {
        SearchQueryBuilder::new(UserItem::get_schema(), SearchQueryConfig::default()).unwrap()
    }

    #[test]
    fn it_works() {
        let qb = get_query_builder();
        let query = qb.build(
            &SearchRequest::new()
                .with_page(3, 10)
                .with_sort("displayName", "asc")
                .with_filter("jane"),
        );
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.offset(), 20);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.ordering.to_string(), "displayName asc, id asc");
        assert_eq!(
            query.filter,
            Filter::new("jane", ["bio", "displayName", "email"])
        );
    }

    #[test]
    fn paging_defaults() {
        let qb = get_query_builder();

        let query = qb.build(&SearchRequest::default());
        assert_eq!((query.page, query.per_page, query.offset()), (1, 15, 0));
        assert!(query.filter.is_empty());

        for (page, per_page) in [(0, 0), (-3, -1), (i64::MIN, i64::MIN)] {
            let query = qb.build(&SearchRequest::new().with_page(page, per_page));
            assert_eq!((query.page, query.per_page), (1, DEFAULT_PAGE_SIZE));
        }
    }

    #[test]
    fn sort_fallback() {
        let qb = get_query_builder();

        let query = qb.build(&SearchRequest::new().with_sort("password", "asc"));
        assert_eq!(query.ordering.to_string(), "createdAt desc, id desc");

        // Known but unordered member.
        let query = qb.build(&SearchRequest::new().with_sort("bio", "asc"));
        assert_eq!(query.ordering.to_string(), "createdAt desc, id desc");

        let query = qb.build(&SearchRequest::new().with_sort("", "asc"));
        assert_eq!(query.ordering.to_string(), "createdAt desc, id desc");

        let query = qb.build(&SearchRequest::new().with_sort("age", "ASC"));
        assert_eq!(query.ordering.to_string(), "age desc, id desc");

        let query = qb.build(&SearchRequest {
            sort: Some("age".into()),
            ..Default::default()
        });
        assert_eq!(query.ordering.to_string(), "age desc, id desc");

        let query = qb.build(&SearchRequest::new().with_sort("id", "asc"));
        assert_eq!(query.ordering.to_string(), "id asc");
    }

    #[test]
    fn checks_config() {
        let schema = UserItem::get_schema();
        let build = |options| SearchQueryBuilder::new(schema.clone(), options).map(|_| ());

        assert_eq!(
            build(SearchQueryConfig {
                default_ordering_term: OrderingTerm::descending("updatedAt"),
                ..Default::default()
            }),
            Err(QueryError::UnknownOrderingMember("updatedAt".into()))
        );
        assert_eq!(
            build(SearchQueryConfig {
                default_ordering_term: OrderingTerm::ascending("bio"),
                ..Default::default()
            }),
            Err(QueryError::UnknownOrderingMember("bio".into()))
        );
        assert_eq!(
            build(SearchQueryConfig {
                tie_break_member: Some("rowid".into()),
                ..Default::default()
            }),
            Err(QueryError::UnknownOrderingMember("rowid".into()))
        );
        assert_eq!(
            build(SearchQueryConfig {
                default_ordering_term: OrderingTerm::ascending("age"),
                tie_break_member: None,
                ..Default::default()
            }),
            Ok(())
        );
    }

    #[test]
    fn empty_filter() {
        let qb = get_query_builder();
        let query = qb.build(&SearchRequest::new().with_filter(""));
        assert_eq!(query.filter, Filter::default());
    }

    #[test]
    fn deserialize_request() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"page": 2, "perPage": 5, "sort": "name", "sortDir": "asc", "filter": "x"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            SearchRequest::new()
                .with_page(2, 5)
                .with_sort("name", "asc")
                .with_filter("x")
        );
        assert_eq!(
            serde_json::from_str::<SearchRequest>("{}").unwrap(),
            SearchRequest::default()
        );
    }
}
