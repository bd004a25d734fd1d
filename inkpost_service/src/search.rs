use inkpost_request::query::{
    page::SearchPage,
    search::{SearchQueryBuilder, SearchQueryConfig, SearchRequest},
};
use tracing::debug;

use crate::{entity::Entity, error::AppResult, repository::EntityRepositoryArc};

/// Paginated, filtered and sorted search over one entity kind.
#[derive(Debug, Clone)]
pub struct SearchEngine<E: Entity> {
    repository: EntityRepositoryArc<E>,
    query_builder: SearchQueryBuilder,
}

impl<E: Entity> SearchEngine<E> {
    /// Engine with the default paging and `createdAt desc` ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity schema cannot order by `createdAt` or
    /// `id`.
    pub fn new(repository: EntityRepositoryArc<E>) -> AppResult<Self> {
        Self::with_config(repository, SearchQueryConfig::default())
    }

    /// # Errors
    ///
    /// Returns an error if `config` names a member the entity schema cannot
    /// order by.
    pub fn with_config(
        repository: EntityRepositoryArc<E>,
        config: SearchQueryConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            repository,
            query_builder: SearchQueryBuilder::new(E::get_schema(), config)?,
        })
    }

    pub const fn query_builder(&self) -> &SearchQueryBuilder {
        &self.query_builder
    }

    /// Runs `request` against the store.
    ///
    /// Pages past the last one come back with no items. Store errors are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[tracing::instrument(skip(self), fields(kind = E::KIND))]
    pub async fn search(&self, request: &SearchRequest) -> AppResult<SearchPage<E>> {
        let query = self.query_builder.build(request);
        debug!(
            page = query.page,
            per_page = query.per_page,
            ordering = %query.ordering,
            filter = %query.filter,
            "Searching"
        );

        let (total, items) = tokio::try_join!(
            self.repository.count(&query.filter),
            self.repository.select_ordered(
                &query.filter,
                &query.ordering,
                query.offset(),
                query.limit(),
            ),
        )?;

        Ok(SearchPage::new(items, &query, total))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use inkpost_common::{date_time::UtcDateTime, id::Id};
    use inkpost_request::{error::ErrorCode, ordering::OrderingTerm, query::error::QueryError};

    use crate::{
        author::model::{Author, AuthorId},
        repository::memory::MemoryRepository,
    };

    use super::*;

    fn get_engine(names: &[&str]) -> SearchEngine<Author> {
        let authors = names
            .iter()
            .enumerate()
            .map(|(i, name)| Author {
                id: AuthorId::new(Id::from(i as u64 + 1)),
                name: (*name).into(),
                email: format!("author{i}@example.com"),
                create_time: UtcDateTime::from_seconds(i as i64).unwrap(),
            })
            .collect();
        SearchEngine::new(Arc::new(MemoryRepository::with_data(authors))).unwrap()
    }

    fn names(page: &SearchPage<Author>) -> Vec<&str> {
        page.items.iter().map(|author| author.name.as_str()).collect()
    }

    #[tokio::test]
    async fn it_works() {
        let engine = get_engine(&["b", "a", "d", "e", "c"]);

        let page = engine
            .search(&SearchRequest::new().with_page(1, 2).with_sort("name", "asc"))
            .await
            .unwrap();
        assert_eq!(names(&page), ["a", "b"]);
        assert_eq!((page.current_page, page.per_page), (1, 2));
        assert_eq!((page.last_page, page.total), (3, 5));

        let page = engine
            .search(&SearchRequest::new().with_page(2, 2).with_sort("name", "asc"))
            .await
            .unwrap();
        assert_eq!(names(&page), ["c", "d"]);

        let page = engine
            .search(&SearchRequest::new().with_page(9, 2).with_sort("name", "asc"))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!((page.current_page, page.last_page, page.total), (9, 3, 5));
    }

    #[tokio::test]
    async fn defaults() {
        let engine = get_engine(&["b", "a", "d"]);

        let page = engine.search(&SearchRequest::default()).await.unwrap();
        assert_eq!(names(&page), ["d", "a", "b"]);
        assert_eq!((page.current_page, page.per_page, page.last_page), (1, 15, 1));

        let page = engine
            .search(&SearchRequest::new().with_sort("password", "asc"))
            .await
            .unwrap();
        assert_eq!(names(&page), ["d", "a", "b"]);
    }

    #[test]
    fn rejects_unknown_default_ordering() {
        let err = SearchEngine::<Author>::with_config(
            Arc::new(MemoryRepository::new()),
            SearchQueryConfig {
                default_ordering_term: OrderingTerm::descending("updatedAt"),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert_eq!(
            err.downcast_domain_ref::<QueryError>(),
            Some(&QueryError::UnknownOrderingMember("updatedAt".into()))
        );

        let err = SearchEngine::<Author>::with_config(
            Arc::new(MemoryRepository::new()),
            SearchQueryConfig {
                tie_break_member: Some("updatedAt".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown ordering member `updatedAt`");
    }

    #[tokio::test]
    async fn empty_store() {
        let engine = get_engine(&[]);
        let page = engine.search(&SearchRequest::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!((page.total, page.last_page), (0, 0));
    }
}
