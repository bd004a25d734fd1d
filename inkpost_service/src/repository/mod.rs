use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use inkpost_request::{filter::Filter, ordering::Ordering};

use crate::{entity::Entity, error::AppResult};

pub mod memory;

/// Narrow persistence interface the search engine, guards and commands are
/// written against.
#[async_trait]
pub trait EntityRepository<E: Entity>: Debug {
    async fn select(&self, id: &E::Id) -> AppResult<Option<E>>;

    async fn select_by_unique_key(&self, key: &str) -> AppResult<Option<E>>;

    /// Number of records matching `filter`.
    async fn count(&self, filter: &Filter) -> AppResult<u64>;

    /// The `[offset, offset + limit)` window of matching records, sorted by
    /// `ordering`.
    async fn select_ordered(
        &self,
        filter: &Filter,
        ordering: &Ordering,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<E>>;

    /// Fails with a conflict when the id or unique key is already taken.
    async fn insert(&self, record: E) -> AppResult<()>;

    /// Returns `false` when no record with the same id exists. Fails with a
    /// conflict when another record owns the unique key.
    async fn replace(&self, record: E) -> AppResult<bool>;

    async fn remove(&self, id: &E::Id) -> AppResult<Option<E>>;
}

pub type EntityRepositoryArc<E> = Arc<dyn EntityRepository<E> + Send + Sync>;
