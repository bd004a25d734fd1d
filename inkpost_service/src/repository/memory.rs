use std::{cmp, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use inkpost_request::{error::CommonError, filter::Filter, ordering::Ordering};
use itertools::Itertools;
use tokio::sync::RwLock;

use crate::{entity::Entity, error::AppResult, repository::EntityRepository};

/// In-memory entity store.
#[derive(Debug)]
pub struct MemoryRepository<E: Entity> {
    records: Arc<RwLock<HashMap<E::Id, E>>>,
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a new memory repository with initial data.
    pub fn with_data(records: Vec<E>) -> Self {
        Self {
            records: Arc::new(RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.id(), record))
                    .collect(),
            )),
        }
    }

    fn check_unique_key(records: &HashMap<E::Id, E>, record: &E) -> Result<(), CommonError> {
        let taken = records
            .values()
            .any(|other| other.id() != record.id() && other.unique_key() == record.unique_key());
        if taken {
            return Err(CommonError::already_exists(
                E::KIND,
                E::UNIQUE_KEY,
                record.unique_key(),
            ));
        }
        Ok(())
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for MemoryRepository<E> {
    async fn select(&self, id: &E::Id) -> AppResult<Option<E>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn select_by_unique_key(&self, key: &str) -> AppResult<Option<E>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| record.unique_key() == key)
            .cloned())
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| filter.evaluate(*record))
            .count() as u64)
    }

    async fn select_ordered(
        &self,
        filter: &Filter,
        ordering: &Ordering,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<E>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| filter.evaluate(*record))
            .sorted_unstable_by(|a, b| ordering.evaluate(*a, *b).unwrap_or(cmp::Ordering::Equal))
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn insert(&self, record: E) -> AppResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id()) {
            return Err(CommonError::already_exists(E::KIND, "id", record.id()).into());
        }
        Self::check_unique_key(&records, &record)?;
        records.insert(record.id(), record);
        Ok(())
    }

    async fn replace(&self, record: E) -> AppResult<bool> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id()) {
            return Ok(false);
        }
        Self::check_unique_key(&records, &record)?;
        records.insert(record.id(), record);
        Ok(true)
    }

    async fn remove(&self, id: &E::Id) -> AppResult<Option<E>> {
        Ok(self.records.write().await.remove(id))
    }
}
