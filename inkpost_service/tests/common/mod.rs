#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering as AtomicOrdering},
};

use async_trait::async_trait;
use inkpost_common::id::worker::WorkerIdGenerator;
use inkpost_request::{filter::Filter, ordering::Ordering};
use inkpost_service::{
    ContentService,
    author::{create_author_command::CreateAuthorCommandInput, model::Author},
    entity::Entity,
    error::{AppError, AppResult},
    post::model::Post,
    repository::{EntityRepository, memory::MemoryRepository},
};

/// Store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingRepository;

fn store_failure() -> AppError {
    AppError::internal("store unavailable")
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for FailingRepository {
    async fn select(&self, _id: &E::Id) -> AppResult<Option<E>> {
        Err(store_failure())
    }

    async fn select_by_unique_key(&self, _key: &str) -> AppResult<Option<E>> {
        Err(store_failure())
    }

    async fn count(&self, _filter: &Filter) -> AppResult<u64> {
        Err(store_failure())
    }

    async fn select_ordered(
        &self,
        _filter: &Filter,
        _ordering: &Ordering,
        _offset: u64,
        _limit: u64,
    ) -> AppResult<Vec<E>> {
        Err(store_failure())
    }

    async fn insert(&self, _record: E) -> AppResult<()> {
        Err(store_failure())
    }

    async fn replace(&self, _record: E) -> AppResult<bool> {
        Err(store_failure())
    }

    async fn remove(&self, _id: &E::Id) -> AppResult<Option<E>> {
        Err(store_failure())
    }
}

/// Memory store that counts writes.
#[derive(Debug)]
pub struct CountingRepository<E: Entity> {
    inner: MemoryRepository<E>,
    pub inserts: AtomicUsize,
    pub replaces: AtomicUsize,
}

impl<E: Entity> CountingRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: MemoryRepository::new(),
            inserts: AtomicUsize::new(0),
            replaces: AtomicUsize::new(0),
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(AtomicOrdering::SeqCst)
    }

    pub fn replace_count(&self) -> usize {
        self.replaces.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for CountingRepository<E> {
    async fn select(&self, id: &E::Id) -> AppResult<Option<E>> {
        self.inner.select(id).await
    }

    async fn select_by_unique_key(&self, key: &str) -> AppResult<Option<E>> {
        self.inner.select_by_unique_key(key).await
    }

    async fn count(&self, filter: &Filter) -> AppResult<u64> {
        self.inner.count(filter).await
    }

    async fn select_ordered(
        &self,
        filter: &Filter,
        ordering: &Ordering,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<E>> {
        self.inner
            .select_ordered(filter, ordering, offset, limit)
            .await
    }

    async fn insert(&self, record: E) -> AppResult<()> {
        self.inserts.fetch_add(1, AtomicOrdering::SeqCst);
        self.inner.insert(record).await
    }

    async fn replace(&self, record: E) -> AppResult<bool> {
        self.replaces.fetch_add(1, AtomicOrdering::SeqCst);
        self.inner.replace(record).await
    }

    async fn remove(&self, id: &E::Id) -> AppResult<Option<E>> {
        self.inner.remove(id).await
    }
}

pub fn memory_service() -> ContentService {
    inkpost_service::create_content_service(7).unwrap()
}

pub fn counting_service() -> (
    ContentService,
    Arc<CountingRepository<Author>>,
    Arc<CountingRepository<Post>>,
) {
    let authors = Arc::new(CountingRepository::<Author>::new());
    let posts = Arc::new(CountingRepository::<Post>::new());
    let service =
        ContentService::new(WorkerIdGenerator::new(7), authors.clone(), posts.clone()).unwrap();
    (service, authors, posts)
}

pub fn failing_service() -> ContentService {
    ContentService::new(
        WorkerIdGenerator::new(7),
        Arc::new(FailingRepository),
        Arc::new(FailingRepository),
    )
    .unwrap()
}

pub async fn create_author(service: &ContentService, name: &str, email: &str) -> Author {
    service
        .create_author_command
        .execute(CreateAuthorCommandInput { name, email })
        .await
        .unwrap()
        .author
}
