use inkpost_request::query::{page::SearchPage, search::SearchRequest};

use crate::{
    author::model::{Author, AuthorId},
    error::AppResult,
    guard::EntityGuard,
    repository::EntityRepositoryArc,
    search::SearchEngine,
};

#[derive(Debug, Clone)]
pub struct AuthorQueryManager {
    author_guard: EntityGuard<Author>,
    search_engine: SearchEngine<Author>,
}

impl AuthorQueryManager {
    /// # Errors
    ///
    /// Returns an error if the search engine rejects the author schema.
    pub fn new(author_repository: EntityRepositoryArc<Author>) -> AppResult<Self> {
        Ok(AuthorQueryManager {
            author_guard: EntityGuard::new(author_repository.clone()),
            search_engine: SearchEngine::new(author_repository)?,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: AuthorId) -> AppResult<Author> {
        self.author_guard.get(&id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Author>> {
        self.author_guard.find_by_unique_key(email).await
    }

    /// Searches authors by name or email. Sortable by `name`, `email` and
    /// `createdAt`; newest first by default.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, request: &SearchRequest) -> AppResult<SearchPage<Author>> {
        self.search_engine.search(request).await
    }
}
