use inkpost_request::query::{page::SearchPage, search::SearchRequest};

use crate::{
    error::AppResult,
    guard::EntityGuard,
    post::model::{Post, PostId},
    repository::EntityRepositoryArc,
    search::SearchEngine,
};

#[derive(Debug, Clone)]
pub struct PostQueryManager {
    post_guard: EntityGuard<Post>,
    search_engine: SearchEngine<Post>,
}

impl PostQueryManager {
    /// # Errors
    ///
    /// Returns an error if the search engine rejects the post schema.
    pub fn new(post_repository: EntityRepositoryArc<Post>) -> AppResult<Self> {
        Ok(PostQueryManager {
            post_guard: EntityGuard::new(post_repository.clone()),
            search_engine: SearchEngine::new(post_repository)?,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: PostId) -> AppResult<Post> {
        self.post_guard.get(&id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Option<Post>> {
        self.post_guard.find_by_unique_key(slug).await
    }

    /// Searches posts by title or content.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, request: &SearchRequest) -> AppResult<SearchPage<Post>> {
        self.search_engine.search(request).await
    }
}
