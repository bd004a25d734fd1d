use inkpost_request::error::CommonError;
use tracing::info;

use crate::{
    author::model::{Author, AuthorId},
    entity::Entity,
    error::AppResult,
    guard::EntityGuard,
    repository::EntityRepositoryArc,
};

#[derive(Debug, Clone)]
pub struct DeleteAuthorCommand {
    author_guard: EntityGuard<Author>,
    author_repository: EntityRepositoryArc<Author>,
}

impl DeleteAuthorCommand {
    pub fn new(author_repository: EntityRepositoryArc<Author>) -> Self {
        DeleteAuthorCommand {
            author_guard: EntityGuard::new(author_repository.clone()),
            author_repository,
        }
    }

    /// Removes an author and returns it.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: AuthorId) -> AppResult<Author> {
        self.author_guard.get(&id).await?;

        let author = self
            .author_repository
            .remove(&id)
            .await?
            .ok_or_else(|| CommonError::not_found(Author::KIND, id))?;

        info!(author_id = %id, "Deleted author");

        Ok(author)
    }
}
