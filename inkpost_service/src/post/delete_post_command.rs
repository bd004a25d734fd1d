use inkpost_request::error::CommonError;
use tracing::info;

use crate::{
    entity::Entity,
    error::AppResult,
    guard::EntityGuard,
    post::model::{Post, PostId},
    repository::EntityRepositoryArc,
};

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    post_guard: EntityGuard<Post>,
    post_repository: EntityRepositoryArc<Post>,
}

impl DeletePostCommand {
    pub fn new(post_repository: EntityRepositoryArc<Post>) -> Self {
        DeletePostCommand {
            post_guard: EntityGuard::new(post_repository.clone()),
            post_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: PostId) -> AppResult<Post> {
        self.post_guard.get(&id).await?;

        let post = self
            .post_repository
            .remove(&id)
            .await?
            .ok_or_else(|| CommonError::not_found(Post::KIND, id))?;

        info!(post_id = %id, "Deleted post");

        Ok(post)
    }
}
