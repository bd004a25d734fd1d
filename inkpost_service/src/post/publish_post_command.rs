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
pub struct PublishPostCommand {
    post_guard: EntityGuard<Post>,
    post_repository: EntityRepositoryArc<Post>,
}

#[derive(Debug, Clone)]
pub struct UnpublishPostCommand {
    post_guard: EntityGuard<Post>,
    post_repository: EntityRepositoryArc<Post>,
}

impl PublishPostCommand {
    pub fn new(post_repository: EntityRepositoryArc<Post>) -> Self {
        PublishPostCommand {
            post_guard: EntityGuard::new(post_repository.clone()),
            post_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: PostId) -> AppResult<Post> {
        set_published(&self.post_guard, &self.post_repository, id, true).await
    }
}

impl UnpublishPostCommand {
    pub fn new(post_repository: EntityRepositoryArc<Post>) -> Self {
        UnpublishPostCommand {
            post_guard: EntityGuard::new(post_repository.clone()),
            post_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: PostId) -> AppResult<Post> {
        set_published(&self.post_guard, &self.post_repository, id, false).await
    }
}

async fn set_published(
    post_guard: &EntityGuard<Post>,
    post_repository: &EntityRepositoryArc<Post>,
    id: PostId,
    published: bool,
) -> AppResult<Post> {
    let mut post = post_guard.get(&id).await?;
    post.published = published;

    if !post_repository.replace(post.clone()).await? {
        return Err(CommonError::not_found(Post::KIND, id).into());
    }

    info!(post_id = %id, published, "Changed post visibility");

    Ok(post)
}
