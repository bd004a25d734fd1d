use inkpost_request::error::CommonError;
use tracing::info;

use crate::{
    entity::Entity,
    error::AppResult,
    guard::{EntityGuard, check_required},
    post::{
        create_post_command::title_slug,
        model::{Post, PostId},
    },
    repository::EntityRepositoryArc,
};

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    post_guard: EntityGuard<Post>,
    post_repository: EntityRepositoryArc<Post>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostCommandInput<'a> {
    pub id: PostId,
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostCommandOutput {
    pub post: Post,
}

impl UpdatePostCommand {
    const REQUEST_NAME: &str = "UpdatePost";

    pub fn new(post_repository: EntityRepositoryArc<Post>) -> Self {
        UpdatePostCommand {
            post_guard: EntityGuard::new(post_repository.clone()),
            post_repository,
        }
    }

    /// A new title re-derives the slug, which must stay unique.
    ///
    /// # Errors
    ///
    /// Returns bad request for empty fields before touching the store, then
    /// not found, a conflict when the new slug belongs to another post, and
    /// store errors unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: UpdatePostCommandInput<'_>,
    ) -> AppResult<UpdatePostCommandOutput> {
        let title = input.title.map(str::trim);
        let content = input.content.map(str::trim);
        check_required(
            Self::REQUEST_NAME,
            [
                title.map(|title| (Post::TITLE_FIELD_NAME, title)),
                content.map(|content| (Post::CONTENT_FIELD_NAME, content)),
            ]
            .into_iter()
            .flatten(),
        )?;
        let slug = title
            .map(|title| title_slug(Self::REQUEST_NAME, title))
            .transpose()?;

        let mut post = self.post_guard.get(&input.id).await?;

        if let (Some(title), Some(slug)) = (title, slug) {
            if slug != post.slug {
                self.post_guard.ensure_unique(&slug, Some(&post.id)).await?;
                post.slug = slug;
            }
            post.title = title.to_string();
        }
        if let Some(content) = content {
            post.content = content.to_string();
        }

        if !self.post_repository.replace(post.clone()).await? {
            return Err(CommonError::not_found(Post::KIND, input.id).into());
        }

        info!(post_id = %post.id, "Updated post");

        Ok(UpdatePostCommandOutput { post })
    }
}
