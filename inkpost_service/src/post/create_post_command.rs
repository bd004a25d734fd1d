use inkpost_common::{date_time::UtcDateTime, id::worker::WorkerIdGenerator};
use inkpost_request::error::{CommonError, RequestError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    author::model::{Author, AuthorId},
    error::AppResult,
    guard::{EntityGuard, check_required},
    post::model::{Post, PostId, slugify},
    repository::EntityRepositoryArc,
};

/// Creates unpublished posts for existing authors.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    id_generator: Arc<Mutex<WorkerIdGenerator>>,
    author_guard: EntityGuard<Author>,
    post_guard: EntityGuard<Post>,
    post_repository: EntityRepositoryArc<Post>,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommandInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommandOutput {
    pub post: Post,
}

impl CreatePostCommand {
    const REQUEST_NAME: &str = "CreatePost";

    pub fn new(
        id_generator: Arc<Mutex<WorkerIdGenerator>>,
        author_repository: EntityRepositoryArc<Author>,
        post_repository: EntityRepositoryArc<Post>,
    ) -> Self {
        Self {
            id_generator,
            author_guard: EntityGuard::new(author_repository),
            post_guard: EntityGuard::new(post_repository.clone()),
            post_repository,
        }
    }

    /// # Errors
    ///
    /// Returns a bad request for an empty title or content, not found when
    /// the author is missing, a conflict when the slug is taken, and store
    /// errors unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreatePostCommandInput<'_>,
    ) -> AppResult<CreatePostCommandOutput> {
        let title = input.title.trim();
        let content = input.content.trim();
        check_required(
            Self::REQUEST_NAME,
            [
                (Post::TITLE_FIELD_NAME, title),
                (Post::CONTENT_FIELD_NAME, content),
            ],
        )?;

        let author = self.author_guard.get(&input.author_id).await?;

        let slug = title_slug(Self::REQUEST_NAME, title)?;
        self.post_guard.ensure_unique(&slug, None).await?;

        let post = Post {
            id: PostId::new(self.id_generator.lock().await.generate_async().await),
            title: title.to_string(),
            content: content.to_string(),
            slug,
            author_id: author.id,
            published: false,
            create_time: UtcDateTime::now(),
        };
        self.post_repository.insert(post.clone()).await?;

        info!(post_id = %post.id, slug = %post.slug, "Created post");

        Ok(CreatePostCommandOutput { post })
    }
}

/// Slug for `title`, rejecting titles without any letters or digits.
pub(crate) fn title_slug(request_name: &str, title: &str) -> Result<String, RequestError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(RequestError::bad_request(
            request_name,
            [(
                Post::TITLE_FIELD_NAME,
                CommonError::InvalidStringFormat {
                    expected: "text containing letters or digits".into(),
                },
            )],
        ));
    }
    Ok(slug)
}
