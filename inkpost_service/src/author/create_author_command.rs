use inkpost_common::{date_time::UtcDateTime, id::worker::WorkerIdGenerator};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    author::model::{Author, AuthorId},
    error::AppResult,
    guard::{EntityGuard, check_required},
    repository::EntityRepositoryArc,
};

/// Command for creating new authors.
///
/// Emails are unique: a second author with the same email is rejected with a
/// conflict.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommand {
    id_generator: Arc<Mutex<WorkerIdGenerator>>,
    author_guard: EntityGuard<Author>,
    author_repository: EntityRepositoryArc<Author>,
}

/// Input data for creating an author.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Output data from author creation.
#[derive(Debug, Clone)]
pub struct CreateAuthorCommandOutput {
    /// The created author
    pub author: Author,
}

impl CreateAuthorCommand {
    const REQUEST_NAME: &str = "CreateAuthor";

    pub fn new(
        id_generator: Arc<Mutex<WorkerIdGenerator>>,
        author_repository: EntityRepositoryArc<Author>,
    ) -> Self {
        Self {
            id_generator,
            author_guard: EntityGuard::new(author_repository.clone()),
            author_repository,
        }
    }

    /// Executes the author creation command.
    ///
    /// # Errors
    ///
    /// Returns a bad request when name or email is empty, a conflict when the
    /// email is taken, and store errors unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: CreateAuthorCommandInput<'_>,
    ) -> AppResult<CreateAuthorCommandOutput> {
        info!(
            name = %input.name,
            email = %input.email,
            "Creating author"
        );

        let name = input.name.trim();
        let email = input.email.trim();
        check_required(
            Self::REQUEST_NAME,
            [
                (Author::NAME_FIELD_NAME, name),
                (Author::EMAIL_FIELD_NAME, email),
            ],
        )?;

        self.author_guard.ensure_unique(email, None).await?;

        let author = Author {
            id: AuthorId::new(self.id_generator.lock().await.generate_async().await),
            name: name.to_string(),
            email: email.to_string(),
            create_time: UtcDateTime::now(),
        };
        self.author_repository.insert(author.clone()).await?;

        info!(author_id = %author.id, "Successfully created author");

        Ok(CreateAuthorCommandOutput { author })
    }
}
