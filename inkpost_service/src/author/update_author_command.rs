use tracing::info;

use crate::{
    author::model::{Author, AuthorId},
    entity::Entity,
    error::AppResult,
    guard::{EntityGuard, check_required},
    repository::EntityRepositoryArc,
};
use inkpost_request::error::CommonError;

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommand {
    author_guard: EntityGuard<Author>,
    author_repository: EntityRepositoryArc<Author>,
}

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommandInput<'a> {
    pub id: AuthorId,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct UpdateAuthorCommandOutput {
    pub author: Author,
}

impl UpdateAuthorCommand {
    const REQUEST_NAME: &str = "UpdateAuthor";

    pub fn new(author_repository: EntityRepositoryArc<Author>) -> Self {
        UpdateAuthorCommand {
            author_guard: EntityGuard::new(author_repository.clone()),
            author_repository,
        }
    }

    /// Applies the provided fields to an existing author.
    ///
    /// Provided fields must be non-empty, which is checked before the store is
    /// touched. Keeping one's own email is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns bad request for empty fields, not found, a conflict when the
    /// email belongs to another author, and store errors unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: UpdateAuthorCommandInput<'_>,
    ) -> AppResult<UpdateAuthorCommandOutput> {
        let name = input.name.map(str::trim);
        let email = input.email.map(str::trim);
        check_required(
            Self::REQUEST_NAME,
            [
                name.map(|name| (Author::NAME_FIELD_NAME, name)),
                email.map(|email| (Author::EMAIL_FIELD_NAME, email)),
            ]
            .into_iter()
            .flatten(),
        )?;

        let mut author = self.author_guard.get(&input.id).await?;

        if let Some(email) = email {
            if email != author.email {
                self.author_guard
                    .ensure_unique(email, Some(&author.id))
                    .await?;
                author.email = email.to_string();
            }
        }
        if let Some(name) = name {
            author.name = name.to_string();
        }

        if !self.author_repository.replace(author.clone()).await? {
            return Err(CommonError::not_found(Author::KIND, input.id).into());
        }

        info!(author_id = %author.id, "Updated author");

        Ok(UpdateAuthorCommandOutput { author })
    }
}
