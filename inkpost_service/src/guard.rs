use inkpost_request::error::{CommonError, RequestError};

use crate::{entity::Entity, error::AppResult, repository::EntityRepositoryArc};

/// Lookup and uniqueness checks every mutation goes through.
#[derive(Debug, Clone)]
pub struct EntityGuard<E: Entity> {
    repository: EntityRepositoryArc<E>,
}

impl<E: Entity> EntityGuard<E> {
    pub fn new(repository: EntityRepositoryArc<E>) -> Self {
        Self { repository }
    }

    /// Fetches a record, failing with not found when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or the store fails.
    pub async fn get(&self, id: &E::Id) -> AppResult<E> {
        self.repository
            .select(id)
            .await?
            .ok_or_else(|| CommonError::not_found(E::KIND, id).into())
    }

    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn find_by_unique_key(&self, key: &str) -> AppResult<Option<E>> {
        self.repository.select_by_unique_key(key).await
    }

    /// Fails with a conflict when `key` belongs to a record other than `owner`.
    ///
    /// This is a best-effort check; the store enforces the constraint again on
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is taken or the store fails.
    pub async fn ensure_unique(&self, key: &str, owner: Option<&E::Id>) -> AppResult<()> {
        match self.find_by_unique_key(key).await? {
            Some(existing) if owner != Some(&existing.id()) => {
                Err(CommonError::already_exists(E::KIND, E::UNIQUE_KEY, key).into())
            }
            _ => Ok(()),
        }
    }
}

/// Rejects the request when any of `fields` is empty, reporting every empty
/// field at once.
///
/// # Errors
///
/// Returns a bad request listing the empty fields.
pub fn check_required<'a, I>(request_name: &str, fields: I) -> Result<(), RequestError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let violations = fields
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| (field, CommonError::RequiredFieldMissing))
        .collect::<Vec<_>>();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(RequestError::bad_request(request_name, violations))
    }
}
