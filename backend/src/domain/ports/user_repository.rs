//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{Email, ExternalId, User, UserId};

use super::RepositoryError;

/// Storage for registered users.
///
/// Reads hydrate the user's personal details when they exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. Fails with `AlreadyExists` when the id, email, or
    /// external id is taken.
    async fn add(&self, user: &User) -> Result<User, RepositoryError>;

    async fn get(&self, id: &UserId) -> Result<User, RepositoryError>;

    async fn get_by_email(&self, email: &Email) -> Result<User, RepositoryError>;

    async fn get_by_external_id(&self, external_id: &ExternalId) -> Result<User, RepositoryError>;

    /// Persist the email and external id of an existing user.
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    /// Remove a user, returning it as it was before deletion.
    async fn delete(&self, id: &UserId) -> Result<User, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
