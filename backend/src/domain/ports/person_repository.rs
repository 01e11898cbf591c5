//! Port abstraction for personal details persistence.
use async_trait::async_trait;

use crate::domain::{Person, PersonId, UserId};

use super::RepositoryError;

/// Storage for the personal details attached to users, one record per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn add(&self, person: &Person) -> Result<Person, RepositoryError>;

    async fn get(&self, id: &PersonId) -> Result<Person, RepositoryError>;

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Person, RepositoryError>;

    async fn update(&self, person: &Person) -> Result<Person, RepositoryError>;

    async fn delete(&self, id: &PersonId) -> Result<Person, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
