//! Port abstraction for customer profile persistence.
use async_trait::async_trait;

use crate::domain::{Customer, CustomerId, UserId};

use super::RepositoryError;

/// Storage for customer profiles and their bookmarks.
///
/// Reads resolve the owning user. Writes persist the profile row and the
/// bookmark set; the owning user is written through [`super::UserRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a profile. Fails with `AlreadyExists` when the user already
    /// holds a customer profile.
    async fn add(&self, customer: &Customer) -> Result<Customer, RepositoryError>;

    async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError>;

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Customer, RepositoryError>;

    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError>;

    async fn delete(&self, id: &CustomerId) -> Result<Customer, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
