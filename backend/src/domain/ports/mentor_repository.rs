//! Port abstraction for mentor profile persistence.
use async_trait::async_trait;

use crate::domain::{Mentor, MentorCriteria, MentorId, UserId};

use super::RepositoryError;

/// Storage for mentor profiles.
///
/// Reads resolve the owning user and hydrate skills, professional
/// experiences, and pricing plans. Writes persist only the profile row;
/// children go through their own ports. Deleting a mentor removes its
/// experiences, plans, and skill associations but not catalogue skills.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorRepository: Send + Sync {
    /// Insert a profile. Fails with `AlreadyExists` when the user already
    /// holds a mentor profile.
    async fn add(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError>;

    async fn get(&self, id: &MentorId) -> Result<Mentor, RepositoryError>;

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Mentor, RepositoryError>;

    async fn update(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError>;

    async fn delete(&self, id: &MentorId) -> Result<Mentor, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Mentors matching every filter in `criteria`.
    async fn find_by_criteria(
        &self,
        criteria: &MentorCriteria,
    ) -> Result<Vec<Mentor>, RepositoryError>;
}
