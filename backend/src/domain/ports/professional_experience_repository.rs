//! Port abstraction for professional experience persistence.
use async_trait::async_trait;

use crate::domain::{MentorId, ProfessionalExperience, ProfessionalExperienceId};

use super::RepositoryError;

/// Storage for mentor professional experiences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionalExperienceRepository: Send + Sync {
    /// Insert an experience. Fails with `NotFound` when the mentor does not
    /// exist.
    async fn add(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError>;

    async fn get(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError>;

    async fn update(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError>;

    async fn delete(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Experiences of a mentor, most recent start first.
    async fn list_by_mentor(
        &self,
        mentor_id: &MentorId,
    ) -> Result<Vec<ProfessionalExperience>, RepositoryError>;
}
