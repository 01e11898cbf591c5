//! Port abstraction for the skill catalogue and mentor skill associations.
use async_trait::async_trait;

use crate::domain::{MentorId, Skill, SkillId, SkillName};

use super::RepositoryError;

/// Storage for the global skill catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Insert a skill. Fails with `AlreadyExists` on a duplicate name.
    async fn add(&self, skill: &Skill) -> Result<Skill, RepositoryError>;

    async fn get(&self, id: &SkillId) -> Result<Skill, RepositoryError>;

    async fn get_by_name(&self, name: &SkillName) -> Result<Skill, RepositoryError>;

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError>;

    /// Remove a catalogue entry and its mentor associations.
    async fn delete(&self, id: &SkillId) -> Result<Skill, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Ensure every name exists in the catalogue, returning the catalogue
    /// entries in input order.
    async fn upsert_many(&self, names: &[SkillName]) -> Result<Vec<Skill>, RepositoryError>;

    /// Associate skills with a mentor. Existing associations are kept.
    async fn attach_to_mentor(
        &self,
        mentor_id: &MentorId,
        skill_ids: &[SkillId],
    ) -> Result<(), RepositoryError>;

    /// Drop every skill association of a mentor.
    async fn detach_all_from_mentor(&self, mentor_id: &MentorId) -> Result<(), RepositoryError>;

    /// Whole catalogue ordered by name.
    async fn list(&self) -> Result<Vec<Skill>, RepositoryError>;

    /// Skills attached to a mentor ordered by name.
    async fn list_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<Skill>, RepositoryError>;
}
