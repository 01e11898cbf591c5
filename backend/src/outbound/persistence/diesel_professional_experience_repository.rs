//! PostgreSQL-backed `ProfessionalExperienceRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfessionalExperienceRepository, RepositoryError};
use crate::domain::{MentorId, ProfessionalExperience, ProfessionalExperienceId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{load_experiences, require_mentor, row_count};
use super::models::ExperienceRow;
use super::pool::DbPool;
use super::schema::professional_experiences;

const ENTITY: &str = "professional experience";

/// Diesel-backed implementation of the [`ProfessionalExperienceRepository`]
/// port.
#[derive(Debug, Clone)]
pub struct DieselProfessionalExperienceRepository {
    pool: DbPool,
}

impl DieselProfessionalExperienceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfessionalExperienceRepository for DieselProfessionalExperienceRepository {
    async fn add(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(professional_experiences::table)
                .values(ExperienceRow::from(experience))
                .returning(ExperienceRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, ENTITY, &experience.mentor_id))?
                .into_experience()
        })
    }

    async fn get(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        with_connection!(self.pool, |conn| {
            professional_experiences::table
                .find(id.as_uuid())
                .select(ExperienceRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, ENTITY, id))?
                .into_experience()
        })
    }

    async fn update(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        let row = ExperienceRow::from(experience);
        with_connection!(self.pool, |conn| {
            diesel::update(professional_experiences::table.find(experience.id.as_uuid()))
                .set(&row)
                .returning(ExperienceRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, ENTITY, &experience.id))?
                .into_experience()
        })
    }

    async fn delete(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::delete(professional_experiences::table.find(id.as_uuid()))
                .returning(ExperienceRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, ENTITY, id))?
                .into_experience()
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = professional_experiences::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, ENTITY, &"count"))?;
            Ok(row_count(total))
        })
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &MentorId,
    ) -> Result<Vec<ProfessionalExperience>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            require_mentor(conn, mentor_id).await?;
            load_experiences(conn, mentor_id).await
        })
    }
}
