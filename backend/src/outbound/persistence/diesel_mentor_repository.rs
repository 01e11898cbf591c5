//! PostgreSQL-backed `MentorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{MentorRepository, RepositoryError};
use crate::domain::{Mentor, MentorCriteria, MentorId, UserId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{hydrate_mentor, row_count};
use super::models::MentorRow;
use super::pool::DbPool;
use super::schema::{mentor_skills, mentors, skills};

/// Diesel-backed implementation of the [`MentorRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselMentorRepository {
    pool: DbPool,
}

impl DieselMentorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_mentor(
    conn: &mut AsyncPgConnection,
    id: &MentorId,
) -> Result<Mentor, RepositoryError> {
    let row = mentors::table
        .find(id.as_uuid())
        .select(MentorRow::as_select())
        .first(conn)
        .await
        .map_err(|error| map_diesel_error(error, "mentor", id))?;
    hydrate_mentor(conn, row).await
}

async fn find_rows(
    conn: &mut AsyncPgConnection,
    criteria: &MentorCriteria,
) -> Result<Vec<MentorRow>, RepositoryError> {
    let mut query = mentors::table
        .select(MentorRow::as_select())
        .order(mentors::id.asc())
        .into_boxed();
    if criteria.visible_only {
        query = query.filter(mentors::is_visible.eq(true));
    }
    if let Some(availability) = criteria.availability {
        query = query.filter(mentors::availability.eq(availability.as_str()));
    }
    if let Some(language) = criteria.language {
        query = query.filter(mentors::languages.contains(vec![language.as_str()]));
    }
    if let Some(training_type) = criteria.training_type {
        query = query.filter(mentors::training_types.contains(vec![training_type.as_str()]));
    }
    if let Some(skill) = &criteria.skill {
        let with_skill = mentor_skills::table
            .inner_join(skills::table)
            .filter(skills::name.eq(skill.as_str().to_owned()))
            .select(mentor_skills::mentor_id);
        query = query.filter(mentors::id.eq_any(with_skill));
    }
    query
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "mentor", &"search"))
}

#[async_trait]
impl MentorRepository for DieselMentorRepository {
    async fn add(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(mentors::table)
                .values(MentorRow::from(mentor))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor", &mentor.user().id()))?;
            load_mentor(conn, &mentor.id()).await
        })
    }

    async fn get(&self, id: &MentorId) -> Result<Mentor, RepositoryError> {
        with_connection!(self.pool, |conn| load_mentor(conn, id).await)
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Mentor, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let row = mentors::table
                .filter(mentors::user_id.eq(user_id.as_uuid()))
                .select(MentorRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor", user_id))?;
            hydrate_mentor(conn, row).await
        })
    }

    async fn update(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError> {
        let row = MentorRow::from(mentor);
        with_connection!(self.pool, |conn| {
            let updated = diesel::update(mentors::table.find(mentor.id().as_uuid()))
                .set(&row)
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor", &mentor.id()))?;
            if updated == 0 {
                return Err(RepositoryError::not_found("mentor", mentor.id().to_string()));
            }
            load_mentor(conn, &mentor.id()).await
        })
    }

    async fn delete(&self, id: &MentorId) -> Result<Mentor, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let mentor = load_mentor(conn, id).await?;
            diesel::delete(mentors::table.find(id.as_uuid()))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor", id))?;
            Ok(mentor)
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = mentors::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor", &"count"))?;
            Ok(row_count(total))
        })
    }

    async fn find_by_criteria(
        &self,
        criteria: &MentorCriteria,
    ) -> Result<Vec<Mentor>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let rows = find_rows(conn, criteria).await?;
            let mut found = Vec::with_capacity(rows.len());
            for row in rows {
                found.push(hydrate_mentor(conn, row).await?);
            }
            Ok(found)
        })
    }
}
