//! PostgreSQL-backed `SkillRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RepositoryError, SkillRepository};
use crate::domain::{MentorId, Skill, SkillId, SkillName};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{load_mentor_skills, require_mentor, row_count};
use super::models::{MentorSkillRow, SkillRow};
use super::pool::DbPool;
use super::schema::{mentor_skills, skills};

/// Diesel-backed implementation of the [`SkillRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn skill_by_name(
    conn: &mut AsyncPgConnection,
    name: &SkillName,
) -> Result<Skill, RepositoryError> {
    skills::table
        .filter(skills::name.eq(name.as_str()))
        .select(SkillRow::as_select())
        .first(conn)
        .await
        .map_err(|error| map_diesel_error(error, "skill", name))?
        .into_skill()
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn add(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(skills::table)
                .values(SkillRow::from(skill))
                .returning(SkillRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "skill", &skill.name))?
                .into_skill()
        })
    }

    async fn get(&self, id: &SkillId) -> Result<Skill, RepositoryError> {
        with_connection!(self.pool, |conn| {
            skills::table
                .find(id.as_uuid())
                .select(SkillRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "skill", id))?
                .into_skill()
        })
    }

    async fn get_by_name(&self, name: &SkillName) -> Result<Skill, RepositoryError> {
        with_connection!(self.pool, |conn| skill_by_name(conn, name).await)
    }

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::update(skills::table.find(skill.id.as_uuid()))
                .set(skills::name.eq(skill.name.as_str()))
                .returning(SkillRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| match error {
                    diesel::result::Error::NotFound => {
                        map_diesel_error(error, "skill", &skill.id)
                    }
                    other => map_diesel_error(other, "skill", &skill.name),
                })?
                .into_skill()
        })
    }

    async fn delete(&self, id: &SkillId) -> Result<Skill, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::delete(skills::table.find(id.as_uuid()))
                .returning(SkillRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "skill", id))?
                .into_skill()
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = skills::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "skill", &"count"))?;
            Ok(row_count(total))
        })
    }

    async fn upsert_many(&self, names: &[SkillName]) -> Result<Vec<Skill>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let mut upserted = Vec::with_capacity(names.len());
            for name in names {
                diesel::insert_into(skills::table)
                    .values(SkillRow::from(&Skill::new(name.clone())))
                    .on_conflict(skills::name)
                    .do_nothing()
                    .execute(conn)
                    .await
                    .map_err(|error| map_diesel_error(error, "skill", name))?;
                upserted.push(skill_by_name(conn, name).await?);
            }
            Ok(upserted)
        })
    }

    async fn attach_to_mentor(
        &self,
        mentor_id: &MentorId,
        skill_ids: &[SkillId],
    ) -> Result<(), RepositoryError> {
        let rows: Vec<MentorSkillRow> = skill_ids
            .iter()
            .map(|skill_id| MentorSkillRow {
                mentor_id: *mentor_id.as_uuid(),
                skill_id: *skill_id.as_uuid(),
            })
            .collect();
        with_connection!(self.pool, |conn| {
            require_mentor(conn, mentor_id).await?;
            if rows.is_empty() {
                return Ok(());
            }
            diesel::insert_into(mentor_skills::table)
                .values(&rows)
                .on_conflict_do_nothing()
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "mentor skill", mentor_id))?;
            Ok(())
        })
    }

    async fn detach_all_from_mentor(&self, mentor_id: &MentorId) -> Result<(), RepositoryError> {
        with_connection!(self.pool, |conn| {
            require_mentor(conn, mentor_id).await?;
            diesel::delete(
                mentor_skills::table.filter(mentor_skills::mentor_id.eq(mentor_id.as_uuid())),
            )
            .execute(conn)
            .await
            .map_err(|error| map_diesel_error(error, "mentor skill", mentor_id))?;
            Ok(())
        })
    }

    async fn list(&self) -> Result<Vec<Skill>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            skills::table
                .order(skills::name.asc())
                .select(SkillRow::as_select())
                .load(conn)
                .await
                .map_err(|error| map_diesel_error(error, "skill", &"catalogue"))?
                .into_iter()
                .map(SkillRow::into_skill)
                .collect()
        })
    }

    async fn list_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<Skill>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            require_mentor(conn, mentor_id).await?;
            load_mentor_skills(conn, mentor_id).await
        })
    }
}
