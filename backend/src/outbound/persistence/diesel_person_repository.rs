//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersonRepository, RepositoryError};
use crate::domain::{Person, PersonId, UserId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::row_count;
use super::models::PersonRow;
use super::pool::DbPool;
use super::schema::persons;

/// Diesel-backed implementation of the [`PersonRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
}

impl DieselPersonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn add(&self, person: &Person) -> Result<Person, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(persons::table)
                .values(PersonRow::from(person))
                .returning(PersonRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", &person.user_id))?
                .into_person()
        })
    }

    async fn get(&self, id: &PersonId) -> Result<Person, RepositoryError> {
        with_connection!(self.pool, |conn| {
            persons::table
                .find(id.as_uuid())
                .select(PersonRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", id))?
                .into_person()
        })
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Person, RepositoryError> {
        with_connection!(self.pool, |conn| {
            persons::table
                .filter(persons::user_id.eq(user_id.as_uuid()))
                .select(PersonRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", user_id))?
                .into_person()
        })
    }

    async fn update(&self, person: &Person) -> Result<Person, RepositoryError> {
        let row = PersonRow::from(person);
        with_connection!(self.pool, |conn| {
            diesel::update(persons::table.find(person.id.as_uuid()))
                .set(&row)
                .returning(PersonRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", &person.id))?
                .into_person()
        })
    }

    async fn delete(&self, id: &PersonId) -> Result<Person, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::delete(persons::table.find(id.as_uuid()))
                .returning(PersonRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", id))?
                .into_person()
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = persons::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "person", &"count"))?;
            Ok(row_count(total))
        })
    }
}
