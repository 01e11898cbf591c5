//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{Email, ExternalId, User, UserId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{hydrate_user, load_user, row_count};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn add(&self, user: &User) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(users::table)
                .values(NewUserRow::from(user))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", user.email()))?;
            load_user(conn, *user.id().as_uuid()).await
        })
    }

    async fn get(&self, id: &UserId) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| load_user(conn, *id.as_uuid()).await)
    }

    async fn get_by_email(&self, email: &Email) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let row = users::table
                .filter(users::email.eq(email.as_str()))
                .select(UserRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", email))?;
            hydrate_user(conn, row).await
        })
    }

    async fn get_by_external_id(&self, external_id: &ExternalId) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let row = users::table
                .filter(users::external_id.eq(external_id.as_str()))
                .select(UserRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", external_id))?;
            hydrate_user(conn, row).await
        })
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let updated = diesel::update(users::table.find(user.id().as_uuid()))
                .set(UserUpdate::from(user))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", user.email()))?;
            if updated == 0 {
                return Err(RepositoryError::not_found("user", user.id().to_string()));
            }
            load_user(conn, *user.id().as_uuid()).await
        })
    }

    async fn delete(&self, id: &UserId) -> Result<User, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let user = load_user(conn, *id.as_uuid()).await?;
            diesel::delete(users::table.find(id.as_uuid()))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", id))?;
            Ok(user)
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = users::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "user", &"count"))?;
            Ok(row_count(total))
        })
    }
}
