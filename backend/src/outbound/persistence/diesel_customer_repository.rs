//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.
//!
//! Bookmarks live in `customer_bookmarks`; updates reconcile that table with
//! the aggregate so existing bookmarks keep their creation order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CustomerRepository, RepositoryError};
use crate::domain::{Customer, CustomerId, UserId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{hydrate_customer, row_count};
use super::models::{CustomerRow, CustomerUpdate, NewBookmarkRow};
use super::pool::DbPool;
use super::schema::{customer_bookmarks, customers};

/// Diesel-backed implementation of the [`CustomerRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_customer(
    conn: &mut AsyncPgConnection,
    id: &CustomerId,
) -> Result<Customer, RepositoryError> {
    let row = customers::table
        .find(id.as_uuid())
        .select(CustomerRow::as_select())
        .first(conn)
        .await
        .map_err(|error| map_diesel_error(error, "customer", id))?;
    hydrate_customer(conn, row).await
}

/// Make the stored bookmarks equal to the customer's set.
async fn sync_bookmarks(
    conn: &mut AsyncPgConnection,
    customer: &Customer,
) -> Result<(), RepositoryError> {
    let customer_id = customer.id();
    let wanted: Vec<Uuid> = customer
        .bookmarked_mentors()
        .iter()
        .map(|mentor_id| *mentor_id.as_uuid())
        .collect();

    diesel::delete(
        customer_bookmarks::table
            .filter(customer_bookmarks::customer_id.eq(customer_id.as_uuid()))
            .filter(customer_bookmarks::mentor_id.ne_all(wanted)),
    )
    .execute(conn)
    .await
    .map_err(|error| map_diesel_error(error, "customer", &customer_id))?;

    for mentor_id in customer.bookmarked_mentors() {
        diesel::insert_into(customer_bookmarks::table)
            .values(NewBookmarkRow::new(customer_id, *mentor_id))
            .on_conflict_do_nothing()
            .execute(conn)
            .await
            .map_err(|error| map_diesel_error(error, "customer", mentor_id))?;
    }
    Ok(())
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn add(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(customers::table)
                .values(CustomerRow::from(customer))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "customer", &customer.user().id()))?;
            sync_bookmarks(conn, customer).await?;
            load_customer(conn, &customer.id()).await
        })
    }

    async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        with_connection!(self.pool, |conn| load_customer(conn, id).await)
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Customer, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let row = customers::table
                .filter(customers::user_id.eq(user_id.as_uuid()))
                .select(CustomerRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "customer", user_id))?;
            hydrate_customer(conn, row).await
        })
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let updated = diesel::update(customers::table.find(customer.id().as_uuid()))
                .set(CustomerUpdate::from(customer))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "customer", &customer.id()))?;
            if updated == 0 {
                return Err(RepositoryError::not_found(
                    "customer",
                    customer.id().to_string(),
                ));
            }
            sync_bookmarks(conn, customer).await?;
            load_customer(conn, &customer.id()).await
        })
    }

    async fn delete(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let customer = load_customer(conn, id).await?;
            diesel::delete(customers::table.find(id.as_uuid()))
                .execute(conn)
                .await
                .map_err(|error| map_diesel_error(error, "customer", id))?;
            Ok(customer)
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = customers::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "customer", &"count"))?;
            Ok(row_count(total))
        })
    }
}
