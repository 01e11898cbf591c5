//! PostgreSQL-backed `PricingPlanRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PricingPlanRepository, RepositoryError};
use crate::domain::{MentorId, PricingPlan, PricingPlanId};

use super::ambient::with_connection;
use super::error_mapping::map_diesel_error;
use super::hydration::{load_pricing_plans, require_mentor, row_count};
use super::models::PricingPlanRow;
use super::pool::DbPool;
use super::schema::pricing_plans;

/// Diesel-backed implementation of the [`PricingPlanRepository`] port.
#[derive(Debug, Clone)]
pub struct DieselPricingPlanRepository {
    pool: DbPool,
}

impl DieselPricingPlanRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingPlanRepository for DieselPricingPlanRepository {
    async fn add(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::insert_into(pricing_plans::table)
                .values(PricingPlanRow::from(plan))
                .returning(PricingPlanRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "pricing plan", &plan.mentor_id()))?
                .into_plan()
        })
    }

    async fn get(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError> {
        with_connection!(self.pool, |conn| {
            pricing_plans::table
                .find(id.as_uuid())
                .select(PricingPlanRow::as_select())
                .first(conn)
                .await
                .map_err(|error| map_diesel_error(error, "pricing plan", id))?
                .into_plan()
        })
    }

    async fn update(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError> {
        let row = PricingPlanRow::from(plan);
        with_connection!(self.pool, |conn| {
            diesel::update(pricing_plans::table.find(plan.id().as_uuid()))
                .set(&row)
                .returning(PricingPlanRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "pricing plan", &plan.id()))?
                .into_plan()
        })
    }

    async fn delete(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError> {
        with_connection!(self.pool, |conn| {
            diesel::delete(pricing_plans::table.find(id.as_uuid()))
                .returning(PricingPlanRow::as_returning())
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "pricing plan", id))?
                .into_plan()
        })
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        with_connection!(self.pool, |conn| {
            let total: i64 = pricing_plans::table
                .count()
                .get_result(conn)
                .await
                .map_err(|error| map_diesel_error(error, "pricing plan", &"count"))?;
            Ok(row_count(total))
        })
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &MentorId,
    ) -> Result<Vec<PricingPlan>, RepositoryError> {
        with_connection!(self.pool, |conn| {
            require_mentor(conn, mentor_id).await?;
            load_pricing_plans(conn, mentor_id).await
        })
    }
}
