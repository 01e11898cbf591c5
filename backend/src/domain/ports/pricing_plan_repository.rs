//! Port abstraction for pricing plan persistence.
use async_trait::async_trait;

use crate::domain::{MentorId, PricingPlan, PricingPlanId};

use super::RepositoryError;

/// Storage for mentor pricing plans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingPlanRepository: Send + Sync {
    /// Insert a plan. Fails with `NotFound` when the mentor does not exist.
    async fn add(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError>;

    async fn get(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError>;

    async fn update(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError>;

    async fn delete(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;

    async fn list_by_mentor(&self, mentor_id: &MentorId)
    -> Result<Vec<PricingPlan>, RepositoryError>;
}
