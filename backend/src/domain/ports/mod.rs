//! Domain ports and supporting types for the hexagonal boundary.

use std::sync::Arc;

mod macros;
pub(crate) use macros::define_port_error;

mod customer_repository;
mod identity_provider;
mod mentor_repository;
mod person_repository;
mod pricing_plan_repository;
mod professional_experience_repository;
mod repository_error;
mod skill_repository;
mod unit_of_work;
mod user_repository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::CustomerRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use mentor_repository::MockMentorRepository;
pub use mentor_repository::MentorRepository;
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::PersonRepository;
#[cfg(test)]
pub use pricing_plan_repository::MockPricingPlanRepository;
pub use pricing_plan_repository::PricingPlanRepository;
#[cfg(test)]
pub use professional_experience_repository::MockProfessionalExperienceRepository;
pub use professional_experience_repository::ProfessionalExperienceRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::SkillRepository;
pub use unit_of_work::{TransactionState, UnitOfWork};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;

/// Every repository port the handlers depend on, bound to one store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub persons: Arc<dyn PersonRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub mentors: Arc<dyn MentorRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub pricing_plans: Arc<dyn PricingPlanRepository>,
    pub experiences: Arc<dyn ProfessionalExperienceRepository>,
}
