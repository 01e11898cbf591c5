//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types and hold no business rules.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Ambient transactions**: [`DieselUnitOfWork`] shares one connection
//!   with every repository call made while its work runs.
//!
//! # Example
//!
//! ```ignore
//! use profiles::outbound::persistence::{DbPool, DieselDatabase, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/profiles")).await?;
//! let database = DieselDatabase::new(pool);
//! let delegator = TransactionDelegator::new(
//!     database.unit_of_work(),
//!     ProfileDispatcher::new(database.repositories()),
//!     identity_provider,
//! );
//! ```

use std::sync::Arc;

use crate::domain::ports::Repositories;

pub(crate) mod ambient;
mod diesel_customer_repository;
mod diesel_mentor_repository;
mod diesel_person_repository;
mod diesel_pricing_plan_repository;
mod diesel_professional_experience_repository;
mod diesel_skill_repository;
mod diesel_unit_of_work;
mod diesel_user_repository;
pub(crate) mod error_mapping;
mod hydration;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_mentor_repository::DieselMentorRepository;
pub use diesel_person_repository::DieselPersonRepository;
pub use diesel_pricing_plan_repository::DieselPricingPlanRepository;
pub use diesel_professional_experience_repository::DieselProfessionalExperienceRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use diesel_unit_of_work::DieselUnitOfWork;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Every Diesel adapter bound to one pool.
#[derive(Debug, Clone)]
pub struct DieselDatabase {
    pool: DbPool,
}

impl DieselDatabase {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(DieselUserRepository::new(self.pool.clone())),
            persons: Arc::new(DieselPersonRepository::new(self.pool.clone())),
            customers: Arc::new(DieselCustomerRepository::new(self.pool.clone())),
            mentors: Arc::new(DieselMentorRepository::new(self.pool.clone())),
            skills: Arc::new(DieselSkillRepository::new(self.pool.clone())),
            pricing_plans: Arc::new(DieselPricingPlanRepository::new(self.pool.clone())),
            experiences: Arc::new(DieselProfessionalExperienceRepository::new(
                self.pool.clone(),
            )),
        }
    }

    pub fn unit_of_work(&self) -> DieselUnitOfWork {
        DieselUnitOfWork::new(self.pool.clone())
    }
}
