//! Process-local adapters for every repository port.
//!
//! All repositories created from one [`InMemoryDatabase`] share its tables,
//! and its [`InMemoryUnitOfWork`] snapshots those tables so a failed batch
//! leaves no trace. State is owned by the database value: two databases never
//! observe each other. The adapters suit single-task tests; concurrent units
//! of work on one database are not isolated from each other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::ports::Repositories;

mod repositories;
mod tables;
mod unit_of_work;

pub use repositories::{
    InMemoryCustomerRepository, InMemoryMentorRepository, InMemoryPersonRepository,
    InMemoryPricingPlanRepository, InMemoryProfessionalExperienceRepository,
    InMemorySkillRepository, InMemoryUserRepository,
};
pub use unit_of_work::InMemoryUnitOfWork;

use tables::Tables;

#[derive(Debug, Default)]
struct State {
    tables: Tables,
    snapshot: Option<Tables>,
}

type SharedState = Arc<Mutex<State>>;

fn lock(state: &SharedState) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared in-memory store backing every in-memory adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    state: SharedState,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository ports bound to this database.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(InMemoryUserRepository::new(self.state.clone())),
            persons: Arc::new(InMemoryPersonRepository::new(self.state.clone())),
            customers: Arc::new(InMemoryCustomerRepository::new(self.state.clone())),
            mentors: Arc::new(InMemoryMentorRepository::new(self.state.clone())),
            skills: Arc::new(InMemorySkillRepository::new(self.state.clone())),
            pricing_plans: Arc::new(InMemoryPricingPlanRepository::new(self.state.clone())),
            experiences: Arc::new(InMemoryProfessionalExperienceRepository::new(
                self.state.clone(),
            )),
        }
    }

    /// Unit of work over this database's tables.
    pub fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork::new(self.state.clone())
    }
}
