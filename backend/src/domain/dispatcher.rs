//! Routes commands and queries to their handlers.
//!
//! Routing is an exhaustive `match` over the closed [`Command`] and [`Query`]
//! enums, so every message has a handler at compile time.

use tracing::debug;

use super::commands::{Command, CommandOutcome};
use super::handlers::{CustomerHandlers, Handler, MentorHandlers, OfferingHandlers, UserHandlers};
use super::ports::Repositories;
use super::queries::{Query, QueryOutcome};
use super::Error;

/// Dispatcher over every profile handler, bound to one set of repositories.
#[derive(Clone)]
pub struct ProfileDispatcher {
    users: UserHandlers,
    mentors: MentorHandlers,
    customers: CustomerHandlers,
    offerings: OfferingHandlers,
}

impl ProfileDispatcher {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            users: UserHandlers::new(repositories.clone()),
            mentors: MentorHandlers::new(repositories.clone()),
            customers: CustomerHandlers::new(repositories.clone()),
            offerings: OfferingHandlers::new(repositories),
        }
    }

    /// Handle one command.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutcome, Error> {
        debug!(command = command.name(), "dispatching command");
        match command {
            Command::RegisterUser(command) => self
                .users
                .handle(command)
                .await
                .map(CommandOutcome::UserRegistered),
            Command::UpdatePersonalDetails(command) => self
                .users
                .handle(command)
                .await
                .map(CommandOutcome::PersonalDetailsSaved),
            Command::CreateMentorProfile(command) => self
                .mentors
                .handle(command)
                .await
                .map(CommandOutcome::MentorProfileCreated),
            Command::UpdateMentorProfile(command) => self
                .mentors
                .handle(command)
                .await
                .map(CommandOutcome::MentorProfileUpdated),
            Command::CreateCustomerProfile(command) => self
                .customers
                .handle(command)
                .await
                .map(CommandOutcome::CustomerProfileCreated),
            Command::UpdateCustomerProfile(command) => self
                .customers
                .handle(command)
                .await
                .map(CommandOutcome::CustomerProfileUpdated),
            Command::BookmarkMentor(command) => self
                .customers
                .handle(command)
                .await
                .map(CommandOutcome::MentorBookmarked),
            Command::RemoveBookmark(command) => self
                .customers
                .handle(command)
                .await
                .map(CommandOutcome::BookmarkRemoved),
            Command::AddProfessionalExperience(command) => self
                .offerings
                .handle(command)
                .await
                .map(CommandOutcome::ProfessionalExperienceAdded),
            Command::RemoveProfessionalExperience(command) => self
                .offerings
                .handle(command)
                .await
                .map(CommandOutcome::ProfessionalExperienceRemoved),
            Command::AddPricingPlan(command) => self
                .offerings
                .handle(command)
                .await
                .map(CommandOutcome::PricingPlanAdded),
            Command::UpdatePricingPlan(command) => self
                .offerings
                .handle(command)
                .await
                .map(CommandOutcome::PricingPlanUpdated),
            Command::RemovePricingPlan(command) => self
                .offerings
                .handle(command)
                .await
                .map(CommandOutcome::PricingPlanRemoved),
        }
    }

    /// Answer one query.
    pub async fn ask(&self, query: Query) -> Result<QueryOutcome, Error> {
        debug!(query = query.name(), "answering query");
        match query {
            Query::GetUser(query) => self.users.handle(query).await.map(QueryOutcome::User),
            Query::GetUserByExternalId(query) => {
                self.users.handle(query).await.map(QueryOutcome::User)
            }
            Query::GetMentor(query) => self.mentors.handle(query).await.map(QueryOutcome::Mentor),
            Query::GetMentorByUserId(query) => {
                self.mentors.handle(query).await.map(QueryOutcome::Mentor)
            }
            Query::GetCustomer(query) => self
                .customers
                .handle(query)
                .await
                .map(QueryOutcome::Customer),
            Query::GetCustomerByUserId(query) => self
                .customers
                .handle(query)
                .await
                .map(QueryOutcome::Customer),
            Query::SearchMentors(query) => self
                .mentors
                .handle(query)
                .await
                .map(QueryOutcome::Mentors),
            Query::ListSkills(query) => self.mentors.handle(query).await.map(QueryOutcome::Skills),
        }
    }
}
