//! Repository ports implemented over the shared in-memory tables.
//!
//! Every adapter locks the shared state for the duration of one call and
//! never holds the lock across an await point.

use async_trait::async_trait;

use crate::domain::ports::{
    CustomerRepository, MentorRepository, PersonRepository, PricingPlanRepository,
    ProfessionalExperienceRepository, RepositoryError, SkillRepository, UserRepository,
};
use crate::domain::{
    Customer, CustomerId, Email, ExternalId, Mentor, MentorCriteria, MentorId, Person, PersonId,
    PricingPlan, PricingPlanId, ProfessionalExperience, ProfessionalExperienceId, Skill, SkillId,
    SkillName, User, UserId,
};

use super::tables::{already_exists, count, not_found, CustomerRecord, MentorRecord};
use super::{lock, SharedState};

macro_rules! memory_repository {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Debug, Clone)]
        pub struct $name {
            state: SharedState,
        }

        impl $name {
            pub(super) fn new(state: SharedState) -> Self {
                Self { state }
            }
        }
    };
}

memory_repository!(
    /// In-memory [`UserRepository`].
    InMemoryUserRepository
);
memory_repository!(
    /// In-memory [`PersonRepository`].
    InMemoryPersonRepository
);
memory_repository!(
    /// In-memory [`CustomerRepository`].
    InMemoryCustomerRepository
);
memory_repository!(
    /// In-memory [`MentorRepository`].
    InMemoryMentorRepository
);
memory_repository!(
    /// In-memory [`SkillRepository`].
    InMemorySkillRepository
);
memory_repository!(
    /// In-memory [`PricingPlanRepository`].
    InMemoryPricingPlanRepository
);
memory_repository!(
    /// In-memory [`ProfessionalExperienceRepository`].
    InMemoryProfessionalExperienceRepository
);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        if tables.users.contains_key(&user.id()) {
            return Err(already_exists("user", &user.id()));
        }
        if tables.users.values().any(|other| other.email() == user.email()) {
            return Err(already_exists("user", user.email()));
        }
        if tables
            .users
            .values()
            .any(|other| other.external_id() == user.external_id())
        {
            return Err(already_exists("user", user.external_id()));
        }
        tables.users.insert(user.id(), user.clone().with_person(None));
        tables.user(&user.id())
    }

    async fn get(&self, id: &UserId) -> Result<User, RepositoryError> {
        lock(&self.state).tables.user(id)
    }

    async fn get_by_email(&self, email: &Email) -> Result<User, RepositoryError> {
        let state = lock(&self.state);
        let id = state
            .tables
            .users
            .values()
            .find(|user| user.email() == email)
            .map(User::id)
            .ok_or_else(|| not_found("user", email))?;
        state.tables.user(&id)
    }

    async fn get_by_external_id(&self, external_id: &ExternalId) -> Result<User, RepositoryError> {
        let state = lock(&self.state);
        let id = state
            .tables
            .users
            .values()
            .find(|user| user.external_id() == external_id)
            .map(User::id)
            .ok_or_else(|| not_found("user", external_id))?;
        state.tables.user(&id)
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_user(&user.id())?;
        let others = || tables.users.values().filter(|other| other.id() != user.id());
        if others().any(|other| other.email() == user.email()) {
            return Err(already_exists("user", user.email()));
        }
        if others().any(|other| other.external_id() == user.external_id()) {
            return Err(already_exists("user", user.external_id()));
        }
        tables.users.insert(user.id(), user.clone().with_person(None));
        tables.user(&user.id())
    }

    async fn delete(&self, id: &UserId) -> Result<User, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let user = tables.user(id)?;
        tables.remove_user(id);
        Ok(user)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.users.len()))
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn add(&self, person: &Person) -> Result<Person, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_user(&person.user_id)?;
        if tables.persons.contains_key(&person.id) {
            return Err(already_exists("person", &person.id));
        }
        if tables
            .persons
            .values()
            .any(|other| other.user_id == person.user_id)
        {
            return Err(already_exists("person", &person.user_id));
        }
        tables.persons.insert(person.id, person.clone());
        Ok(person.clone())
    }

    async fn get(&self, id: &PersonId) -> Result<Person, RepositoryError> {
        lock(&self.state)
            .tables
            .persons
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("person", id))
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Person, RepositoryError> {
        lock(&self.state)
            .tables
            .persons
            .values()
            .find(|person| person.user_id == *user_id)
            .cloned()
            .ok_or_else(|| not_found("person", user_id))
    }

    async fn update(&self, person: &Person) -> Result<Person, RepositoryError> {
        let mut state = lock(&self.state);
        let stored = state
            .tables
            .persons
            .get_mut(&person.id)
            .ok_or_else(|| not_found("person", &person.id))?;
        stored.details = person.details.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: &PersonId) -> Result<Person, RepositoryError> {
        lock(&self.state)
            .tables
            .persons
            .remove(id)
            .ok_or_else(|| not_found("person", id))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.persons.len()))
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn add(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let record = CustomerRecord::from(customer);
        tables.require_user(&record.user_id)?;
        for mentor_id in &record.bookmarks {
            tables.require_mentor(mentor_id)?;
        }
        if tables.customers.contains_key(&record.id) {
            return Err(already_exists("customer", &record.id));
        }
        if tables
            .customers
            .values()
            .any(|other| other.user_id == record.user_id)
        {
            return Err(already_exists("customer", &record.user_id));
        }
        let customer = tables.customer(&record)?;
        tables.customers.insert(record.id, record);
        Ok(customer)
    }

    async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        let state = lock(&self.state);
        let record = state
            .tables
            .customers
            .get(id)
            .ok_or_else(|| not_found("customer", id))?;
        state.tables.customer(record)
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Customer, RepositoryError> {
        let state = lock(&self.state);
        let record = state
            .tables
            .customers
            .values()
            .find(|customer| customer.user_id == *user_id)
            .ok_or_else(|| not_found("customer", user_id))?;
        state.tables.customer(record)
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let stored_user = tables
            .customers
            .get(&customer.id())
            .map(|stored| stored.user_id)
            .ok_or_else(|| not_found("customer", &customer.id()))?;
        for mentor_id in customer.bookmarked_mentors() {
            tables.require_mentor(mentor_id)?;
        }
        let record = CustomerRecord {
            user_id: stored_user,
            ..CustomerRecord::from(customer)
        };
        let updated = tables.customer(&record)?;
        tables.customers.insert(record.id, record);
        Ok(updated)
    }

    async fn delete(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let record = tables
            .customers
            .remove(id)
            .ok_or_else(|| not_found("customer", id))?;
        tables.customer(&record)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.customers.len()))
    }
}

#[async_trait]
impl MentorRepository for InMemoryMentorRepository {
    async fn add(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let record = MentorRecord::from(mentor);
        tables.require_user(&record.user_id)?;
        if tables.mentors.contains_key(&record.id) {
            return Err(already_exists("mentor", &record.id));
        }
        if tables
            .mentors
            .values()
            .any(|other| other.user_id == record.user_id)
        {
            return Err(already_exists("mentor", &record.user_id));
        }
        tables.mentors.insert(record.id, record.clone());
        tables.mentor(&record)
    }

    async fn get(&self, id: &MentorId) -> Result<Mentor, RepositoryError> {
        let state = lock(&self.state);
        let record = state
            .tables
            .mentors
            .get(id)
            .ok_or_else(|| not_found("mentor", id))?;
        state.tables.mentor(record)
    }

    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Mentor, RepositoryError> {
        let state = lock(&self.state);
        let record = state
            .tables
            .mentors
            .values()
            .find(|mentor| mentor.user_id == *user_id)
            .ok_or_else(|| not_found("mentor", user_id))?;
        state.tables.mentor(record)
    }

    async fn update(&self, mentor: &Mentor) -> Result<Mentor, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let stored = tables
            .mentors
            .get_mut(&mentor.id())
            .ok_or_else(|| not_found("mentor", &mentor.id()))?;
        stored.profile = mentor.profile().clone();
        let record = stored.clone();
        tables.mentor(&record)
    }

    async fn delete(&self, id: &MentorId) -> Result<Mentor, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let record = tables
            .mentors
            .get(id)
            .ok_or_else(|| not_found("mentor", id))?;
        let mentor = tables.mentor(record)?;
        tables.remove_mentor(id);
        Ok(mentor)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.mentors.len()))
    }

    async fn find_by_criteria(
        &self,
        criteria: &MentorCriteria,
    ) -> Result<Vec<Mentor>, RepositoryError> {
        let state = lock(&self.state);
        let mut found = Vec::new();
        for record in state.tables.mentors.values() {
            let mentor = state.tables.mentor(record)?;
            if criteria.matches(&mentor) {
                found.push(mentor);
            }
        }
        Ok(found)
    }
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn add(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        if tables.skills.contains_key(&skill.id) {
            return Err(already_exists("skill", &skill.id));
        }
        if tables.skills.values().any(|other| other.name == skill.name) {
            return Err(already_exists("skill", &skill.name));
        }
        tables.skills.insert(skill.id, skill.clone());
        Ok(skill.clone())
    }

    async fn get(&self, id: &SkillId) -> Result<Skill, RepositoryError> {
        lock(&self.state)
            .tables
            .skills
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("skill", id))
    }

    async fn get_by_name(&self, name: &SkillName) -> Result<Skill, RepositoryError> {
        lock(&self.state)
            .tables
            .skills
            .values()
            .find(|skill| skill.name == *name)
            .cloned()
            .ok_or_else(|| not_found("skill", name))
    }

    async fn update(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        if !tables.skills.contains_key(&skill.id) {
            return Err(not_found("skill", &skill.id));
        }
        if tables
            .skills
            .values()
            .any(|other| other.id != skill.id && other.name == skill.name)
        {
            return Err(already_exists("skill", &skill.name));
        }
        tables.skills.insert(skill.id, skill.clone());
        Ok(skill.clone())
    }

    async fn delete(&self, id: &SkillId) -> Result<Skill, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let skill = tables
            .skills
            .remove(id)
            .ok_or_else(|| not_found("skill", id))?;
        tables.mentor_skills.retain(|(_, skill_id)| skill_id != id);
        Ok(skill)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.skills.len()))
    }

    async fn upsert_many(&self, names: &[SkillName]) -> Result<Vec<Skill>, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        let mut skills = Vec::with_capacity(names.len());
        for name in names {
            let existing = tables.skills.values().find(|skill| skill.name == *name);
            let skill = match existing {
                Some(skill) => skill.clone(),
                None => {
                    let skill = Skill::new(name.clone());
                    tables.skills.insert(skill.id, skill.clone());
                    skill
                }
            };
            skills.push(skill);
        }
        Ok(skills)
    }

    async fn attach_to_mentor(
        &self,
        mentor_id: &MentorId,
        skill_ids: &[SkillId],
    ) -> Result<(), RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_mentor(mentor_id)?;
        if let Some(missing) = skill_ids
            .iter()
            .find(|skill_id| !tables.skills.contains_key(*skill_id))
        {
            return Err(not_found("skill", missing));
        }
        tables
            .mentor_skills
            .extend(skill_ids.iter().map(|skill_id| (*mentor_id, *skill_id)));
        Ok(())
    }

    async fn detach_all_from_mentor(&self, mentor_id: &MentorId) -> Result<(), RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_mentor(mentor_id)?;
        tables.mentor_skills.retain(|(mentor, _)| mentor != mentor_id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Skill>, RepositoryError> {
        let mut skills: Vec<Skill> = lock(&self.state).tables.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn list_by_mentor(&self, mentor_id: &MentorId) -> Result<Vec<Skill>, RepositoryError> {
        let state = lock(&self.state);
        state.tables.require_mentor(mentor_id)?;
        Ok(state.tables.mentor_skills_of(mentor_id))
    }
}

#[async_trait]
impl PricingPlanRepository for InMemoryPricingPlanRepository {
    async fn add(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_mentor(&plan.mentor_id())?;
        if tables.pricing_plans.contains_key(&plan.id()) {
            return Err(already_exists("pricing plan", &plan.id()));
        }
        tables.pricing_plans.insert(plan.id(), plan.clone());
        Ok(plan.clone())
    }

    async fn get(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError> {
        lock(&self.state)
            .tables
            .pricing_plans
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("pricing plan", id))
    }

    async fn update(&self, plan: &PricingPlan) -> Result<PricingPlan, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        if !tables.pricing_plans.contains_key(&plan.id()) {
            return Err(not_found("pricing plan", &plan.id()));
        }
        tables.require_mentor(&plan.mentor_id())?;
        tables.pricing_plans.insert(plan.id(), plan.clone());
        Ok(plan.clone())
    }

    async fn delete(&self, id: &PricingPlanId) -> Result<PricingPlan, RepositoryError> {
        lock(&self.state)
            .tables
            .pricing_plans
            .remove(id)
            .ok_or_else(|| not_found("pricing plan", id))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.pricing_plans.len()))
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &MentorId,
    ) -> Result<Vec<PricingPlan>, RepositoryError> {
        let state = lock(&self.state);
        state.tables.require_mentor(mentor_id)?;
        Ok(state.tables.plans_of(mentor_id))
    }
}

#[async_trait]
impl ProfessionalExperienceRepository for InMemoryProfessionalExperienceRepository {
    async fn add(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        tables.require_mentor(&experience.mentor_id)?;
        if tables.experiences.contains_key(&experience.id) {
            return Err(already_exists("professional experience", &experience.id));
        }
        tables.experiences.insert(experience.id, experience.clone());
        Ok(experience.clone())
    }

    async fn get(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        lock(&self.state)
            .tables
            .experiences
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("professional experience", id))
    }

    async fn update(
        &self,
        experience: &ProfessionalExperience,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        let mut state = lock(&self.state);
        let tables = &mut state.tables;
        if !tables.experiences.contains_key(&experience.id) {
            return Err(not_found("professional experience", &experience.id));
        }
        tables.require_mentor(&experience.mentor_id)?;
        tables.experiences.insert(experience.id, experience.clone());
        Ok(experience.clone())
    }

    async fn delete(
        &self,
        id: &ProfessionalExperienceId,
    ) -> Result<ProfessionalExperience, RepositoryError> {
        lock(&self.state)
            .tables
            .experiences
            .remove(id)
            .ok_or_else(|| not_found("professional experience", id))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(count(lock(&self.state).tables.experiences.len()))
    }

    async fn list_by_mentor(
        &self,
        mentor_id: &MentorId,
    ) -> Result<Vec<ProfessionalExperience>, RepositoryError> {
        let state = lock(&self.state);
        state.tables.require_mentor(mentor_id)?;
        Ok(state.tables.experiences_of(mentor_id))
    }
}
