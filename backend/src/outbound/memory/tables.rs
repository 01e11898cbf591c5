//! Row storage and relational rules for the in-memory adapters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Customer, CustomerId, CustomerType, Mentor, MentorId, MentorProfile, Person, PersonId,
    PricingPlan, PricingPlanId, ProfessionalExperience, ProfessionalExperienceId,
    ProfileDescription, Skill, SkillId, User, UserId,
};

/// Customer row: the owning user is stored by reference.
#[derive(Debug, Clone)]
pub(super) struct CustomerRecord {
    pub id: CustomerId,
    pub user_id: UserId,
    pub customer_type: CustomerType,
    pub description: ProfileDescription,
    pub bookmarks: Vec<MentorId>,
}

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id(),
            user_id: customer.user().id(),
            customer_type: customer.customer_type(),
            description: customer.description().clone(),
            bookmarks: customer.bookmarked_mentors().to_vec(),
        }
    }
}

/// Mentor row: children live in their own tables.
#[derive(Debug, Clone)]
pub(super) struct MentorRecord {
    pub id: MentorId,
    pub user_id: UserId,
    pub profile: MentorProfile,
}

impl From<&Mentor> for MentorRecord {
    fn from(mentor: &Mentor) -> Self {
        Self {
            id: mentor.id(),
            user_id: mentor.user().id(),
            profile: mentor.profile().clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    pub users: BTreeMap<UserId, User>,
    pub persons: BTreeMap<PersonId, Person>,
    pub customers: BTreeMap<CustomerId, CustomerRecord>,
    pub mentors: BTreeMap<MentorId, MentorRecord>,
    pub skills: BTreeMap<SkillId, Skill>,
    pub mentor_skills: BTreeSet<(MentorId, SkillId)>,
    pub experiences: BTreeMap<ProfessionalExperienceId, ProfessionalExperience>,
    pub pricing_plans: BTreeMap<PricingPlanId, PricingPlan>,
}

pub(super) fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

pub(super) fn not_found(entity: &str, key: &dyn Display) -> RepositoryError {
    RepositoryError::not_found(entity, key.to_string())
}

pub(super) fn already_exists(entity: &str, key: &dyn Display) -> RepositoryError {
    RepositoryError::already_exists(entity, key.to_string())
}

impl Tables {
    /// Stored user with personal details attached.
    pub fn user(&self, id: &UserId) -> Result<User, RepositoryError> {
        let user = self.users.get(id).ok_or_else(|| not_found("user", id))?;
        let person = self
            .persons
            .values()
            .find(|person| person.user_id == *id)
            .cloned();
        Ok(user.clone().with_person(person))
    }

    pub fn require_user(&self, id: &UserId) -> Result<(), RepositoryError> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(not_found("user", id))
        }
    }

    pub fn require_mentor(&self, id: &MentorId) -> Result<(), RepositoryError> {
        if self.mentors.contains_key(id) {
            Ok(())
        } else {
            Err(not_found("mentor", id))
        }
    }

    pub fn customer(&self, record: &CustomerRecord) -> Result<Customer, RepositoryError> {
        let user = self.user(&record.user_id)?;
        Ok(
            Customer::new(record.id, user, record.customer_type, record.description.clone())
                .with_bookmarks(record.bookmarks.iter().copied()),
        )
    }

    pub fn mentor(&self, record: &MentorRecord) -> Result<Mentor, RepositoryError> {
        let user = self.user(&record.user_id)?;
        Ok(Mentor::new(record.id, user, record.profile.clone()).with_children(
            self.mentor_skills_of(&record.id),
            self.experiences_of(&record.id),
            self.plans_of(&record.id),
        ))
    }

    pub fn mentor_skills_of(&self, mentor_id: &MentorId) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .mentor_skills
            .iter()
            .filter(|(mentor, _)| mentor == mentor_id)
            .filter_map(|(_, skill_id)| self.skills.get(skill_id).cloned())
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        skills
    }

    pub fn experiences_of(&self, mentor_id: &MentorId) -> Vec<ProfessionalExperience> {
        let mut experiences: Vec<ProfessionalExperience> = self
            .experiences
            .values()
            .filter(|experience| experience.mentor_id == *mentor_id)
            .cloned()
            .collect();
        experiences.sort_by(|a, b| b.period.start().cmp(&a.period.start()));
        experiences
    }

    pub fn plans_of(&self, mentor_id: &MentorId) -> Vec<PricingPlan> {
        let mut plans: Vec<PricingPlan> = self
            .pricing_plans
            .values()
            .filter(|plan| plan.mentor_id() == *mentor_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.title().as_str().cmp(b.title().as_str()));
        plans
    }

    /// Delete a mentor row and everything that references it.
    pub fn remove_mentor(&mut self, id: &MentorId) -> Option<MentorRecord> {
        let record = self.mentors.remove(id)?;
        self.mentor_skills.retain(|(mentor, _)| mentor != id);
        self.experiences
            .retain(|_, experience| experience.mentor_id != *id);
        self.pricing_plans.retain(|_, plan| plan.mentor_id() != *id);
        for customer in self.customers.values_mut() {
            customer.bookmarks.retain(|mentor| mentor != id);
        }
        Some(record)
    }

    /// Delete a user row and every profile it owns.
    pub fn remove_user(&mut self, id: &UserId) -> Option<User> {
        let user = self.users.remove(id)?;
        self.persons.retain(|_, person| person.user_id != *id);
        self.customers.retain(|_, customer| customer.user_id != *id);
        let owned: Vec<MentorId> = self
            .mentors
            .values()
            .filter(|mentor| mentor.user_id == *id)
            .map(|mentor| mentor.id)
            .collect();
        for mentor_id in owned {
            self.remove_mentor(&mentor_id);
        }
        Some(user)
    }
}
