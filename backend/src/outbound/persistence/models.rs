//! Internal Diesel row structs and their conversions to domain values.
//!
//! Rows are implementation details of the persistence layer and never leave
//! it. Reading a row re-validates every column through the domain
//! constructors; a value that no longer validates surfaces as a query error.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Customer, CustomerId, Email, ExternalId, GooglePlaceId, InvalidValue, LinkedinProfileUrl, Mentor,
    MentorId, MentorProfile, MentorSettings, Money, Nickname, Period, Person, PersonDetails,
    PersonId, PersonName, PhoneNumber, PricingPlan, PricingPlanId, ProfessionalExperience,
    ProfessionalExperienceId, ProfileDescription, Skill, SkillId, SkillName, Title, User, UserId,
};

use super::error_mapping::corrupt_row;
use super::schema::{
    customer_bookmarks, customers, mentor_skills, mentors, persons, pricing_plans,
    professional_experiences, skills, users,
};

fn stored<T>(entity: &str, value: Result<T, InvalidValue>) -> Result<T, RepositoryError> {
    value.map_err(|error| corrupt_row(entity, error))
}

fn stored_optional<T>(
    entity: &str,
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, InvalidValue>,
) -> Result<Option<T>, RepositoryError> {
    value.map(parse).transpose().map_err(|error| corrupt_row(entity, error))
}

fn stored_set<T: FromStr<Err = InvalidValue> + Ord>(
    entity: &str,
    values: &[String],
) -> Result<BTreeSet<T>, RepositoryError> {
    values
        .iter()
        .map(|value| value.parse())
        .collect::<Result<_, _>>()
        .map_err(|error| corrupt_row(entity, error))
}

fn strings<T: ToString>(values: &BTreeSet<T>) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub user_type: String,
    pub external_id: String,
}

impl UserRow {
    /// Domain user without personal details.
    pub fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User::new(
            UserId::from_uuid(self.id),
            stored("user", Email::new(&self.email))?,
            stored("user", self.user_type.parse())?,
            stored("user", ExternalId::new(&self.external_id))?,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub user_type: &'a str,
    pub external_id: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_str(),
            user_type: user.user_type().as_str(),
            external_id: user.external_id().as_str(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub external_id: &'a str,
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: user.email().as_str(),
            external_id: user.external_id().as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PersonRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub google_place_id: Option<String>,
}

impl From<&Person> for PersonRow {
    fn from(person: &Person) -> Self {
        let details = &person.details;
        Self {
            id: *person.id.as_uuid(),
            user_id: *person.user_id.as_uuid(),
            first_name: details.first_name.as_ref().map(ToString::to_string),
            last_name: details.last_name.as_ref().map(ToString::to_string),
            nickname: details.nickname.as_ref().map(ToString::to_string),
            phone_number: details.phone_number.as_ref().map(ToString::to_string),
            linkedin_profile_url: details.linkedin_profile_url.as_ref().map(ToString::to_string),
            google_place_id: details.google_place_id.as_ref().map(ToString::to_string),
        }
    }
}

impl PersonRow {
    pub fn into_person(self) -> Result<Person, RepositoryError> {
        let details = PersonDetails {
            first_name: stored_optional("person", self.first_name, PersonName::new)?,
            last_name: stored_optional("person", self.last_name, PersonName::new)?,
            nickname: stored_optional("person", self.nickname, Nickname::new)?,
            phone_number: stored_optional("person", self.phone_number, PhoneNumber::new)?,
            linkedin_profile_url: stored_optional(
                "person",
                self.linkedin_profile_url,
                LinkedinProfileUrl::new,
            )?,
            google_place_id: stored_optional(
                "person",
                self.google_place_id,
                GooglePlaceId::new,
            )?,
        };
        Ok(Person {
            id: PersonId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            details,
        })
    }
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_type: String,
    pub description: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: *customer.id().as_uuid(),
            user_id: *customer.user().id().as_uuid(),
            customer_type: customer.customer_type().as_str().to_owned(),
            description: customer.description().as_str().to_owned(),
        }
    }
}

impl CustomerRow {
    /// Rebuild the aggregate from its row, owner, and bookmarked mentors.
    pub fn into_customer(
        self,
        user: User,
        bookmarks: Vec<Uuid>,
    ) -> Result<Customer, RepositoryError> {
        Ok(Customer::new(
            CustomerId::from_uuid(self.id),
            user,
            stored("customer", self.customer_type.parse())?,
            stored("customer", ProfileDescription::new(&self.description))?,
        )
        .with_bookmarks(bookmarks.into_iter().map(MentorId::from_uuid)))
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
pub(crate) struct CustomerUpdate<'a> {
    pub customer_type: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a Customer> for CustomerUpdate<'a> {
    fn from(customer: &'a Customer) -> Self {
        Self {
            customer_type: customer.customer_type().as_str(),
            description: customer.description().as_str(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customer_bookmarks)]
pub(crate) struct NewBookmarkRow {
    pub customer_id: Uuid,
    pub mentor_id: Uuid,
}

impl NewBookmarkRow {
    pub fn new(customer_id: CustomerId, mentor_id: MentorId) -> Self {
        Self {
            customer_id: *customer_id.as_uuid(),
            mentor_id: *mentor_id.as_uuid(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mentors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = mentors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "visibility settings are stored as one column each"
)]
pub(crate) struct MentorRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub availability: String,
    pub languages: Vec<String>,
    pub training_types: Vec<String>,
    pub is_visible: bool,
    pub show_email: bool,
    pub show_phone_number: bool,
    pub show_linkedin_profile: bool,
    pub show_location: bool,
    pub show_pricing_plans: bool,
    pub show_professional_experiences: bool,
    pub current_job_title: Option<String>,
    pub profile_title: Option<String>,
}

impl From<&Mentor> for MentorRow {
    fn from(mentor: &Mentor) -> Self {
        let profile = mentor.profile();
        let settings = &profile.settings;
        Self {
            id: *mentor.id().as_uuid(),
            user_id: *mentor.user().id().as_uuid(),
            description: profile.description.as_str().to_owned(),
            availability: profile.availability.as_str().to_owned(),
            languages: strings(&profile.languages),
            training_types: strings(&profile.training_types),
            is_visible: settings.is_visible,
            show_email: settings.show_email,
            show_phone_number: settings.show_phone_number,
            show_linkedin_profile: settings.show_linkedin_profile,
            show_location: settings.show_location,
            show_pricing_plans: settings.show_pricing_plans,
            show_professional_experiences: settings.show_professional_experiences,
            current_job_title: profile.current_job_title.as_ref().map(ToString::to_string),
            profile_title: profile.profile_title.as_ref().map(ToString::to_string),
        }
    }
}

impl MentorRow {
    pub fn profile(&self) -> Result<MentorProfile, RepositoryError> {
        Ok(MentorProfile {
            description: stored("mentor", ProfileDescription::new(&self.description))?,
            availability: stored("mentor", self.availability.parse())?,
            languages: stored_set("mentor", &self.languages)?,
            training_types: stored_set("mentor", &self.training_types)?,
            settings: MentorSettings {
                is_visible: self.is_visible,
                show_email: self.show_email,
                show_phone_number: self.show_phone_number,
                show_linkedin_profile: self.show_linkedin_profile,
                show_location: self.show_location,
                show_pricing_plans: self.show_pricing_plans,
                show_professional_experiences: self.show_professional_experiences,
            },
            current_job_title: stored_optional(
                "mentor",
                self.current_job_title.clone(),
                Title::new,
            )?,
            profile_title: stored_optional("mentor", self.profile_title.clone(), Title::new)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkillRow {
    pub id: Uuid,
    pub name: String,
}

impl From<&Skill> for SkillRow {
    fn from(skill: &Skill) -> Self {
        Self {
            id: *skill.id.as_uuid(),
            name: skill.name.as_str().to_owned(),
        }
    }
}

impl SkillRow {
    pub fn into_skill(self) -> Result<Skill, RepositoryError> {
        Ok(Skill {
            id: SkillId::from_uuid(self.id),
            name: stored("skill", SkillName::new(&self.name))?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mentor_skills)]
pub(crate) struct MentorSkillRow {
    pub mentor_id: Uuid,
    pub skill_id: Uuid,
}

// ---------------------------------------------------------------------------
// Professional experiences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = professional_experiences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ExperienceRow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<&ProfessionalExperience> for ExperienceRow {
    fn from(experience: &ProfessionalExperience) -> Self {
        Self {
            id: *experience.id.as_uuid(),
            mentor_id: *experience.mentor_id.as_uuid(),
            job_title: experience.job_title.as_str().to_owned(),
            company: experience.company.as_str().to_owned(),
            start_date: experience.period.start(),
            end_date: experience.period.end(),
        }
    }
}

impl ExperienceRow {
    pub fn into_experience(self) -> Result<ProfessionalExperience, RepositoryError> {
        let entity = "professional experience";
        Ok(ProfessionalExperience {
            id: ProfessionalExperienceId::from_uuid(self.id),
            mentor_id: MentorId::from_uuid(self.mentor_id),
            job_title: stored(entity, Title::new(&self.job_title))?,
            company: stored(entity, Title::new(&self.company))?,
            period: stored(entity, Period::new(self.start_date, self.end_date))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Pricing plans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = pricing_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PricingPlanRow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub title: String,
    pub training_type: String,
    pub pricing_type: String,
    pub amount_minor: i64,
    pub currency: String,
}

impl From<&PricingPlan> for PricingPlanRow {
    fn from(plan: &PricingPlan) -> Self {
        Self {
            id: *plan.id().as_uuid(),
            mentor_id: *plan.mentor_id().as_uuid(),
            title: plan.title().as_str().to_owned(),
            training_type: plan.training_type().as_str().to_owned(),
            pricing_type: plan.pricing_type().as_str().to_owned(),
            amount_minor: plan.price().amount_minor(),
            currency: plan.price().currency().code().to_owned(),
        }
    }
}

impl PricingPlanRow {
    pub fn into_plan(self) -> Result<PricingPlan, RepositoryError> {
        let entity = "pricing plan";
        stored(
            entity,
            PricingPlan::from_parts(
                PricingPlanId::from_uuid(self.id),
                MentorId::from_uuid(self.mentor_id),
                stored(entity, Title::new(&self.title))?,
                stored(entity, self.training_type.parse())?,
                stored(entity, self.pricing_type.parse())?,
                stored(entity, Money::new(self.amount_minor, &self.currency))?,
            ),
        )
    }
}
