//! Handlers for mentor profiles, mentor search, and the skill catalogue.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::commands::{CreateMentorProfile, MentorProfileInput, UpdateMentorProfile};
use crate::domain::ports::Repositories;
use crate::domain::queries::{GetMentor, GetMentorByUserId, ListSkills, SearchMentors};
use crate::domain::skill::parse_skill_names;
use crate::domain::validation::{InvalidValue, optional};
use crate::domain::{
    Availability, Error, Language, Mentor, MentorCriteria, MentorId, MentorProfile,
    ProfileDescription, Skill, SkillName, Title, TrainingType, User, UserId,
};

use super::{Handler, creation_failed, found};

/// Handlers owning the mentor aggregate.
#[derive(Clone)]
pub struct MentorHandlers {
    repositories: Repositories,
}

fn parse_set<T>(raw: &[String]) -> Result<BTreeSet<T>, InvalidValue>
where
    T: std::str::FromStr<Err = InvalidValue> + Ord,
{
    raw.iter().map(|value| value.parse()).collect()
}

fn parse_profile(input: MentorProfileInput) -> Result<(MentorProfile, Vec<SkillName>), InvalidValue> {
    let profile = MentorProfile {
        description: ProfileDescription::new(&input.description)?,
        availability: input.availability.parse::<Availability>()?,
        languages: parse_set::<Language>(&input.languages)?,
        training_types: parse_set::<TrainingType>(&input.training_types)?,
        settings: input.settings.unwrap_or_default(),
        current_job_title: optional(input.current_job_title, Title::new)?,
        profile_title: optional(input.profile_title, Title::new)?,
    };
    let skills = parse_skill_names(&input.skills)?;
    Ok((profile, skills))
}

impl MentorHandlers {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// Upsert `names` into the catalogue and associate them with the mentor.
    async fn attach_skills(&self, mentor_id: MentorId, names: &[SkillName]) -> Result<(), Error> {
        if names.is_empty() {
            return Ok(());
        }
        let skills = self.repositories.skills.upsert_many(names).await?;
        let ids: Vec<_> = skills.iter().map(|skill| skill.id).collect();
        self.repositories
            .skills
            .attach_to_mentor(&mentor_id, &ids)
            .await?;
        Ok(())
    }

    /// A user may hold a mentor profile only when typed as a mentor and
    /// holding no customer profile.
    async fn ensure_may_mentor(&self, user_id: &UserId) -> Result<User, Error> {
        let user = self.repositories.users.get(user_id).await?;
        if !user.is_mentor() {
            return Err(
                Error::invalid_argument("only mentor users can hold a mentor profile")
                    .with_details(json!({
                        "userId": user_id.to_string(),
                        "userType": user.user_type().as_str(),
                    })),
            );
        }
        let customer = found(self.repositories.customers.get_by_user_id(user_id).await)?;
        if customer.is_some() {
            return Err(
                Error::already_exists("user already holds a customer profile")
                    .with_details(json!({ "userId": user_id.to_string() })),
            );
        }
        Ok(user)
    }
}

#[async_trait]
impl Handler<CreateMentorProfile> for MentorHandlers {
    type Output = Mentor;

    async fn handle(&self, command: CreateMentorProfile) -> Result<Mentor, Error> {
        let user_id = UserId::new(&command.user_id)?;
        let mentor_id = command
            .mentor_id
            .map(MentorId::new)
            .transpose()?
            .unwrap_or_else(MentorId::random);
        let (profile, skill_names) = parse_profile(command.profile)?;

        let user = self.ensure_may_mentor(&user_id).await?;
        let created = self
            .repositories
            .mentors
            .add(&Mentor::new(mentor_id, user, profile))
            .await?;

        self.attach_skills(created.id(), &skill_names)
            .await
            .map_err(|cause| creation_failed("mentor profile creation", &cause))?;

        Ok(self.repositories.mentors.get(&created.id()).await?)
    }
}

#[async_trait]
impl Handler<UpdateMentorProfile> for MentorHandlers {
    type Output = Mentor;

    async fn handle(&self, command: UpdateMentorProfile) -> Result<Mentor, Error> {
        let mentor_id = MentorId::new(&command.mentor_id)?;
        let (profile, skill_names) = parse_profile(command.profile)?;

        let mentor = self.repositories.mentors.get(&mentor_id).await?;
        self.repositories
            .mentors
            .update(&mentor.with_profile(profile))
            .await?;
        self.repositories
            .skills
            .detach_all_from_mentor(&mentor_id)
            .await?;
        self.attach_skills(mentor_id, &skill_names).await?;

        Ok(self.repositories.mentors.get(&mentor_id).await?)
    }
}

#[async_trait]
impl Handler<GetMentor> for MentorHandlers {
    type Output = Mentor;

    async fn handle(&self, query: GetMentor) -> Result<Mentor, Error> {
        let mentor_id = MentorId::new(&query.mentor_id)?;
        Ok(self.repositories.mentors.get(&mentor_id).await?)
    }
}

#[async_trait]
impl Handler<GetMentorByUserId> for MentorHandlers {
    type Output = Mentor;

    async fn handle(&self, query: GetMentorByUserId) -> Result<Mentor, Error> {
        let user_id = UserId::new(&query.user_id)?;
        Ok(self.repositories.mentors.get_by_user_id(&user_id).await?)
    }
}

#[async_trait]
impl Handler<SearchMentors> for MentorHandlers {
    type Output = Vec<Mentor>;

    async fn handle(&self, query: SearchMentors) -> Result<Vec<Mentor>, Error> {
        let criteria = MentorCriteria {
            skill: optional(query.skill, SkillName::new)?,
            language: optional(query.language, |raw| raw.parse())?,
            availability: optional(query.availability, |raw| raw.parse())?,
            training_type: optional(query.training_type, |raw| raw.parse())?,
            visible_only: !query.include_hidden,
        };
        Ok(self
            .repositories
            .mentors
            .find_by_criteria(&criteria)
            .await?)
    }
}

#[async_trait]
impl Handler<ListSkills> for MentorHandlers {
    type Output = Vec<Skill>;

    async fn handle(&self, _query: ListSkills) -> Result<Vec<Skill>, Error> {
        Ok(self.repositories.skills.list().await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::handlers::test_support::MockPorts;
    use crate::domain::ports::RepositoryError;
    use crate::domain::{Customer, CustomerType, Email, ErrorCode, ExternalId, UserType};
    use rstest::{fixture, rstest};

    fn user(user_type: UserType) -> User {
        User::register(
            Email::new("someone@example.com").expect("email"),
            user_type,
            ExternalId::new("auth0|someone").expect("external id"),
        )
    }

    #[fixture]
    fn profile_input() -> MentorProfileInput {
        MentorProfileInput {
            description: "Seasoned backend engineer".to_owned(),
            availability: "available".to_owned(),
            languages: vec!["french".to_owned(), "english".to_owned()],
            training_types: vec!["long_term".to_owned()],
            skills: vec!["Rust".to_owned(), "PostgreSQL".to_owned()],
            settings: None,
            current_job_title: Some("Staff Engineer".to_owned()),
            profile_title: None,
        }
    }

    fn create(user_id: UserId, profile: MentorProfileInput) -> CreateMentorProfile {
        CreateMentorProfile {
            user_id: user_id.to_string(),
            mentor_id: None,
            profile,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_customer_typed_users(profile_input: MentorProfileInput) {
        let customer = user(UserType::Customer);
        let user_id = customer.id();
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(customer));
        let handlers = MentorHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(create(user_id, profile_input))
            .await
            .expect_err("customer users cannot mentor");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_users_holding_a_customer_profile(profile_input: MentorProfileInput) {
        let mentor_user = user(UserType::Mentor);
        let user_id = mentor_user.id();
        let stored_customer = Customer::create(
            mentor_user.clone(),
            CustomerType::Individual,
            ProfileDescription::default(),
        );
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(mentor_user));
        ports
            .customers
            .expect_get_by_user_id()
            .times(1)
            .return_once(move |_| Ok(stored_customer));
        let handlers = MentorHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(create(user_id, profile_input))
            .await
            .expect_err("profile kinds are exclusive");

        assert_eq!(error.code(), ErrorCode::AlreadyExists);
    }

    #[rstest]
    #[tokio::test]
    async fn skill_failures_after_insert_become_creation_failed(profile_input: MentorProfileInput) {
        let mentor_user = user(UserType::Mentor);
        let user_id = mentor_user.id();
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(mentor_user));
        ports
            .customers
            .expect_get_by_user_id()
            .times(1)
            .return_once(|id| Err(RepositoryError::not_found("customer", id.to_string())));
        ports
            .mentors
            .expect_add()
            .times(1)
            .returning(|mentor| Ok(mentor.clone()));
        ports
            .skills
            .expect_upsert_many()
            .times(1)
            .return_once(|_| Err(RepositoryError::connection("pool exhausted")));
        let handlers = MentorHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(create(user_id, profile_input))
            .await
            .expect_err("skills failed");

        assert_eq!(error.code(), ErrorCode::CreationFailed);
        assert_eq!(
            error.cause(),
            Some("repository connection failed: pool exhausted")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_unknown_languages(mut profile_input: MentorProfileInput) {
        profile_input.languages.push("klingon".to_owned());
        let handlers = MentorHandlers::new(MockPorts::default().into_repositories());

        let error = handlers
            .handle(create(UserId::random(), profile_input))
            .await
            .expect_err("unknown language");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
    }

    #[rstest]
    #[tokio::test]
    async fn search_hides_invisible_profiles_by_default() {
        let mut ports = MockPorts::default();
        ports
            .mentors
            .expect_find_by_criteria()
            .withf(|criteria| criteria.visible_only && criteria.language == Some(Language::German))
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let handlers = MentorHandlers::new(ports.into_repositories());

        let found = handlers
            .handle(SearchMentors {
                language: Some("german".to_owned()),
                ..SearchMentors::default()
            })
            .await
            .expect("search succeeds");

        assert!(found.is_empty());
    }
}
