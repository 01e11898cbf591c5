//! Handlers for user registration, personal details, and user lookups.

use async_trait::async_trait;

use crate::domain::commands::{RegisterUser, UpdatePersonalDetails};
use crate::domain::ports::Repositories;
use crate::domain::queries::{GetUser, GetUserByExternalId};
use crate::domain::validation::optional;
use crate::domain::{
    Email, Error, ExternalId, GooglePlaceId, LinkedinProfileUrl, Nickname, Person, PersonDetails,
    PersonName, PhoneNumber, User, UserId, UserType,
};

use super::{Handler, found};

/// Handlers owning the user aggregate and its personal details.
#[derive(Clone)]
pub struct UserHandlers {
    repositories: Repositories,
}

impl UserHandlers {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

fn parse_details(command: UpdatePersonalDetails) -> Result<PersonDetails, Error> {
    Ok(PersonDetails {
        first_name: optional(command.first_name, PersonName::new)?,
        last_name: optional(command.last_name, PersonName::new)?,
        nickname: optional(command.nickname, Nickname::new)?,
        phone_number: optional(command.phone_number, PhoneNumber::new)?,
        linkedin_profile_url: optional(command.linkedin_profile_url, LinkedinProfileUrl::new)?,
        google_place_id: optional(command.google_place_id, GooglePlaceId::new)?,
    })
}

#[async_trait]
impl Handler<RegisterUser> for UserHandlers {
    type Output = User;

    async fn handle(&self, command: RegisterUser) -> Result<User, Error> {
        let id = command
            .user_id
            .map(UserId::new)
            .transpose()?
            .unwrap_or_else(UserId::random);
        let email = Email::new(&command.email)?;
        let user_type: UserType = command.user_type.parse()?;
        let external_id = ExternalId::new(&command.external_id)?;

        let user = User::new(id, email, user_type, external_id);
        Ok(self.repositories.users.add(&user).await?)
    }
}

#[async_trait]
impl Handler<UpdatePersonalDetails> for UserHandlers {
    type Output = Person;

    async fn handle(&self, command: UpdatePersonalDetails) -> Result<Person, Error> {
        let user_id = UserId::new(&command.user_id)?;
        let details = parse_details(command)?;

        self.repositories.users.get(&user_id).await?;
        let existing = found(self.repositories.persons.get_by_user_id(&user_id).await)?;
        let saved = match existing {
            Some(person) => {
                self.repositories
                    .persons
                    .update(&person.with_details(details))
                    .await?
            }
            None => {
                self.repositories
                    .persons
                    .add(&Person::new(user_id, details))
                    .await?
            }
        };
        Ok(saved)
    }
}

#[async_trait]
impl Handler<GetUser> for UserHandlers {
    type Output = User;

    async fn handle(&self, query: GetUser) -> Result<User, Error> {
        let user_id = UserId::new(&query.user_id)?;
        Ok(self.repositories.users.get(&user_id).await?)
    }
}

#[async_trait]
impl Handler<GetUserByExternalId> for UserHandlers {
    type Output = User;

    async fn handle(&self, query: GetUserByExternalId) -> Result<User, Error> {
        let external_id = ExternalId::new(&query.external_id)?;
        Ok(self
            .repositories
            .users
            .get_by_external_id(&external_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::handlers::test_support::MockPorts;
    use crate::domain::ports::RepositoryError;
    use rstest::rstest;

    fn register(email: &str, user_type: &str) -> RegisterUser {
        RegisterUser {
            user_id: None,
            email: email.to_owned(),
            user_type: user_type.to_owned(),
            external_id: "auth0|someone".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_user_persists_normalised_user() {
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_add()
            .times(1)
            .returning(|user| Ok(user.clone()));
        let handlers = UserHandlers::new(ports.into_repositories());

        let user = handlers
            .handle(register("Ada@Example.com", "mentor"))
            .await
            .expect("registration succeeds");

        assert_eq!(user.email().as_str(), "ada@example.com");
        assert_eq!(user.user_type(), UserType::Mentor);
    }

    #[rstest]
    #[case("ada@example.com", "admin", "user type")]
    #[case("not-an-email", "mentor", "email")]
    #[tokio::test]
    async fn register_user_rejects_invalid_input_before_storage(
        #[case] email: &str,
        #[case] user_type: &str,
        #[case] field: &str,
    ) {
        let handlers = UserHandlers::new(MockPorts::default().into_repositories());

        let error = handlers
            .handle(register(email, user_type))
            .await
            .expect_err("validation fails");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        assert_eq!(
            error.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
            Some(field)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn register_user_surfaces_duplicates_as_already_exists() {
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_add()
            .times(1)
            .return_once(|_| Err(RepositoryError::already_exists("user", "ada@example.com")));
        let handlers = UserHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(register("ada@example.com", "customer"))
            .await
            .expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::AlreadyExists);
    }

    #[rstest]
    #[tokio::test]
    async fn personal_details_are_created_when_absent() {
        let user = User::register(
            Email::new("ada@example.com").expect("email"),
            UserType::Customer,
            ExternalId::new("auth0|ada").expect("external id"),
        );
        let user_id = user.id();
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(user));
        ports
            .persons
            .expect_get_by_user_id()
            .times(1)
            .return_once(|id| Err(RepositoryError::not_found("person", id.to_string())));
        ports
            .persons
            .expect_add()
            .times(1)
            .returning(|person| Ok(person.clone()));
        let handlers = UserHandlers::new(ports.into_repositories());

        let person = handlers
            .handle(UpdatePersonalDetails {
                user_id: user_id.to_string(),
                first_name: Some("Ada".to_owned()),
                phone_number: Some("0616234635".to_owned()),
                ..UpdatePersonalDetails::default()
            })
            .await
            .expect("details saved");

        assert_eq!(person.user_id, user_id);
        assert_eq!(
            person.details.phone_number.map(String::from),
            Some("+33616234635".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn personal_details_reject_invalid_phone_numbers() {
        let handlers = UserHandlers::new(MockPorts::default().into_repositories());

        let error = handlers
            .handle(UpdatePersonalDetails {
                user_id: UserId::random().to_string(),
                phone_number: Some("99999000".to_owned()),
                ..UpdatePersonalDetails::default()
            })
            .await
            .expect_err("invalid phone");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
    }
}
