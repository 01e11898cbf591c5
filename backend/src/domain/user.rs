//! Registered users and their optional personal details.

use serde::{Deserialize, Serialize};

use super::{Email, ExternalId, Person, UserId, UserType};

/// Account registered with the identity provider.
///
/// The user type is fixed at registration; there is no way to change it on
/// an existing value.
///
/// # Examples
/// ```
/// use profiles::domain::{Email, ExternalId, User, UserType};
///
/// let user = User::register(
///     Email::new("ada@example.com").expect("valid email"),
///     UserType::Mentor,
///     ExternalId::new("auth0|ada").expect("valid subject"),
/// );
/// assert!(user.is_mentor());
/// assert!(user.person().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: Email,
    user_type: UserType,
    external_id: ExternalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    person: Option<Person>,
}

impl User {
    /// Rebuild a user with a known identifier.
    pub fn new(id: UserId, email: Email, user_type: UserType, external_id: ExternalId) -> Self {
        Self {
            id,
            email,
            user_type,
            external_id,
            person: None,
        }
    }

    /// New user with a fresh identifier.
    pub fn register(email: Email, user_type: UserType, external_id: ExternalId) -> Self {
        Self::new(UserId::random(), email, user_type, external_id)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn person(&self) -> Option<&Person> {
        self.person.as_ref()
    }

    pub fn is_mentor(&self) -> bool {
        self.user_type == UserType::Mentor
    }

    pub fn is_customer(&self) -> bool {
        self.user_type == UserType::Customer
    }

    /// Attach hydrated personal details.
    pub fn with_person(mut self, person: Option<Person>) -> Self {
        self.person = person;
        self
    }

    /// Replace the mutable account fields.
    pub fn with_account(mut self, email: Email, external_id: ExternalId) -> Self {
        self.email = email;
        self.external_id = external_id;
        self
    }
}
