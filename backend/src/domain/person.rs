//! Personal details attached one-to-one to a user.

use serde::{Deserialize, Serialize};

use super::{GooglePlaceId, LinkedinProfileUrl, Nickname, PersonId, PersonName, PhoneNumber, UserId};

/// Optional personal fields. Each present value has already been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub nickname: Option<Nickname>,
    pub phone_number: Option<PhoneNumber>,
    pub linkedin_profile_url: Option<LinkedinProfileUrl>,
    pub google_place_id: Option<GooglePlaceId>,
}

/// Personal details record owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub user_id: UserId,
    pub details: PersonDetails,
}

impl Person {
    pub fn new(user_id: UserId, details: PersonDetails) -> Self {
        Self {
            id: PersonId::random(),
            user_id,
            details,
        }
    }

    /// Same record with replaced details.
    pub fn with_details(self, details: PersonDetails) -> Self {
        Self { details, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn details_deserialise_with_validated_phone_number() {
        let payload = json!({
            "firstName": "Jane",
            "phoneNumber": "06 16 23 46 35",
        })
        .to_string();
        let details: PersonDetails = serde_json::from_str(&payload).expect("valid details");
        assert_eq!(
            details.phone_number.map(String::from),
            Some("+33616234635".to_owned())
        );
        assert_eq!(details.first_name.map(String::from), Some("Jane".to_owned()));
        assert!(details.nickname.is_none());
    }
}
