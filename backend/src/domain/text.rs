//! Length-bounded free text used across profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{InvalidValue, bounded_length, define_bounded_text, required_text};

define_bounded_text! {
    /// First or last name of a person.
    pub struct PersonName("name", 3, 30);
}

define_bounded_text! {
    /// Public nickname shown instead of the full name.
    pub struct Nickname("nickname", 3, 30);
}

define_bounded_text! {
    /// Short title: job titles, company names, profile headlines, plan names.
    pub struct Title("title", 3, 100);
}

define_bounded_text! {
    /// Free-form profile description. May be empty.
    pub struct ProfileDescription("description", 0, 500);
}

/// Maximum length of an identity provider subject.
pub const EXTERNAL_ID_MAX: usize = 255;

/// Subject identifier issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = required_text("external id", raw.as_ref())?;
        bounded_length("external id", trimmed, 1, EXTERNAL_ID_MAX)?;
        if trimmed.chars().any(char::is_control) {
            return Err(InvalidValue::InvalidFormat {
                field: "external id",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExternalId> for String {
    fn from(value: ExternalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ExternalId {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Default for ProfileDescription {
    fn default() -> Self {
        Self(String::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Al", false)]
    #[case("Ada", true)]
    #[case("  Ada  ", true)]
    #[case("A name that is far too long to fit", false)]
    fn person_name_bounds(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(PersonName::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn description_may_be_empty_but_bounded() {
        assert_eq!(ProfileDescription::new("").expect("empty ok").as_str(), "");
        assert_eq!(
            ProfileDescription::new("x".repeat(501)),
            Err(InvalidValue::TooLong {
                field: "description",
                max: 500
            })
        );
    }

    #[rstest]
    fn external_id_rejects_control_characters() {
        assert!(ExternalId::new("auth0|abc123").is_ok());
        assert_eq!(
            ExternalId::new("auth0|\u{7}"),
            Err(InvalidValue::InvalidFormat {
                field: "external id"
            })
        );
        assert!(ExternalId::new("   ").is_err());
    }
}
