//! Contact details: email addresses, phone numbers, and profile links.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::validation::{InvalidValue, bounded_length, cached_regex, matching, required_text};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static LINKEDIN_RE: OnceLock<Regex> = OnceLock::new();
static PLACE_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Maximum length of an email address (RFC 5321 path limit).
pub const EMAIL_MAX: usize = 254;

/// Lowercased, syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = required_text("email", raw.as_ref())?;
        let lowered = trimmed.to_lowercase();
        bounded_length("email", &lowered, 3, EMAIL_MAX)?;
        let pattern = cached_regex(
            &EMAIL_RE,
            r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
        );
        matching("email", &lowered, pattern)?;
        Ok(Self(lowered))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Numbering rules for one supported country.
#[derive(Debug)]
struct DialPlan {
    region: &'static str,
    dial_code: &'static str,
    min_digits: usize,
    max_digits: usize,
    trunk_prefix: Option<char>,
}

const DIAL_PLANS: &[DialPlan] = &[
    DialPlan { region: "FR", dial_code: "33", min_digits: 9, max_digits: 9, trunk_prefix: Some('0') },
    DialPlan { region: "BE", dial_code: "32", min_digits: 8, max_digits: 9, trunk_prefix: Some('0') },
    DialPlan { region: "CH", dial_code: "41", min_digits: 9, max_digits: 9, trunk_prefix: Some('0') },
    DialPlan { region: "GB", dial_code: "44", min_digits: 10, max_digits: 10, trunk_prefix: Some('0') },
    DialPlan { region: "DE", dial_code: "49", min_digits: 6, max_digits: 11, trunk_prefix: Some('0') },
    DialPlan { region: "ES", dial_code: "34", min_digits: 9, max_digits: 9, trunk_prefix: None },
    DialPlan { region: "NL", dial_code: "31", min_digits: 9, max_digits: 9, trunk_prefix: Some('0') },
    DialPlan { region: "PT", dial_code: "351", min_digits: 9, max_digits: 9, trunk_prefix: None },
    DialPlan { region: "LU", dial_code: "352", min_digits: 4, max_digits: 11, trunk_prefix: None },
    DialPlan { region: "US", dial_code: "1", min_digits: 10, max_digits: 10, trunk_prefix: None },
];

/// Region assumed for numbers written without an international prefix.
pub const DEFAULT_REGION: &str = "FR";

fn plan_for_region(region: &str) -> Option<&'static DialPlan> {
    DIAL_PLANS.iter().find(|plan| plan.region == region)
}

fn plan_for_digits(digits: &str) -> Option<&'static DialPlan> {
    DIAL_PLANS
        .iter()
        .filter(|plan| digits.starts_with(plan.dial_code))
        .max_by_key(|plan| plan.dial_code.len())
}

/// Phone number validated against the numbering plan of its country and
/// stored in E.164 form (`+33612345678`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct PhoneNumber {
    region: &'static str,
    e164: String,
}

impl PhoneNumber {
    /// Parse a number, reading national numbers in [`DEFAULT_REGION`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        Self::parse_in_region(raw, DEFAULT_REGION)
    }

    /// Parse a number, reading national numbers in `region`.
    ///
    /// International numbers may start with `+` or `00`. National numbers
    /// must carry the region's trunk prefix.
    pub fn parse_in_region(raw: impl AsRef<str>, region: &str) -> Result<Self, InvalidValue> {
        let trimmed = required_text("phone number", raw.as_ref())?;
        let compact: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')'))
            .collect();

        let (plan, national) = if let Some(rest) = compact.strip_prefix('+') {
            Self::split_international(rest)?
        } else if let Some(rest) = compact.strip_prefix("00") {
            Self::split_international(rest)?
        } else {
            let plan = plan_for_region(region).ok_or(InvalidValue::InvalidFormat {
                field: "phone number",
            })?;
            let trunk = plan.trunk_prefix.ok_or(InvalidValue::InvalidFormat {
                field: "phone number",
            })?;
            let national = compact.strip_prefix(trunk).ok_or(InvalidValue::InvalidFormat {
                field: "phone number",
            })?;
            (plan, national)
        };

        Self::check_national(plan, national)?;
        Ok(Self {
            region: plan.region,
            e164: format!("+{}{}", plan.dial_code, national),
        })
    }

    fn split_international(digits: &str) -> Result<(&'static DialPlan, &str), InvalidValue> {
        let plan = plan_for_digits(digits).ok_or(InvalidValue::InvalidFormat {
            field: "phone number",
        })?;
        let national = digits.get(plan.dial_code.len()..).unwrap_or_default();
        Ok((plan, national))
    }

    fn check_national(plan: &DialPlan, national: &str) -> Result<(), InvalidValue> {
        let invalid = InvalidValue::InvalidFormat {
            field: "phone number",
        };
        if !national.chars().all(|c| c.is_ascii_digit()) || national.starts_with('0') {
            return Err(invalid);
        }
        let length = national.len();
        if length < plan.min_digits || length > plan.max_digits {
            return Err(invalid);
        }
        Ok(())
    }

    /// ISO 3166 region code the number belongs to.
    pub fn region(&self) -> &'static str {
        self.region
    }

    /// E.164 representation.
    pub fn as_str(&self) -> &str {
        self.e164.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// The region borrows from the static dial plan table, so the derive would
// only produce `Deserialize<'static>`.
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Public LinkedIn profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkedinProfileUrl(String);

impl LinkedinProfileUrl {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = required_text("linkedin profile url", raw.as_ref())?;
        let pattern = cached_regex(
            &LINKEDIN_RE,
            r"^https?://(www\.|[a-z]{2}\.)?linkedin\.com/in/[A-Za-z0-9_%-]{3,100}/?$",
        );
        matching("linkedin profile url", trimmed, pattern)?;
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LinkedinProfileUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LinkedinProfileUrl> for String {
    fn from(value: LinkedinProfileUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for LinkedinProfileUrl {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque Google Places identifier locating a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GooglePlaceId(String);

impl GooglePlaceId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = required_text("google place id", raw.as_ref())?;
        // Place ids are URL-safe base64 tokens.
        let pattern = cached_regex(&PLACE_ID_RE, r"^[A-Za-z0-9_-]{10,255}$");
        matching("google place id", trimmed, pattern)?;
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GooglePlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GooglePlaceId> for String {
    fn from(value: GooglePlaceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for GooglePlaceId {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Jane.Doe@Example.COM", "jane.doe@example.com")]
    #[case("  ops+alerts@mail.example.org ", "ops+alerts@mail.example.org")]
    fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Email::new(raw).expect("valid email").as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("missing@tld")]
    #[case("two@@example.com")]
    fn email_rejects_malformed_input(#[case] raw: &str) {
        assert!(Email::new(raw).is_err());
    }

    #[rstest]
    #[case("+33699999999", "+33699999999", "FR")]
    #[case("0616234635", "+33616234635", "FR")]
    #[case("06 16 23 46 35", "+33616234635", "FR")]
    #[case("0033 6 16 23 46 35", "+33616234635", "FR")]
    #[case("+44 7911 123456", "+447911123456", "GB")]
    #[case("+351 912 345 678", "+351912345678", "PT")]
    fn phone_number_accepts_valid_numbers(
        #[case] raw: &str,
        #[case] e164: &str,
        #[case] region: &str,
    ) {
        let phone = PhoneNumber::new(raw).expect("valid phone number");
        assert_eq!(phone.as_str(), e164);
        assert_eq!(phone.region(), region);
    }

    #[rstest]
    #[case("99999000")]
    #[case("+3369999999")]
    #[case("+330699999999")]
    #[case("+999123456789")]
    #[case("06abc23465")]
    fn phone_number_rejects_invalid_numbers(#[case] raw: &str) {
        assert_eq!(
            PhoneNumber::new(raw),
            Err(InvalidValue::InvalidFormat {
                field: "phone number"
            })
        );
    }

    #[rstest]
    fn phone_number_reads_national_numbers_in_given_region() {
        let phone = PhoneNumber::parse_in_region("020 7946 0958", "GB").expect("valid GB number");
        assert_eq!(phone.as_str(), "+442079460958");
    }

    #[rstest]
    fn phone_number_deserialises_from_borrowed_json() {
        let json = String::from(r#""06 16 23 46 35""#);
        let phone: PhoneNumber = serde_json::from_str(&json).expect("valid phone number");
        assert_eq!(phone.as_str(), "+33616234635");
        assert_eq!(phone.region(), "FR");

        let rejected = serde_json::from_str::<PhoneNumber>(r#""99999000""#);
        assert!(rejected.is_err());
    }

    #[rstest]
    #[case("https://www.linkedin.com/in/jane-doe")]
    #[case("https://fr.linkedin.com/in/jane_doe-42/")]
    #[case("http://linkedin.com/in/abc")]
    fn linkedin_accepts_profile_urls(#[case] raw: &str) {
        assert!(LinkedinProfileUrl::new(raw).is_ok());
    }

    #[rstest]
    #[case("https://www.linkedin.com/company/acme")]
    #[case("https://linkedin.example.com/in/jane")]
    #[case("linkedin.com/in/jane")]
    fn linkedin_rejects_other_urls(#[case] raw: &str) {
        assert!(LinkedinProfileUrl::new(raw).is_err());
    }

    #[rstest]
    fn place_id_accepts_google_tokens() {
        assert!(GooglePlaceId::new("ChIJN1t_tDeuEmsRUsoyG83frY4").is_ok());
        assert!(GooglePlaceId::new("short").is_err());
    }
}
