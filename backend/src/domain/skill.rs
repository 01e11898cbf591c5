//! Catalogue skills shared between mentors.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::SkillId;
use super::validation::{InvalidValue, bounded_length, cached_regex, matching, required_text};

static SKILL_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Maximum skill name length in characters.
pub const SKILL_NAME_MAX: usize = 50;

/// Normalised skill name: trimmed, lowercased, letters, spaces and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillName(String);

impl SkillName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let trimmed = required_text("skill", raw.as_ref())?;
        let lowered = trimmed.to_lowercase();
        bounded_length("skill", &lowered, 1, SKILL_NAME_MAX)?;
        let pattern = cached_regex(&SKILL_NAME_RE, r"^\p{Ll}[\p{Ll} -]*$");
        matching("skill", &lowered, pattern)?;
        Ok(Self(lowered))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SkillName> for String {
    fn from(value: SkillName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SkillName {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Skill in the global catalogue. Names are unique across the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: SkillName,
}

impl Skill {
    /// New catalogue entry with a fresh identifier.
    pub fn new(name: SkillName) -> Self {
        Self {
            id: SkillId::random(),
            name,
        }
    }
}

/// Parse and deduplicate raw skill names, keeping first-seen order.
pub fn parse_skill_names<S: AsRef<str>>(raw: &[S]) -> Result<Vec<SkillName>, InvalidValue> {
    let mut names: Vec<SkillName> = Vec::with_capacity(raw.len());
    for value in raw {
        let name = SkillName::new(value)?;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Rust ", "rust")]
    #[case("Machine Learning", "machine learning")]
    #[case("Front-End", "front-end")]
    #[case("Écriture", "écriture")]
    fn names_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(SkillName::new(raw).expect("valid skill").as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("c++")]
    #[case("-leading")]
    #[case("web3")]
    fn invalid_names_are_rejected(#[case] raw: &str) {
        assert!(SkillName::new(raw).is_err());
    }

    #[rstest]
    fn parse_skill_names_deduplicates_after_normalising() {
        let names = parse_skill_names(&["Rust", "rust ", "Go"]).expect("valid names");
        let names: Vec<_> = names.iter().map(SkillName::as_str).collect();
        assert_eq!(names, ["rust", "go"]);
    }
}
