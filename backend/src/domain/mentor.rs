//! Mentor profiles and search criteria.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    Availability, Language, MentorId, PricingPlan, ProfessionalExperience, ProfileDescription,
    Skill, SkillName, Title, TrainingType, User,
};

/// Visibility toggles a mentor controls on their public profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent visibility toggle"
)]
pub struct MentorSettings {
    pub is_visible: bool,
    pub show_email: bool,
    pub show_phone_number: bool,
    pub show_linkedin_profile: bool,
    pub show_location: bool,
    pub show_pricing_plans: bool,
    pub show_professional_experiences: bool,
}

impl Default for MentorSettings {
    fn default() -> Self {
        Self {
            is_visible: true,
            show_email: false,
            show_phone_number: false,
            show_linkedin_profile: true,
            show_location: true,
            show_pricing_plans: true,
            show_professional_experiences: true,
        }
    }
}

/// Editable part of a mentor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub description: ProfileDescription,
    pub availability: Availability,
    pub languages: BTreeSet<Language>,
    pub training_types: BTreeSet<TrainingType>,
    pub settings: MentorSettings,
    pub current_job_title: Option<Title>,
    pub profile_title: Option<Title>,
}

/// Mentor aggregate with its owning user always resolved.
///
/// Skills, experiences, and pricing plans are hydrated by the repository on
/// read and written through their own ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    id: MentorId,
    user: User,
    profile: MentorProfile,
    skills: Vec<Skill>,
    experiences: Vec<ProfessionalExperience>,
    pricing_plans: Vec<PricingPlan>,
}

impl Mentor {
    /// Rebuild a mentor with a known identifier and no children.
    pub fn new(id: MentorId, user: User, profile: MentorProfile) -> Self {
        Self {
            id,
            user,
            profile,
            skills: Vec::new(),
            experiences: Vec::new(),
            pricing_plans: Vec::new(),
        }
    }

    /// New profile with a fresh identifier.
    pub fn create(user: User, profile: MentorProfile) -> Self {
        Self::new(MentorId::random(), user, profile)
    }

    pub fn id(&self) -> MentorId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn profile(&self) -> &MentorProfile {
        &self.profile
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn experiences(&self) -> &[ProfessionalExperience] {
        &self.experiences
    }

    pub fn pricing_plans(&self) -> &[PricingPlan] {
        &self.pricing_plans
    }

    pub fn has_skill(&self, name: &SkillName) -> bool {
        self.skills.iter().any(|skill| &skill.name == name)
    }

    /// Same mentor with a replaced owning user.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }

    /// Same mentor with replaced profile fields; children are kept.
    pub fn with_profile(mut self, profile: MentorProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Same mentor with hydrated children.
    pub fn with_children(
        mut self,
        skills: Vec<Skill>,
        experiences: Vec<ProfessionalExperience>,
        pricing_plans: Vec<PricingPlan>,
    ) -> Self {
        self.skills = skills;
        self.experiences = experiences;
        self.pricing_plans = pricing_plans;
        self
    }
}

/// Filters for mentor search. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorCriteria {
    pub skill: Option<SkillName>,
    pub language: Option<Language>,
    pub availability: Option<Availability>,
    pub training_type: Option<TrainingType>,
    /// Restrict results to mentors whose profile is visible.
    pub visible_only: bool,
}

impl MentorCriteria {
    /// Whether a hydrated mentor satisfies every filter.
    pub fn matches(&self, mentor: &Mentor) -> bool {
        let profile = mentor.profile();
        if self.visible_only && !profile.settings.is_visible {
            return false;
        }
        if self
            .skill
            .as_ref()
            .is_some_and(|skill| !mentor.has_skill(skill))
        {
            return false;
        }
        if self
            .language
            .is_some_and(|language| !profile.languages.contains(&language))
        {
            return false;
        }
        if self
            .availability
            .is_some_and(|availability| profile.availability != availability)
        {
            return false;
        }
        !self
            .training_type
            .is_some_and(|training| !profile.training_types.contains(&training))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Email, ExternalId, UserType};
    use rstest::{fixture, rstest};

    #[fixture]
    fn mentor() -> Mentor {
        let user = User::register(
            Email::new("mentor@example.com").expect("email"),
            UserType::Mentor,
            ExternalId::new("auth0|mentor").expect("external id"),
        );
        let profile = MentorProfile {
            description: ProfileDescription::new("Backend engineer").expect("description"),
            availability: Availability::Limited,
            languages: BTreeSet::from([Language::French, Language::English]),
            training_types: BTreeSet::from([TrainingType::LongTerm]),
            settings: MentorSettings::default(),
            current_job_title: None,
            profile_title: None,
        };
        let rust = Skill::new(SkillName::new("rust").expect("skill"));
        Mentor::create(user, profile).with_children(vec![rust], Vec::new(), Vec::new())
    }

    #[rstest]
    fn empty_criteria_match_everything(mentor: Mentor) {
        assert!(MentorCriteria::default().matches(&mentor));
    }

    #[rstest]
    #[case(MentorCriteria { language: Some(Language::French), ..MentorCriteria::default() }, true)]
    #[case(MentorCriteria { language: Some(Language::German), ..MentorCriteria::default() }, false)]
    #[case(MentorCriteria { availability: Some(Availability::Available), ..MentorCriteria::default() }, false)]
    #[case(MentorCriteria { training_type: Some(TrainingType::LongTerm), ..MentorCriteria::default() }, true)]
    fn criteria_filter_on_profile_fields(
        mentor: Mentor,
        #[case] criteria: MentorCriteria,
        #[case] expected: bool,
    ) {
        assert_eq!(criteria.matches(&mentor), expected);
    }

    #[rstest]
    fn skill_filter_uses_hydrated_skills(mentor: Mentor) {
        let criteria = MentorCriteria {
            skill: Some(SkillName::new("Rust").expect("skill")),
            ..MentorCriteria::default()
        };
        assert!(criteria.matches(&mentor));
    }

    #[rstest]
    fn hidden_mentors_are_excluded_when_requested(mentor: Mentor) {
        let mut profile = mentor.profile().clone();
        profile.settings.is_visible = false;
        let hidden = mentor.with_profile(profile);
        let criteria = MentorCriteria {
            visible_only: true,
            ..MentorCriteria::default()
        };
        assert!(!criteria.matches(&hidden));
    }
}
