//! Commands accepted by the transactional pipeline.
//!
//! Commands carry raw input exactly as the boundary received it. Handlers
//! validate every field into value objects before touching storage.

use chrono::{DateTime, Utc};

use super::{Customer, Mentor, MentorSettings, Person, PricingPlan, ProfessionalExperience, User};

/// Register a new user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    /// Client-chosen identifier so later commands in the same batch can
    /// reference the user. A fresh one is generated when absent.
    pub user_id: Option<String>,
    pub email: String,
    pub user_type: String,
    pub external_id: String,
}

/// Create or replace the personal details of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePersonalDetails {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub google_place_id: Option<String>,
}

/// Editable mentor profile fields shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorProfileInput {
    pub description: String,
    pub availability: String,
    pub languages: Vec<String>,
    pub training_types: Vec<String>,
    pub skills: Vec<String>,
    /// Defaults apply when absent.
    pub settings: Option<MentorSettings>,
    pub current_job_title: Option<String>,
    pub profile_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMentorProfile {
    pub user_id: String,
    pub mentor_id: Option<String>,
    pub profile: MentorProfileInput,
}

/// Replace the profile fields and skill set of a mentor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMentorProfile {
    pub mentor_id: String,
    pub profile: MentorProfileInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerProfile {
    pub user_id: String,
    pub customer_id: Option<String>,
    pub customer_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCustomerProfile {
    pub customer_id: String,
    pub customer_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkMentor {
    pub customer_id: String,
    pub mentor_id: String,
}

/// Remove a bookmark. Removing an absent bookmark succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveBookmark {
    pub customer_id: String,
    pub mentor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProfessionalExperience {
    pub mentor_id: String,
    pub job_title: String,
    pub company: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveProfessionalExperience {
    pub experience_id: String,
}

/// Pricing plan fields shared by add and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPlanInput {
    pub title: String,
    pub training_type: String,
    pub pricing_type: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPricingPlan {
    pub mentor_id: String,
    pub plan: PricingPlanInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePricingPlan {
    pub plan_id: String,
    pub plan: PricingPlanInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePricingPlan {
    pub plan_id: String,
}

macro_rules! command_enum {
    ($($variant:ident),+ $(,)?) => {
        /// Every command the dispatcher can route.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Command {
            $($variant($variant),)+
        }

        impl Command {
            /// Command name used in logs.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }
        }

        $(
            impl From<$variant> for Command {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

command_enum!(
    RegisterUser,
    UpdatePersonalDetails,
    CreateMentorProfile,
    UpdateMentorProfile,
    CreateCustomerProfile,
    UpdateCustomerProfile,
    BookmarkMentor,
    RemoveBookmark,
    AddProfessionalExperience,
    RemoveProfessionalExperience,
    AddPricingPlan,
    UpdatePricingPlan,
    RemovePricingPlan,
);

/// Ordered commands executed in a single unit of work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch(Vec<Command>);

impl CommandBatch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.0
    }
}

impl From<Command> for CommandBatch {
    fn from(value: Command) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<Command>> for CommandBatch {
    fn from(value: Vec<Command>) -> Self {
        Self(value)
    }
}

impl FromIterator<Command> for CommandBatch {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of one successfully handled command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    UserRegistered(User),
    PersonalDetailsSaved(Person),
    MentorProfileCreated(Mentor),
    MentorProfileUpdated(Mentor),
    CustomerProfileCreated(Customer),
    CustomerProfileUpdated(Customer),
    MentorBookmarked(Customer),
    BookmarkRemoved(Customer),
    ProfessionalExperienceAdded(ProfessionalExperience),
    ProfessionalExperienceRemoved(ProfessionalExperience),
    PricingPlanAdded(PricingPlan),
    PricingPlanUpdated(PricingPlan),
    PricingPlanRemoved(PricingPlan),
}
