//! Domain primitives, aggregates, and the command pipeline.
//!
//! Purpose: Define strongly typed value objects and aggregates for mentor and
//! customer profiles, the ports adapters implement, and the handlers,
//! dispatcher, and transaction delegator that mutate them.
//!
//! Public surface:
//! - Value objects (`Email`, `PhoneNumber`, `Money`, `Period`, ids, enums).
//! - Aggregates (`User`, `Person`, `Mentor`, `Customer`) and their children.
//! - `Error` / `ErrorCode`: transport agnostic failure payload.
//! - `TransactionDelegator`: atomic command execution and query answering.

mod macros;
pub mod validation;

pub mod commands;
mod contact;
mod customer;
pub mod dispatcher;
mod enums;
pub mod error;
mod experience;
pub mod handlers;
mod ids;
mod mentor;
mod money;
mod period;
mod person;
pub mod ports;
mod pricing_plan;
pub mod queries;
mod skill;
mod text;
pub mod transaction;
mod user;

pub use self::contact::{DEFAULT_REGION, Email, GooglePlaceId, LinkedinProfileUrl, PhoneNumber};
pub use self::customer::Customer;
pub use self::dispatcher::ProfileDispatcher;
pub use self::enums::{Availability, CustomerType, Language, PricingType, TrainingType, UserType};
pub use self::error::{Error, ErrorCode};
pub use self::experience::ProfessionalExperience;
pub use self::ids::{
    CustomerId, MentorId, PersonId, PricingPlanId, ProfessionalExperienceId, SkillId, UserId,
};
pub use self::mentor::{Mentor, MentorCriteria, MentorProfile, MentorSettings};
pub use self::money::{Currency, Money};
pub use self::period::Period;
pub use self::person::{Person, PersonDetails};
pub use self::pricing_plan::PricingPlan;
pub use self::skill::{Skill, SkillName, parse_skill_names};
pub use self::text::{ExternalId, Nickname, PersonName, ProfileDescription, Title};
pub use self::transaction::TransactionDelegator;
pub use self::user::User;
pub use self::validation::InvalidValue;
