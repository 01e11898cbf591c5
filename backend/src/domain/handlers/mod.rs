//! Command and query handlers.
//!
//! Each handler validates raw input into value objects, calls repository
//! ports, and returns domain values. Handlers are the only place where
//! [`RepositoryError`] and [`InvalidValue`] become the domain [`Error`].

use async_trait::async_trait;
use serde_json::json;

use super::Error;
use super::ports::RepositoryError;
use super::validation::InvalidValue;

mod customers;
mod mentors;
mod offerings;
mod users;

pub use customers::CustomerHandlers;
pub use mentors::MentorHandlers;
pub use offerings::OfferingHandlers;
pub use users::UserHandlers;

/// Handles one message type.
#[async_trait]
pub trait Handler<M>: Send + Sync
where
    M: Send + 'static,
{
    type Output: Send;

    async fn handle(&self, message: M) -> Result<Self::Output, Error>;
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity, key } => {
                Self::not_found(format!("{entity} not found"))
                    .with_details(json!({ "entity": entity, "key": key }))
            }
            RepositoryError::AlreadyExists { entity, key } => {
                Self::already_exists(format!("{entity} already exists"))
                    .with_details(json!({ "entity": entity, "key": key }))
            }
            infrastructure @ (RepositoryError::Connection { .. } | RepositoryError::Query { .. }) => {
                Self::internal("repository operation failed")
                    .with_details(json!({
                        "kind": infrastructure.kind(),
                        "cause": infrastructure.to_string(),
                    }))
            }
        }
    }
}

impl From<InvalidValue> for Error {
    fn from(error: InvalidValue) -> Self {
        Self::invalid_argument(error.to_string()).with_details(json!({ "field": error.field() }))
    }
}

/// Wrap a failure that left a multi-step write incomplete.
///
/// `cause` is the deepest recorded adapter text, falling back to the inner
/// message. The inner error's own details are nested under `inner`.
pub(crate) fn creation_failed(what: &str, cause: &Error) -> Error {
    Error::creation_failed(format!("{what} could not be completed")).with_details(json!({
        "cause": cause.cause().unwrap_or(cause.message()),
        "causeCode": cause.code(),
        "causeMessage": cause.message(),
        "inner": cause.details(),
    }))
}

/// `Ok(None)` when the lookup reported `NotFound`.
pub(crate) fn found<T>(result: Result<T, RepositoryError>) -> Result<Option<T>, RepositoryError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RepositoryError::NotFound { .. }) => Ok(None),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Mock repository bundles for handler tests.
    use std::sync::Arc;

    use crate::domain::ports::{
        MockCustomerRepository, MockMentorRepository, MockPersonRepository,
        MockPricingPlanRepository, MockProfessionalExperienceRepository, MockSkillRepository,
        MockUserRepository, Repositories,
    };

    /// One mock per port. Unconfigured mocks panic when called.
    #[derive(Default)]
    pub struct MockPorts {
        pub users: MockUserRepository,
        pub persons: MockPersonRepository,
        pub customers: MockCustomerRepository,
        pub mentors: MockMentorRepository,
        pub skills: MockSkillRepository,
        pub pricing_plans: MockPricingPlanRepository,
        pub experiences: MockProfessionalExperienceRepository,
    }

    impl MockPorts {
        pub fn into_repositories(self) -> Repositories {
            Repositories {
                users: Arc::new(self.users),
                persons: Arc::new(self.persons),
                customers: Arc::new(self.customers),
                mentors: Arc::new(self.mentors),
                skills: Arc::new(self.skills),
                pricing_plans: Arc::new(self.pricing_plans),
                experiences: Arc::new(self.experiences),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::not_found("mentor", "42"), ErrorCode::NotFound)]
    #[case(RepositoryError::already_exists("user", "a@b.io"), ErrorCode::AlreadyExists)]
    #[case(RepositoryError::connection("pool exhausted"), ErrorCode::Internal)]
    #[case(RepositoryError::query("syntax error"), ErrorCode::Internal)]
    fn repository_errors_map_onto_domain_codes(
        #[case] error: RepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn infrastructure_errors_keep_their_cause() {
        let error = Error::from(RepositoryError::query("deadlock detected"));
        let cause = error
            .details()
            .and_then(|details| details.get("cause"))
            .and_then(|cause| cause.as_str());
        assert_eq!(cause, Some("repository query failed: deadlock detected"));
        let kind = error
            .details()
            .and_then(|details| details.get("kind"))
            .and_then(|kind| kind.as_str());
        assert_eq!(kind, Some("query"));
    }

    #[rstest]
    fn invalid_values_become_invalid_argument_with_field() {
        let error = Error::from(InvalidValue::InvalidFormat {
            field: "phone number",
        });
        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "phone number" }))
        );
    }

    #[rstest]
    fn creation_failures_keep_the_adapter_cause() {
        let inner = Error::from(RepositoryError::connection("pool exhausted"));
        let error = creation_failed("mentor profile creation", &inner);

        assert_eq!(error.code(), ErrorCode::CreationFailed);
        assert_eq!(
            error.cause(),
            Some("repository connection failed: pool exhausted")
        );
        assert_eq!(
            error.details(),
            Some(&json!({
                "cause": "repository connection failed: pool exhausted",
                "causeCode": "internal",
                "causeMessage": "repository operation failed",
                "inner": {
                    "kind": "connection",
                    "cause": "repository connection failed: pool exhausted",
                },
            }))
        );
    }

    #[rstest]
    fn creation_failures_fall_back_to_the_inner_message() {
        let inner = Error::not_found("skill not found");
        let error = creation_failed("mentor profile creation", &inner);

        assert_eq!(error.cause(), Some("skill not found"));
        assert_eq!(
            error.details().and_then(|details| details.get("inner")),
            Some(&serde_json::Value::Null)
        );
    }

    #[rstest]
    fn found_distinguishes_absence_from_failure() {
        assert_eq!(found(Ok::<_, RepositoryError>(1)), Ok(Some(1)));
        assert_eq!(
            found::<u8>(Err(RepositoryError::not_found("user", "x"))),
            Ok(None)
        );
        assert!(found::<u8>(Err(RepositoryError::connection("down"))).is_err());
    }
}
