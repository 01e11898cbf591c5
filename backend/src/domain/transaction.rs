//! Executes commands atomically and answers queries.

use std::sync::Arc;

use futures_util::FutureExt;
use tracing::{error, info, instrument, warn};

use super::commands::{Command, CommandBatch, CommandOutcome};
use super::dispatcher::ProfileDispatcher;
use super::ports::{IdentityProvider, TransactionState, UnitOfWork};
use super::queries::{Query, QueryOutcome};
use super::{Error, ExternalId, UserType};

/// Entry point of the command pipeline.
///
/// Every [`execute`](Self::execute) call runs its commands left to right in
/// one unit of work. The first failure rolls back every effect of the batch
/// and is returned unchanged. Calls made while a unit of work is active join
/// it instead of opening a new one.
pub struct TransactionDelegator<U> {
    unit_of_work: U,
    dispatcher: ProfileDispatcher,
    identity_provider: Arc<dyn IdentityProvider>,
}

impl<U: UnitOfWork> TransactionDelegator<U> {
    pub fn new(
        unit_of_work: U,
        dispatcher: ProfileDispatcher,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            unit_of_work,
            dispatcher,
            identity_provider,
        }
    }

    /// Unit of work state observed from the calling task.
    pub fn state(&self) -> TransactionState {
        self.unit_of_work.state()
    }

    /// Execute one command or an ordered batch atomically.
    #[instrument(skip_all)]
    pub async fn execute(
        &self,
        batch: impl Into<CommandBatch>,
    ) -> Result<Vec<CommandOutcome>, Error> {
        let commands = batch.into().into_commands();
        if commands.is_empty() {
            return Ok(Vec::new());
        }
        let count = commands.len();
        let outermost = self.state() == TransactionState::Idle;
        let dispatcher = &self.dispatcher;

        let work = async move {
            let mut outcomes = Vec::with_capacity(commands.len());
            for command in commands {
                outcomes.push(dispatcher.dispatch(command).await?);
            }
            Ok::<_, Error>(outcomes)
        }
        .boxed();

        let outcomes = match self.unit_of_work.run(work).await {
            Ok(outcomes) => outcomes,
            Err(failure) => {
                if outermost {
                    warn!(
                        commands = count,
                        code = failure.code().as_str(),
                        reason = failure.message(),
                        "unit of work rolled back"
                    );
                }
                return Err(failure);
            }
        };

        if outermost {
            info!(commands = count, "unit of work committed");
            self.assign_roles(&outcomes).await;
        }
        Ok(outcomes)
    }

    /// Execute a single command and return its outcome.
    pub async fn execute_one(&self, command: impl Into<Command>) -> Result<CommandOutcome, Error> {
        let command: Command = command.into();
        self.execute(command)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("command produced no outcome"))
    }

    /// Answer a query outside any unit of work.
    #[instrument(skip_all)]
    pub async fn ask(&self, query: Query) -> Result<QueryOutcome, Error> {
        self.dispatcher.ask(query).await
    }

    /// Grant identity provider roles for committed profile creations.
    ///
    /// Failures are logged; the committed data stays in place.
    async fn assign_roles(&self, outcomes: &[CommandOutcome]) {
        for (external_id, role) in outcomes.iter().filter_map(role_assignment) {
            if let Err(failure) = self.identity_provider.assign_role(external_id, role).await {
                error!(
                    external_id = external_id.as_str(),
                    role = role.as_str(),
                    kind = failure.kind(),
                    error = %failure,
                    "role assignment failed after commit"
                );
            }
        }
    }
}

fn role_assignment(outcome: &CommandOutcome) -> Option<(&ExternalId, UserType)> {
    match outcome {
        CommandOutcome::MentorProfileCreated(mentor) => {
            Some((mentor.user().external_id(), UserType::Mentor))
        }
        CommandOutcome::CustomerProfileCreated(customer) => {
            Some((customer.user().external_id(), UserType::Customer))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::future::BoxFuture;
    use rstest::rstest;

    use super::*;
    use crate::domain::commands::{CreateCustomerProfile, RegisterUser};
    use crate::domain::handlers::test_support::MockPorts;
    use crate::domain::ports::{IdentityProviderError, MockIdentityProvider, RepositoryError};
    use crate::domain::{Email, ErrorCode, User};

    /// Runs work without isolation and counts invocations.
    #[derive(Default)]
    struct CountingUnitOfWork {
        runs: AtomicUsize,
    }

    impl UnitOfWork for CountingUnitOfWork {
        fn run<'a, T>(
            &'a self,
            work: BoxFuture<'a, Result<T, Error>>,
        ) -> BoxFuture<'a, Result<T, Error>>
        where
            T: Send + 'a,
        {
            self.runs.fetch_add(1, Ordering::SeqCst);
            work
        }

        fn state(&self) -> TransactionState {
            TransactionState::Idle
        }
    }

    fn customer_user() -> User {
        User::register(
            Email::new("buyer@example.com").expect("email"),
            UserType::Customer,
            ExternalId::new("auth0|buyer").expect("external id"),
        )
    }

    fn customer_ports(user: User) -> MockPorts {
        let mut ports = MockPorts::default();
        ports
            .users
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(user));
        ports
            .mentors
            .expect_get_by_user_id()
            .times(1)
            .return_once(|id| Err(RepositoryError::not_found("mentor", id.to_string())));
        ports
            .customers
            .expect_add()
            .times(1)
            .returning(|customer| Ok(customer.clone()));
        ports
    }

    fn create_customer(user: &User) -> CreateCustomerProfile {
        CreateCustomerProfile {
            user_id: user.id().to_string(),
            customer_id: None,
            customer_type: "individual".to_owned(),
            description: String::new(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn empty_batches_do_not_open_a_unit_of_work() {
        let delegator = TransactionDelegator::new(
            CountingUnitOfWork::default(),
            ProfileDispatcher::new(MockPorts::default().into_repositories()),
            Arc::new(MockIdentityProvider::new()),
        );

        let outcomes = delegator.execute(Vec::<Command>::new()).await.expect("empty batch");

        assert!(outcomes.is_empty());
        assert_eq!(delegator.unit_of_work.runs.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn batch_stops_at_first_failure() {
        let mut ports = MockPorts::default();
        ports.users.expect_add().never();
        let mut identity = MockIdentityProvider::new();
        identity.expect_assign_role().never();
        let delegator = TransactionDelegator::new(
            CountingUnitOfWork::default(),
            ProfileDispatcher::new(ports.into_repositories()),
            Arc::new(identity),
        );
        let invalid = RegisterUser {
            user_id: None,
            email: "nope".to_owned(),
            user_type: "customer".to_owned(),
            external_id: "auth0|a".to_owned(),
        };
        let valid = RegisterUser {
            email: "fine@example.com".to_owned(),
            ..invalid.clone()
        };

        let error = delegator
            .execute(vec![Command::from(invalid), Command::from(valid)])
            .await
            .expect_err("first command fails");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        assert_eq!(delegator.unit_of_work.runs.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn committed_profile_creation_assigns_role() {
        let user = customer_user();
        let command = create_customer(&user);
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_assign_role()
            .withf(|external_id, role| {
                external_id.as_str() == "auth0|buyer" && *role == UserType::Customer
            })
            .times(1)
            .return_once(|_, _| Ok(()));
        let delegator = TransactionDelegator::new(
            CountingUnitOfWork::default(),
            ProfileDispatcher::new(customer_ports(user).into_repositories()),
            Arc::new(identity),
        );

        let outcome = delegator.execute_one(command).await.expect("created");

        assert!(matches!(outcome, CommandOutcome::CustomerProfileCreated(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn role_assignment_failure_keeps_the_commit() {
        let user = customer_user();
        let command = create_customer(&user);
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_assign_role()
            .times(1)
            .return_once(|_, _| Err(IdentityProviderError::unavailable("timeout")));
        let delegator = TransactionDelegator::new(
            CountingUnitOfWork::default(),
            ProfileDispatcher::new(customer_ports(user).into_repositories()),
            Arc::new(identity),
        );

        let outcome = delegator.execute_one(command).await;

        assert!(matches!(outcome, Ok(CommandOutcome::CustomerProfileCreated(_))));
    }
}
