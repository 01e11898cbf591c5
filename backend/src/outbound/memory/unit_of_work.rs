//! Snapshot-based unit of work for the in-memory adapters.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{TransactionState, UnitOfWork};

use super::{SharedState, lock};

/// Copies the tables when the outermost run starts and restores the copy
/// when that run fails. Runs issued inside an active run join it.
#[derive(Debug, Clone)]
pub struct InMemoryUnitOfWork {
    state: SharedState,
}

impl InMemoryUnitOfWork {
    pub(super) fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Start a run, returning whether it is the outermost one.
    fn begin(&self) -> bool {
        let mut state = lock(&self.state);
        if state.snapshot.is_some() {
            return false;
        }
        let snapshot = state.tables.clone();
        state.snapshot = Some(snapshot);
        true
    }

    fn finish(&self, failed: bool) {
        let mut state = lock(&self.state);
        if let Some(snapshot) = state.snapshot.take() {
            if failed {
                debug!("restoring in-memory snapshot");
                state.tables = snapshot;
            }
        }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn run<'a, T>(
        &'a self,
        work: BoxFuture<'a, Result<T, Error>>,
    ) -> BoxFuture<'a, Result<T, Error>>
    where
        T: Send + 'a,
    {
        async move {
            if !self.begin() {
                return work.await;
            }
            let result = work.await;
            self.finish(result.is_err());
            result
        }
        .boxed()
    }

    fn state(&self) -> TransactionState {
        if lock(&self.state).snapshot.is_some() {
            TransactionState::InTransaction
        } else {
            TransactionState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{Email, ExternalId, User, UserType};
    use crate::outbound::memory::InMemoryDatabase;

    fn user(email: &str) -> User {
        User::register(
            Email::new(email).expect("email"),
            UserType::Customer,
            ExternalId::new(format!("ext-{email}")).expect("external id"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn successful_run_keeps_mutations() {
        let db = InMemoryDatabase::new();
        let repos = db.repositories();
        let uow = db.unit_of_work();
        let users = repos.users.clone();

        let added = uow
            .run(
                async move {
                    let added = users.add(&user("ada@example.com")).await?;
                    Ok::<_, Error>(added)
                }
                .boxed(),
            )
            .await
            .expect("run succeeds");

        assert_eq!(uow.state(), TransactionState::Idle);
        assert_eq!(repos.users.get(&added.id()).await.expect("kept"), added);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_run_restores_the_tables() {
        let db = InMemoryDatabase::new();
        let repos = db.repositories();
        let uow = db.unit_of_work();
        let users = repos.users.clone();

        let result: Result<(), Error> = uow
            .run(
                async move {
                    users.add(&user("ada@example.com")).await?;
                    Err(Error::invalid_argument("later step failed"))
                }
                .boxed(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(repos.users.count().await.expect("count"), 0);
        assert_eq!(uow.state(), TransactionState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn nested_run_joins_the_outer_one() {
        let db = InMemoryDatabase::new();
        let repos = db.repositories();
        let uow = db.unit_of_work();
        let users = repos.users.clone();
        let inner_uow = uow.clone();

        let result: Result<(), Error> = uow
            .run(
                async move {
                    assert_eq!(inner_uow.state(), TransactionState::InTransaction);
                    let nested_users = users.clone();
                    inner_uow
                        .run(
                            async move {
                                nested_users.add(&user("ada@example.com")).await?;
                                Ok::<_, Error>(())
                            }
                            .boxed(),
                        )
                        .await?;
                    assert_eq!(inner_uow.state(), TransactionState::InTransaction);
                    Err(Error::internal("outer failure"))
                }
                .boxed(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(repos.users.count().await.expect("count"), 0);
    }
}
