//! Unit of work backed by a PostgreSQL transaction.

use std::sync::Arc;

use diesel_async::{AnsiTransactionManager, TransactionManager};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::{TransactionState, UnitOfWork};

use super::ambient::{self, SharedConnection};
use super::pool::DbPool;

/// Runs work inside one database transaction.
///
/// The outermost run checks out a connection, begins a transaction and
/// installs the connection as the task's ambient connection; every Diesel
/// repository called from `work` then joins the transaction. The transaction
/// commits when `work` succeeds and rolls back otherwise. A run issued while a
/// transaction is active simply awaits `work` inside it.
#[derive(Debug, Clone)]
pub struct DieselUnitOfWork {
    pool: DbPool,
}

impl DieselUnitOfWork {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<SharedConnection, Error> {
        let mut connection = self.pool.get_owned().await.map_err(|error| {
            Error::internal("database unavailable")
                .with_details(serde_json::json!({ "cause": error.into_message() }))
        })?;
        AnsiTransactionManager::begin_transaction(&mut *connection)
            .await
            .map_err(|error| transaction_error("begin", &error))?;
        debug!("transaction started");
        Ok(Arc::new(Mutex::new(connection)))
    }
}

fn transaction_error(step: &str, error: &diesel::result::Error) -> Error {
    Error::internal(format!("failed to {step} transaction"))
        .with_details(serde_json::json!({ "cause": error.to_string() }))
}

async fn finish<T>(connection: &SharedConnection, result: Result<T, Error>) -> Result<T, Error> {
    let mut guard = connection.lock().await;
    let conn = &mut **guard;
    match result {
        Ok(value) => match AnsiTransactionManager::commit_transaction(conn).await {
            Ok(()) => {
                debug!("transaction committed");
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = AnsiTransactionManager::rollback_transaction(conn).await {
                    warn!(error = %rollback, "rollback after failed commit failed");
                }
                Err(transaction_error("commit", &error))
            }
        },
        Err(failure) => {
            if let Err(error) = AnsiTransactionManager::rollback_transaction(conn).await {
                warn!(%error, "rollback failed");
            }
            debug!("transaction rolled back");
            Err(failure)
        }
    }
}

impl UnitOfWork for DieselUnitOfWork {
    fn run<'a, T>(
        &'a self,
        work: BoxFuture<'a, Result<T, Error>>,
    ) -> BoxFuture<'a, Result<T, Error>>
    where
        T: Send + 'a,
    {
        async move {
            if ambient::active_connection().is_some() {
                return work.await;
            }
            let connection = self.begin().await?;
            let result = ambient::scope(Arc::clone(&connection), work).await;
            finish(&connection, result).await
        }
        .boxed()
    }

    fn state(&self) -> TransactionState {
        if ambient::active_connection().is_some() {
            TransactionState::InTransaction
        } else {
            TransactionState::Idle
        }
    }
}
