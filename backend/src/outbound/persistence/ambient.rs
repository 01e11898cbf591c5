//! Task-local connection shared by repository calls inside a unit of work.
//!
//! [`DieselUnitOfWork`](super::DieselUnitOfWork) opens a transaction on one
//! pooled connection and scopes the work future with it. Repository adapters
//! call [`with_connection!`] which prefers that connection and otherwise
//! checks out a fresh one for a single autocommitted statement.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::pool::OwnedConnection;

pub(crate) type SharedConnection = Arc<Mutex<OwnedConnection>>;

tokio::task_local! {
    static ACTIVE_CONNECTION: SharedConnection;
}

/// Connection of the unit of work running on this task, if any.
pub(crate) fn active_connection() -> Option<SharedConnection> {
    ACTIVE_CONNECTION.try_with(Arc::clone).ok()
}

/// Run `work` with `connection` installed as the task's active connection.
pub(crate) async fn scope<F: Future>(connection: SharedConnection, work: F) -> F::Output {
    ACTIVE_CONNECTION.scope(connection, work).await
}

/// Evaluate `$body` with `$conn` bound to `&mut AsyncPgConnection`.
///
/// Must be expanded inside an async function returning
/// `Result<_, RepositoryError>`.
macro_rules! with_connection {
    ($pool:expr, |$conn:ident| $body:expr) => {{
        match $crate::outbound::persistence::ambient::active_connection() {
            Some(shared) => {
                let mut guard = shared.lock().await;
                let $conn: &mut ::diesel_async::AsyncPgConnection = &mut guard;
                $body
            }
            None => {
                let mut pooled = $pool
                    .get()
                    .await
                    .map_err($crate::outbound::persistence::error_mapping::map_pool_error)?;
                let $conn: &mut ::diesel_async::AsyncPgConnection = &mut pooled;
                $body
            }
        }
    }};
}

pub(crate) use with_connection;
