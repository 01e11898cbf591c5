//! Port for the ambient unit of work wrapping a command batch.

use futures_util::future::BoxFuture;

use crate::domain::Error;

/// Whether a unit of work is active for the current task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    InTransaction,
}

/// Runs work atomically.
///
/// Repository adapters backed by the same store observe the active unit of
/// work implicitly; callers never pass a transaction handle around. When
/// `work` fails every mutation it made is discarded and its error is returned
/// unchanged. A `run` issued while a unit of work is already active joins it.
pub trait UnitOfWork: Send + Sync {
    fn run<'a, T>(
        &'a self,
        work: BoxFuture<'a, Result<T, Error>>,
    ) -> BoxFuture<'a, Result<T, Error>>
    where
        T: Send + 'a;

    /// State observed from the calling task.
    fn state(&self) -> TransactionState;
}
