//! Error shared by every repository port.

use super::define_port_error;

define_port_error! {
    /// Outcome of a repository operation that did not produce a value.
    ///
    /// `NotFound` and `AlreadyExists` are expected results of a lookup or an
    /// insert. `Connection` and `Query` report adapter failures.
    pub enum RepositoryError {
        /// No record matched the lookup key.
        NotFound { entity: String, key: String } => "{entity} not found: {key}",
        /// A record with the same identity or unique attribute exists.
        AlreadyExists { entity: String, key: String } => "{entity} already exists: {key}",
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}
