//! HTTP boundary helpers.
//!
//! Routing is left to the embedding service; this module only fixes how
//! domain failures look on the wire.

pub mod error;

pub use error::{ErrorExposure, error_response, status_for};
