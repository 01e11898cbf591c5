//! Profile management backend.
//!
//! Mentors, customers, their contact details, professional experience and
//! pricing plans, mutated through a transactional command pipeline:
//!
//! - [`domain`] holds value objects, entities, repository ports, commands,
//!   queries, their handlers, the dispatcher, and the transaction delegator.
//! - [`outbound`] provides the Diesel/PostgreSQL and in-memory adapters.
//! - [`inbound`] maps domain errors onto HTTP responses.
//! - [`settings`] loads adapter configuration.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
