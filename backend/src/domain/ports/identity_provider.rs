//! Port for the external identity provider that owns user roles.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{ExternalId, UserType};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
        /// The provider refused the request.
        Rejected { message: String } => "identity provider rejected request: {message}",
    }
}

/// Assigns roles to users in the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn assign_role(
        &self,
        external_id: &ExternalId,
        role: UserType,
    ) -> Result<(), IdentityProviderError>;
}

/// In-process provider that records every assignment.
#[derive(Debug, Clone, Default)]
pub struct FixtureIdentityProvider {
    assignments: Arc<Mutex<Vec<(ExternalId, UserType)>>>,
}

impl FixtureIdentityProvider {
    /// Assignments received so far, in call order.
    pub fn assignments(&self) -> Vec<(ExternalId, UserType)> {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn assign_role(
        &self,
        external_id: &ExternalId,
        role: UserType,
    ) -> Result<(), IdentityProviderError> {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((external_id.clone(), role));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_records_assignments_in_order() {
        let provider = FixtureIdentityProvider::default();
        let ada = ExternalId::new("auth0|ada").expect("external id");
        let bob = ExternalId::new("auth0|bob").expect("external id");

        provider
            .assign_role(&ada, UserType::Mentor)
            .await
            .expect("assignment succeeds");
        provider
            .assign_role(&bob, UserType::Customer)
            .await
            .expect("assignment succeeds");

        assert_eq!(
            provider.assignments(),
            vec![(ada, UserType::Mentor), (bob, UserType::Customer)]
        );
    }
}
