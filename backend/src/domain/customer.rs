//! Customer profiles.

use serde::Serialize;

use super::{CustomerId, CustomerType, MentorId, ProfileDescription, User};

/// Customer profile with its owning user always resolved.
///
/// ## Invariants
/// - Bookmarked mentors hold no duplicates and keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: CustomerId,
    user: User,
    customer_type: CustomerType,
    description: ProfileDescription,
    bookmarked_mentors: Vec<MentorId>,
}

impl Customer {
    /// Rebuild a customer with a known identifier.
    pub fn new(
        id: CustomerId,
        user: User,
        customer_type: CustomerType,
        description: ProfileDescription,
    ) -> Self {
        Self {
            id,
            user,
            customer_type,
            description,
            bookmarked_mentors: Vec::new(),
        }
    }

    /// New profile with a fresh identifier.
    pub fn create(user: User, customer_type: CustomerType, description: ProfileDescription) -> Self {
        Self::new(CustomerId::random(), user, customer_type, description)
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    pub fn description(&self) -> &ProfileDescription {
        &self.description
    }

    pub fn bookmarked_mentors(&self) -> &[MentorId] {
        &self.bookmarked_mentors
    }

    pub fn has_bookmarked(&self, mentor_id: &MentorId) -> bool {
        self.bookmarked_mentors.contains(mentor_id)
    }

    /// Same customer with a replaced owning user.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }

    /// Same customer with replaced profile fields.
    pub fn with_profile(
        mut self,
        customer_type: CustomerType,
        description: ProfileDescription,
    ) -> Self {
        self.customer_type = customer_type;
        self.description = description;
        self
    }

    /// Add a bookmark; already bookmarked mentors are left in place.
    pub fn with_bookmark(mut self, mentor_id: MentorId) -> Self {
        if !self.has_bookmarked(&mentor_id) {
            self.bookmarked_mentors.push(mentor_id);
        }
        self
    }

    /// Replace every bookmark, dropping duplicates.
    pub fn with_bookmarks(mut self, mentor_ids: impl IntoIterator<Item = MentorId>) -> Self {
        self.bookmarked_mentors.clear();
        mentor_ids
            .into_iter()
            .fold(self, |customer, mentor_id| customer.with_bookmark(mentor_id))
    }

    pub fn without_bookmark(mut self, mentor_id: &MentorId) -> Self {
        self.bookmarked_mentors.retain(|existing| existing != mentor_id);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Email, ExternalId, UserType};
    use rstest::{fixture, rstest};

    #[fixture]
    fn customer() -> Customer {
        let user = User::register(
            Email::new("buyer@example.com").expect("email"),
            UserType::Customer,
            ExternalId::new("auth0|buyer").expect("external id"),
        );
        Customer::create(user, CustomerType::Company, ProfileDescription::default())
    }

    #[rstest]
    fn bookmarks_are_deduplicated_in_order(customer: Customer) {
        let first = MentorId::random();
        let second = MentorId::random();
        let customer = customer
            .with_bookmark(first)
            .with_bookmark(second)
            .with_bookmark(first);
        assert_eq!(customer.bookmarked_mentors(), [first, second]);
    }

    #[rstest]
    fn removing_missing_bookmark_is_a_no_op(customer: Customer) {
        let kept = MentorId::random();
        let customer = customer
            .with_bookmark(kept)
            .without_bookmark(&MentorId::random());
        assert_eq!(customer.bookmarked_mentors(), [kept]);
    }

    #[rstest]
    fn with_bookmarks_replaces_existing_set(customer: Customer) {
        let old = MentorId::random();
        let new = MentorId::random();
        let customer = customer.with_bookmark(old).with_bookmarks([new, new]);
        assert_eq!(customer.bookmarked_mentors(), [new]);
    }
}
