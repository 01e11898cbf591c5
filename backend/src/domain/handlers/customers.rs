//! Handlers for customer profiles and mentor bookmarks.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::commands::{
    BookmarkMentor, CreateCustomerProfile, RemoveBookmark, UpdateCustomerProfile,
};
use crate::domain::ports::Repositories;
use crate::domain::queries::{GetCustomer, GetCustomerByUserId};
use crate::domain::{
    Customer, CustomerId, CustomerType, Error, MentorId, ProfileDescription, User, UserId,
};

use super::{Handler, found};

/// Handlers owning the customer aggregate.
#[derive(Clone)]
pub struct CustomerHandlers {
    repositories: Repositories,
}

impl CustomerHandlers {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// A user may hold a customer profile only when typed as a customer and
    /// holding no mentor profile.
    async fn ensure_may_buy(&self, user_id: &UserId) -> Result<User, Error> {
        let user = self.repositories.users.get(user_id).await?;
        if !user.is_customer() {
            return Err(
                Error::invalid_argument("only customer users can hold a customer profile")
                    .with_details(json!({
                        "userId": user_id.to_string(),
                        "userType": user.user_type().as_str(),
                    })),
            );
        }
        let mentor = found(self.repositories.mentors.get_by_user_id(user_id).await)?;
        if mentor.is_some() {
            return Err(
                Error::already_exists("user already holds a mentor profile")
                    .with_details(json!({ "userId": user_id.to_string() })),
            );
        }
        Ok(user)
    }
}

#[async_trait]
impl Handler<CreateCustomerProfile> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, command: CreateCustomerProfile) -> Result<Customer, Error> {
        let user_id = UserId::new(&command.user_id)?;
        let customer_id = command
            .customer_id
            .map(CustomerId::new)
            .transpose()?
            .unwrap_or_else(CustomerId::random);
        let customer_type: CustomerType = command.customer_type.parse()?;
        let description = ProfileDescription::new(&command.description)?;

        let user = self.ensure_may_buy(&user_id).await?;
        let customer = Customer::new(customer_id, user, customer_type, description);
        Ok(self.repositories.customers.add(&customer).await?)
    }
}

#[async_trait]
impl Handler<UpdateCustomerProfile> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, command: UpdateCustomerProfile) -> Result<Customer, Error> {
        let customer_id = CustomerId::new(&command.customer_id)?;
        let customer_type: CustomerType = command.customer_type.parse()?;
        let description = ProfileDescription::new(&command.description)?;

        let customer = self.repositories.customers.get(&customer_id).await?;
        Ok(self
            .repositories
            .customers
            .update(&customer.with_profile(customer_type, description))
            .await?)
    }
}

#[async_trait]
impl Handler<BookmarkMentor> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, command: BookmarkMentor) -> Result<Customer, Error> {
        let customer_id = CustomerId::new(&command.customer_id)?;
        let mentor_id = MentorId::new(&command.mentor_id)?;

        let customer = self.repositories.customers.get(&customer_id).await?;
        if customer.has_bookmarked(&mentor_id) {
            return Ok(customer);
        }
        self.repositories.mentors.get(&mentor_id).await?;
        Ok(self
            .repositories
            .customers
            .update(&customer.with_bookmark(mentor_id))
            .await?)
    }
}

#[async_trait]
impl Handler<RemoveBookmark> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, command: RemoveBookmark) -> Result<Customer, Error> {
        let customer_id = CustomerId::new(&command.customer_id)?;
        let mentor_id = MentorId::new(&command.mentor_id)?;

        let customer = self.repositories.customers.get(&customer_id).await?;
        if !customer.has_bookmarked(&mentor_id) {
            return Ok(customer);
        }
        Ok(self
            .repositories
            .customers
            .update(&customer.without_bookmark(&mentor_id))
            .await?)
    }
}

#[async_trait]
impl Handler<GetCustomer> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, query: GetCustomer) -> Result<Customer, Error> {
        let customer_id = CustomerId::new(&query.customer_id)?;
        Ok(self.repositories.customers.get(&customer_id).await?)
    }
}

#[async_trait]
impl Handler<GetCustomerByUserId> for CustomerHandlers {
    type Output = Customer;

    async fn handle(&self, query: GetCustomerByUserId) -> Result<Customer, Error> {
        let user_id = UserId::new(&query.user_id)?;
        Ok(self
            .repositories
            .customers
            .get_by_user_id(&user_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::handlers::test_support::MockPorts;
    use crate::domain::ports::RepositoryError;
    use crate::domain::{Email, ErrorCode, ExternalId, UserType};
    use rstest::{fixture, rstest};

    #[fixture]
    fn customer() -> Customer {
        let user = User::register(
            Email::new("buyer@example.com").expect("email"),
            UserType::Customer,
            ExternalId::new("auth0|buyer").expect("external id"),
        );
        Customer::create(user, CustomerType::School, ProfileDescription::default())
    }

    #[rstest]
    #[case("individual")]
    #[case("company")]
    #[case("school")]
    #[tokio::test]
    async fn create_accepts_each_customer_type(#[case] customer_type: &str) {
        let user = User::register(
            Email::new("buyer@example.com").expect("email"),
            UserType::Customer,
            ExternalId::new("auth0|buyer").expect("external id"),
        );
        let user_id = user.id();
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
        let handlers = CustomerHandlers::new(ports.into_repositories());

        let created = handlers
            .handle(CreateCustomerProfile {
                user_id: user_id.to_string(),
                customer_id: None,
                customer_type: customer_type.to_owned(),
                description: String::new(),
            })
            .await
            .expect("customer created");

        assert_eq!(created.customer_type().as_str(), customer_type);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_unknown_customer_type_before_storage() {
        let handlers = CustomerHandlers::new(MockPorts::default().into_repositories());

        let error = handlers
            .handle(CreateCustomerProfile {
                user_id: UserId::random().to_string(),
                customer_id: None,
                customer_type: "Company".to_owned(),
                description: String::new(),
            })
            .await
            .expect_err("case sensitive");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_absent_bookmark_writes_nothing(customer: Customer) {
        let customer_id = customer.id();
        let mut ports = MockPorts::default();
        ports
            .customers
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(customer));
        ports.customers.expect_update().never();
        let handlers = CustomerHandlers::new(ports.into_repositories());

        let unchanged = handlers
            .handle(RemoveBookmark {
                customer_id: customer_id.to_string(),
                mentor_id: MentorId::random().to_string(),
            })
            .await
            .expect("idempotent removal");

        assert!(unchanged.bookmarked_mentors().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn bookmarking_unknown_mentor_is_not_found(customer: Customer) {
        let customer_id = customer.id();
        let mut ports = MockPorts::default();
        ports
            .customers
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(customer));
        ports
            .mentors
            .expect_get()
            .times(1)
            .return_once(|id| Err(RepositoryError::not_found("mentor", id.to_string())));
        let handlers = CustomerHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(BookmarkMentor {
                customer_id: customer_id.to_string(),
                mentor_id: MentorId::random().to_string(),
            })
            .await
            .expect_err("mentor missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
