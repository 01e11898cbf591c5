//! Handlers for mentor offerings: professional experience and pricing plans.

use async_trait::async_trait;

use crate::domain::commands::{
    AddPricingPlan, AddProfessionalExperience, PricingPlanInput, RemovePricingPlan,
    RemoveProfessionalExperience, UpdatePricingPlan,
};
use crate::domain::ports::Repositories;
use crate::domain::validation::InvalidValue;
use crate::domain::{
    Error, MentorId, Money, Period, PricingPlan, PricingPlanId, PricingType,
    ProfessionalExperience, ProfessionalExperienceId, Title, TrainingType,
};

use super::Handler;

/// Handlers owning the children of a mentor profile.
#[derive(Clone)]
pub struct OfferingHandlers {
    repositories: Repositories,
}

impl OfferingHandlers {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

struct PlanFields {
    title: Title,
    training_type: TrainingType,
    pricing_type: PricingType,
    price: Money,
}

fn parse_plan(input: &PricingPlanInput) -> Result<PlanFields, InvalidValue> {
    Ok(PlanFields {
        title: Title::new(&input.title)?,
        training_type: input.training_type.parse()?,
        pricing_type: input.pricing_type.parse()?,
        price: Money::new(input.amount_minor, &input.currency)?,
    })
}

#[async_trait]
impl Handler<AddProfessionalExperience> for OfferingHandlers {
    type Output = ProfessionalExperience;

    async fn handle(
        &self,
        command: AddProfessionalExperience,
    ) -> Result<ProfessionalExperience, Error> {
        let mentor_id = MentorId::new(&command.mentor_id)?;
        let job_title = Title::new(&command.job_title)?;
        let company = Title::new(&command.company)?;
        let period = Period::new(command.start, command.end)?;

        self.repositories.mentors.get(&mentor_id).await?;
        let experience = ProfessionalExperience::new(mentor_id, job_title, company, period);
        Ok(self.repositories.experiences.add(&experience).await?)
    }
}

#[async_trait]
impl Handler<RemoveProfessionalExperience> for OfferingHandlers {
    type Output = ProfessionalExperience;

    async fn handle(
        &self,
        command: RemoveProfessionalExperience,
    ) -> Result<ProfessionalExperience, Error> {
        let id = ProfessionalExperienceId::new(&command.experience_id)?;
        Ok(self.repositories.experiences.delete(&id).await?)
    }
}

#[async_trait]
impl Handler<AddPricingPlan> for OfferingHandlers {
    type Output = PricingPlan;

    async fn handle(&self, command: AddPricingPlan) -> Result<PricingPlan, Error> {
        let mentor_id = MentorId::new(&command.mentor_id)?;
        let fields = parse_plan(&command.plan)?;
        let plan = PricingPlan::new(
            mentor_id,
            fields.title,
            fields.training_type,
            fields.pricing_type,
            fields.price,
        )?;

        self.repositories.mentors.get(&mentor_id).await?;
        Ok(self.repositories.pricing_plans.add(&plan).await?)
    }
}

#[async_trait]
impl Handler<UpdatePricingPlan> for OfferingHandlers {
    type Output = PricingPlan;

    async fn handle(&self, command: UpdatePricingPlan) -> Result<PricingPlan, Error> {
        let plan_id = PricingPlanId::new(&command.plan_id)?;
        let fields = parse_plan(&command.plan)?;

        let existing = self.repositories.pricing_plans.get(&plan_id).await?;
        let plan = PricingPlan::from_parts(
            existing.id(),
            existing.mentor_id(),
            fields.title,
            fields.training_type,
            fields.pricing_type,
            fields.price,
        )?;
        Ok(self.repositories.pricing_plans.update(&plan).await?)
    }
}

#[async_trait]
impl Handler<RemovePricingPlan> for OfferingHandlers {
    type Output = PricingPlan;

    async fn handle(&self, command: RemovePricingPlan) -> Result<PricingPlan, Error> {
        let plan_id = PricingPlanId::new(&command.plan_id)?;
        Ok(self.repositories.pricing_plans.delete(&plan_id).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::handlers::test_support::MockPorts;
    use crate::domain::ports::RepositoryError;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn plan_input(pricing_type: &str, amount_minor: i64) -> PricingPlanInput {
        PricingPlanInput {
            title: "Weekly coaching".to_owned(),
            training_type: "long_term".to_owned(),
            pricing_type: pricing_type.to_owned(),
            amount_minor,
            currency: "EUR".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn free_plan_with_price_is_rejected_before_storage() {
        let handlers = OfferingHandlers::new(MockPorts::default().into_repositories());

        let error = handlers
            .handle(AddPricingPlan {
                mentor_id: MentorId::random().to_string(),
                plan: plan_input("free", 500),
            })
            .await
            .expect_err("free plans are free");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
    }

    #[rstest]
    #[tokio::test]
    async fn experience_for_unknown_mentor_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .mentors
            .expect_get()
            .times(1)
            .return_once(|id| Err(RepositoryError::not_found("mentor", id.to_string())));
        ports.experiences.expect_add().never();
        let handlers = OfferingHandlers::new(ports.into_repositories());

        let error = handlers
            .handle(AddProfessionalExperience {
                mentor_id: MentorId::random().to_string(),
                job_title: "Engineer".to_owned(),
                company: "Acme".to_owned(),
                start: Utc.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap(),
                end: None,
            })
            .await
            .expect_err("mentor missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_plan_identity_and_owner() {
        let mentor_id = MentorId::random();
        let existing = PricingPlan::new(
            mentor_id,
            Title::new("Intro call").expect("title"),
            TrainingType::SingleSession,
            PricingType::Free,
            Money::new(0, "EUR").expect("money"),
        )
        .expect("plan");
        let plan_id = existing.id();
        let mut ports = MockPorts::default();
        ports
            .pricing_plans
            .expect_get()
            .times(1)
            .return_once(move |_| Ok(existing));
        ports
            .pricing_plans
            .expect_update()
            .times(1)
            .returning(|plan| Ok(plan.clone()));
        let handlers = OfferingHandlers::new(ports.into_repositories());

        let updated = handlers
            .handle(UpdatePricingPlan {
                plan_id: plan_id.to_string(),
                plan: plan_input("hourly", 6_000),
            })
            .await
            .expect("plan updated");

        assert_eq!(updated.id(), plan_id);
        assert_eq!(updated.mentor_id(), mentor_id);
        assert_eq!(updated.price().amount_minor(), 6_000);
    }
}
