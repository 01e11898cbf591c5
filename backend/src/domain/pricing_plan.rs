//! Pricing plans offered by mentors.

use serde::Serialize;

use super::validation::InvalidValue;
use super::{MentorId, Money, PricingPlanId, PricingType, Title, TrainingType};

/// Priced offer attached to a mentor.
///
/// ## Invariants
/// - A [`PricingType::Free`] plan is priced at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    id: PricingPlanId,
    mentor_id: MentorId,
    title: Title,
    training_type: TrainingType,
    pricing_type: PricingType,
    price: Money,
}

impl PricingPlan {
    /// New plan with a fresh identifier.
    pub fn new(
        mentor_id: MentorId,
        title: Title,
        training_type: TrainingType,
        pricing_type: PricingType,
        price: Money,
    ) -> Result<Self, InvalidValue> {
        Self::from_parts(
            PricingPlanId::random(),
            mentor_id,
            title,
            training_type,
            pricing_type,
            price,
        )
    }

    /// Rebuild a plan with a known identifier.
    pub fn from_parts(
        id: PricingPlanId,
        mentor_id: MentorId,
        title: Title,
        training_type: TrainingType,
        pricing_type: PricingType,
        price: Money,
    ) -> Result<Self, InvalidValue> {
        if pricing_type == PricingType::Free && !price.is_zero() {
            return Err(InvalidValue::FreePlanWithPrice);
        }
        Ok(Self {
            id,
            mentor_id,
            title,
            training_type,
            pricing_type,
            price,
        })
    }

    pub fn id(&self) -> PricingPlanId {
        self.id
    }

    pub fn mentor_id(&self) -> MentorId {
        self.mentor_id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn training_type(&self) -> TrainingType {
        self.training_type
    }

    pub fn pricing_type(&self) -> PricingType {
        self.pricing_type
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn title() -> Title {
        Title::new("Discovery call").expect("valid title")
    }

    #[rstest]
    #[case(PricingType::Free, 0, true)]
    #[case(PricingType::Free, 100, false)]
    #[case(PricingType::Hourly, 0, true)]
    #[case(PricingType::Monthly, 25_000, true)]
    fn free_plans_must_be_zero_priced(
        #[case] pricing_type: PricingType,
        #[case] amount: i64,
        #[case] ok: bool,
    ) {
        let price = Money::new(amount, "EUR").expect("valid money");
        let plan = PricingPlan::new(
            MentorId::random(),
            title(),
            TrainingType::SingleSession,
            pricing_type,
            price,
        );
        assert_eq!(plan.is_ok(), ok);
    }
}
