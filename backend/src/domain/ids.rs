//! Identifier newtypes for every aggregate and child entity.

use super::macros::define_id;

define_id! {
    /// Stable user identifier.
    pub struct UserId("user id");
}

define_id! {
    /// Identifier of the personal details attached to a user.
    pub struct PersonId("person id");
}

define_id! {
    /// Mentor profile identifier.
    pub struct MentorId("mentor id");
}

define_id! {
    /// Customer profile identifier.
    pub struct CustomerId("customer id");
}

define_id! {
    /// Catalogue skill identifier.
    pub struct SkillId("skill id");
}

define_id! {
    /// Pricing plan identifier.
    pub struct PricingPlanId("pricing plan id");
}

define_id! {
    /// Professional experience identifier.
    pub struct ProfessionalExperienceId("professional experience id");
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::validation::InvalidValue;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn accepts_v4_uuid() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = UserId::new(raw).expect("valid v4 id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("", InvalidValue::Empty { field: "mentor id" })]
    #[case("not-a-uuid", InvalidValue::InvalidId { field: "mentor id" })]
    #[case("00000000-0000-0000-0000-000000000000", InvalidValue::InvalidId { field: "mentor id" })]
    #[case("a8098c1a-f86e-11da-bd1a-00112444be1e", InvalidValue::InvalidId { field: "mentor id" })]
    fn rejects_anything_but_v4(#[case] raw: &str, #[case] expected: InvalidValue) {
        assert_eq!(MentorId::new(raw), Err(expected));
    }

    #[rstest]
    fn from_uuid_trusts_stored_values() {
        let uuid = Uuid::nil();
        assert_eq!(SkillId::from_uuid(uuid).as_uuid(), &uuid);
    }

    #[rstest]
    fn serde_uses_string_form() {
        let id = PricingPlanId::random();
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, format!("\"{id}\""));
        let back: PricingPlanId = serde_json::from_str(&json).expect("deserialise id");
        assert_eq!(back, id);
    }
}
