//! Closed enumerations used by profiles and offerings.

use super::macros::define_value_enum;

define_value_enum! {
    /// Kind of account a user registered as. Fixed at registration.
    pub enum UserType("user type") {
        Customer => "customer",
        Mentor => "mentor",
    }
}

define_value_enum! {
    /// How available a mentor currently is for new engagements.
    pub enum Availability("availability") {
        Available => "available",
        Limited => "limited",
        Unavailable => "unavailable",
    }
}

define_value_enum! {
    /// Shape of a mentoring engagement.
    pub enum TrainingType("training type") {
        SingleSession => "single_session",
        ShortTerm => "short_term",
        LongTerm => "long_term",
    }
}

define_value_enum! {
    /// Kind of organisation or person a customer represents.
    pub enum CustomerType("customer type") {
        Individual => "individual",
        Company => "company",
        School => "school",
    }
}

define_value_enum! {
    /// Billing model of a pricing plan.
    pub enum PricingType("pricing type") {
        Free => "free",
        Hourly => "hourly",
        PerSession => "per_session",
        Monthly => "monthly",
    }
}

define_value_enum! {
    /// Language a mentor can teach in.
    pub enum Language("language") {
        English => "english",
        French => "french",
        Spanish => "spanish",
        German => "german",
        Italian => "italian",
        Portuguese => "portuguese",
        Dutch => "dutch",
        Arabic => "arabic",
        Chinese => "chinese",
        Japanese => "japanese",
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::validation::InvalidValue;
    use rstest::rstest;

    #[rstest]
    #[case("individual", CustomerType::Individual)]
    #[case("company", CustomerType::Company)]
    #[case("school", CustomerType::School)]
    fn customer_type_parses_exact_values(#[case] raw: &str, #[case] expected: CustomerType) {
        assert_eq!(raw.parse::<CustomerType>(), Ok(expected));
    }

    #[rstest]
    #[case("Individual")]
    #[case(" company")]
    #[case("association")]
    #[case("")]
    fn customer_type_rejects_other_values(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<CustomerType>(),
            Err(InvalidValue::UnknownVariant {
                kind: "customer type",
                input: raw.to_owned(),
            })
        );
    }

    #[rstest]
    fn values_lists_closed_set_in_order() {
        let values: Vec<_> = PricingType::values().collect();
        assert_eq!(values, ["free", "hourly", "per_session", "monthly"]);
    }

    #[rstest]
    fn serde_round_trips_through_snake_case() {
        let json = serde_json::to_string(&TrainingType::SingleSession).expect("serialise");
        assert_eq!(json, "\"single_session\"");
        let parsed: Result<TrainingType, _> = serde_json::from_str("\"weekend\"");
        assert!(parsed.is_err());
    }
}
