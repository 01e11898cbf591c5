//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! them with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Email and external id are unique.
    users (id) {
        id -> Uuid,
        email -> Text,
        user_type -> Text,
        external_id -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Personal details, at most one row per user.
    persons (id) {
        id -> Uuid,
        user_id -> Uuid,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        nickname -> Nullable<Text>,
        phone_number -> Nullable<Text>,
        linkedin_profile_url -> Nullable<Text>,
        google_place_id -> Nullable<Text>,
    }
}

diesel::table! {
    customers (id) {
        id -> Uuid,
        user_id -> Uuid,
        customer_type -> Text,
        description -> Text,
    }
}

diesel::table! {
    /// Bookmarked mentors. `ordinal` records insertion order.
    customer_bookmarks (customer_id, mentor_id) {
        customer_id -> Uuid,
        mentor_id -> Uuid,
        ordinal -> Int8,
    }
}

diesel::table! {
    /// Mentor profiles with their visibility settings flattened to columns.
    mentors (id) {
        id -> Uuid,
        user_id -> Uuid,
        description -> Text,
        availability -> Text,
        languages -> Array<Text>,
        training_types -> Array<Text>,
        is_visible -> Bool,
        show_email -> Bool,
        show_phone_number -> Bool,
        show_linkedin_profile -> Bool,
        show_location -> Bool,
        show_pricing_plans -> Bool,
        show_professional_experiences -> Bool,
        current_job_title -> Nullable<Text>,
        profile_title -> Nullable<Text>,
    }
}

diesel::table! {
    /// Global skill catalogue keyed by normalised name.
    skills (id) {
        id -> Uuid,
        name -> Text,
    }
}

diesel::table! {
    mentor_skills (mentor_id, skill_id) {
        mentor_id -> Uuid,
        skill_id -> Uuid,
    }
}

diesel::table! {
    professional_experiences (id) {
        id -> Uuid,
        mentor_id -> Uuid,
        job_title -> Text,
        company -> Text,
        start_date -> Timestamptz,
        end_date -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Prices are stored in minor units with an ISO 4217 code.
    pricing_plans (id) {
        id -> Uuid,
        mentor_id -> Uuid,
        title -> Text,
        training_type -> Text,
        pricing_type -> Text,
        amount_minor -> Int8,
        currency -> Text,
    }
}

diesel::joinable!(persons -> users (user_id));
diesel::joinable!(customers -> users (user_id));
diesel::joinable!(customer_bookmarks -> customers (customer_id));
diesel::joinable!(customer_bookmarks -> mentors (mentor_id));
diesel::joinable!(mentors -> users (user_id));
diesel::joinable!(mentor_skills -> mentors (mentor_id));
diesel::joinable!(mentor_skills -> skills (skill_id));
diesel::joinable!(professional_experiences -> mentors (mentor_id));
diesel::joinable!(pricing_plans -> mentors (mentor_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    persons,
    customers,
    customer_bookmarks,
    mentors,
    skills,
    mentor_skills,
    professional_experiences,
    pricing_plans,
);
