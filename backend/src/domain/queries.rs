//! Read-only queries answered outside any unit of work.

use super::{Customer, Mentor, Skill, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUser {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUserByExternalId {
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMentor {
    pub mentor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetMentorByUserId {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCustomer {
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCustomerByUserId {
    pub user_id: String,
}

/// Search mentors. Absent filters match everything; hidden profiles are
/// skipped unless `include_hidden` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMentors {
    pub skill: Option<String>,
    pub language: Option<String>,
    pub availability: Option<String>,
    pub training_type: Option<String>,
    pub include_hidden: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSkills;

/// Every query the dispatcher can route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    GetUser(GetUser),
    GetUserByExternalId(GetUserByExternalId),
    GetMentor(GetMentor),
    GetMentorByUserId(GetMentorByUserId),
    GetCustomer(GetCustomer),
    GetCustomerByUserId(GetCustomerByUserId),
    SearchMentors(SearchMentors),
    ListSkills(ListSkills),
}

impl Query {
    /// Query name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetUser(_) => "GetUser",
            Self::GetUserByExternalId(_) => "GetUserByExternalId",
            Self::GetMentor(_) => "GetMentor",
            Self::GetMentorByUserId(_) => "GetMentorByUserId",
            Self::GetCustomer(_) => "GetCustomer",
            Self::GetCustomerByUserId(_) => "GetCustomerByUserId",
            Self::SearchMentors(_) => "SearchMentors",
            Self::ListSkills(_) => "ListSkills",
        }
    }
}

/// Result of an answered query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    User(User),
    Mentor(Mentor),
    Customer(Customer),
    Mentors(Vec<Mentor>),
    Skills(Vec<Skill>),
}
