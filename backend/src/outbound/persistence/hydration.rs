//! Loading of aggregates that span several tables.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Customer, Mentor, MentorId, PricingPlan, ProfessionalExperience, Skill, User,
};

use super::error_mapping::map_diesel_error;
use super::models::{
    CustomerRow, ExperienceRow, MentorRow, PersonRow, PricingPlanRow, SkillRow, UserRow,
};
use super::schema::{
    customer_bookmarks, mentor_skills, mentors, persons, pricing_plans, professional_experiences,
    skills, users,
};

pub(crate) fn row_count(total: i64) -> u64 {
    u64::try_from(total).unwrap_or_default()
}

pub(crate) async fn load_user(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<User, RepositoryError> {
    let row = users::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .map_err(|error| map_diesel_error(error, "user", &id))?;
    hydrate_user(conn, row).await
}

/// Attach personal details to a user row.
pub(crate) async fn hydrate_user(
    conn: &mut AsyncPgConnection,
    row: UserRow,
) -> Result<User, RepositoryError> {
    let person = persons::table
        .filter(persons::user_id.eq(row.id))
        .select(PersonRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|error| map_diesel_error(error, "person", &row.id))?
        .map(PersonRow::into_person)
        .transpose()?;
    Ok(row.into_user()?.with_person(person))
}

/// Mentor ids bookmarked by a customer, oldest bookmark first.
fn bookmarked_mentor_ids(
    customer_id: Uuid,
) -> customer_bookmarks::BoxedQuery<'static, Pg, diesel::sql_types::Uuid> {
    customer_bookmarks::table
        .filter(customer_bookmarks::customer_id.eq(customer_id))
        .order(customer_bookmarks::ordinal.asc())
        .select(customer_bookmarks::mentor_id)
        .into_boxed()
}

pub(crate) async fn hydrate_customer(
    conn: &mut AsyncPgConnection,
    row: CustomerRow,
) -> Result<Customer, RepositoryError> {
    let user = load_user(conn, row.user_id).await?;
    let bookmarks: Vec<Uuid> = bookmarked_mentor_ids(row.id)
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "customer", &row.id))?;
    row.into_customer(user, bookmarks)
}

/// Fail with `NotFound` unless the mentor row exists.
pub(crate) async fn require_mentor(
    conn: &mut AsyncPgConnection,
    mentor_id: &MentorId,
) -> Result<(), RepositoryError> {
    mentors::table
        .find(mentor_id.as_uuid())
        .select(mentors::id)
        .first::<Uuid>(conn)
        .await
        .map(|_| ())
        .map_err(|error| map_diesel_error(error, "mentor", mentor_id))
}

pub(crate) async fn load_mentor_skills(
    conn: &mut AsyncPgConnection,
    mentor_id: &MentorId,
) -> Result<Vec<Skill>, RepositoryError> {
    mentor_skills::table
        .inner_join(skills::table)
        .filter(mentor_skills::mentor_id.eq(mentor_id.as_uuid()))
        .order(skills::name.asc())
        .select(SkillRow::as_select())
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "skill", mentor_id))?
        .into_iter()
        .map(SkillRow::into_skill)
        .collect()
}

pub(crate) async fn load_experiences(
    conn: &mut AsyncPgConnection,
    mentor_id: &MentorId,
) -> Result<Vec<ProfessionalExperience>, RepositoryError> {
    professional_experiences::table
        .filter(professional_experiences::mentor_id.eq(mentor_id.as_uuid()))
        .order((
            professional_experiences::start_date.desc(),
            professional_experiences::id.asc(),
        ))
        .select(ExperienceRow::as_select())
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "professional experience", mentor_id))?
        .into_iter()
        .map(ExperienceRow::into_experience)
        .collect()
}

pub(crate) async fn load_pricing_plans(
    conn: &mut AsyncPgConnection,
    mentor_id: &MentorId,
) -> Result<Vec<PricingPlan>, RepositoryError> {
    pricing_plans::table
        .filter(pricing_plans::mentor_id.eq(mentor_id.as_uuid()))
        .order((pricing_plans::title.asc(), pricing_plans::id.asc()))
        .select(PricingPlanRow::as_select())
        .load(conn)
        .await
        .map_err(|error| map_diesel_error(error, "pricing plan", mentor_id))?
        .into_iter()
        .map(PricingPlanRow::into_plan)
        .collect()
}

/// Resolve the owner and children of a mentor row.
pub(crate) async fn hydrate_mentor(
    conn: &mut AsyncPgConnection,
    row: MentorRow,
) -> Result<Mentor, RepositoryError> {
    let mentor_id = MentorId::from_uuid(row.id);
    let user = load_user(conn, row.user_id).await?;
    let skills = load_mentor_skills(conn, &mentor_id).await?;
    let experiences = load_experiences(conn, &mentor_id).await?;
    let plans = load_pricing_plans(conn, &mentor_id).await?;
    Ok(Mentor::new(mentor_id, user, row.profile()?).with_children(skills, experiences, plans))
}

#[cfg(test)]
mod tests {
    //! Query shape checks that need no database.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bookmarks_load_in_insertion_order() {
        let sql = diesel::debug_query::<Pg, _>(&bookmarked_mentor_ids(Uuid::nil())).to_string();
        assert!(
            sql.contains(r#"ORDER BY "customer_bookmarks"."ordinal" ASC"#),
            "unexpected bookmark query: {sql}"
        );
        assert!(!sql.contains(r#""customer_bookmarks"."mentor_id" ASC"#));
    }

    #[rstest]
    #[case(5, 5)]
    #[case(-1, 0)]
    fn negative_counts_clamp_to_zero(#[case] total: i64, #[case] expected: u64) {
        assert_eq!(row_count(total), expected);
    }
}
