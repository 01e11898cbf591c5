//! Professional experience entries listed on mentor profiles.

use serde::{Deserialize, Serialize};

use super::{MentorId, Period, ProfessionalExperienceId, Title};

/// One past or current position held by a mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalExperience {
    pub id: ProfessionalExperienceId,
    pub mentor_id: MentorId,
    pub job_title: Title,
    pub company: Title,
    pub period: Period,
}

impl ProfessionalExperience {
    pub fn new(mentor_id: MentorId, job_title: Title, company: Title, period: Period) -> Self {
        Self {
            id: ProfessionalExperienceId::random(),
            mentor_id,
            job_title,
            company,
            period,
        }
    }
}
