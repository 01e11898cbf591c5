//! Month-granular date ranges.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::InvalidValue;

/// Date range rounded down to whole months in UTC.
///
/// `end` is absent for ongoing periods. When present it never precedes `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodDto", into = "PeriodDto")]
pub struct Period {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

/// Round `instant` down to the first instant of its month.
fn start_of_month(instant: DateTime<Utc>) -> Result<DateTime<Utc>, InvalidValue> {
    NaiveDate::from_ymd_opt(instant.year(), instant.month(), 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or(InvalidValue::InvalidPeriod)
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, InvalidValue> {
        let start = start_of_month(start)?;
        let end = end.map(start_of_month).transpose()?;
        if end.is_some_and(|end| end < start) {
            return Err(InvalidValue::InvalidPeriod);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PeriodDto {
    start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
}

impl From<Period> for PeriodDto {
    fn from(value: Period) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

impl TryFrom<PeriodDto> for Period {
    type Error = InvalidValue;

    fn try_from(value: PeriodDto) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 13, 45, 7)
            .single()
            .expect("valid instant")
    }

    #[rstest]
    fn rounds_both_bounds_to_month_start() {
        let period = Period::new(at(2021, 3, 17), Some(at(2023, 11, 30))).expect("valid period");
        assert_eq!(period.start(), Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(period.end(), Some(Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap()));
    }

    #[rstest]
    fn same_month_end_is_allowed() {
        let period = Period::new(at(2022, 6, 20), Some(at(2022, 6, 2))).expect("same month");
        assert_eq!(period.start(), period.end().expect("end"));
    }

    #[rstest]
    fn end_before_start_is_rejected() {
        assert_eq!(
            Period::new(at(2022, 6, 2), Some(at(2022, 5, 28))),
            Err(InvalidValue::InvalidPeriod)
        );
    }

    #[rstest]
    fn ongoing_period_has_no_end() {
        assert!(Period::new(at(2020, 1, 9), None).expect("ongoing").is_ongoing());
    }
}
