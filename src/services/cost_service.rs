use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::job_posting::{JobType, WorkSchedule};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    #[error("{0} is required for this job type")]
    MissingField(&'static str),

    #[error("required_count must be at least 1")]
    InvalidCount,

    #[error("{0} must not be negative")]
    NegativeBudget(&'static str),

    #[error("season_months must be at least 1")]
    InvalidMonths,

    #[error("end_date must not be before start_date")]
    InvalidDateRange,

    #[error("Invalid time '{value}' on {date}, expected HH:MM")]
    InvalidTime { date: NaiveDate, value: String },

    #[error("Shift on {0} must end after it starts")]
    EmptyShift(NaiveDate),

    #[error("Budget is too large to price")]
    Overflow,
}

/// Budget inputs a customer supplies when posting a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobBudget {
    pub job_type: JobType,
    pub required_count: i32,
    pub monthly_budget: Option<Decimal>,
    pub hourly_budget: Option<Decimal>,
    pub season_months: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub working_hours: Option<WorkSchedule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub base: Decimal,
    pub service_fee: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub hours_worked: Option<Decimal>,
}

pub struct CostService;

impl CostService {
    pub fn service_fee_rate() -> Decimal {
        Decimal::new(12, 2)
    }

    pub fn vat_rate() -> Decimal {
        Decimal::new(20, 2)
    }

    pub fn quote(budget: &JobBudget) -> Result<CostBreakdown, CostError> {
        if budget.required_count < 1 {
            return Err(CostError::InvalidCount);
        }
        let count = Decimal::from(budget.required_count);

        let (base, hours_worked) = match budget.job_type {
            JobType::FullTime => {
                let monthly = require_budget(budget.monthly_budget, "monthly_budget")?;
                (mul(monthly, count)?, None)
            }
            JobType::PartTime => {
                let hourly = require_budget(budget.hourly_budget, "hourly_budget")?;
                let start = budget.start_date.ok_or(CostError::MissingField("start_date"))?;
                let end = budget.end_date.ok_or(CostError::MissingField("end_date"))?;
                let schedule = budget
                    .working_hours
                    .as_ref()
                    .ok_or(CostError::MissingField("working_hours"))?;
                let minutes = Decimal::from(minutes_worked(schedule, start, end)?);
                let sixty = Decimal::from(60);
                let base = mul(mul(hourly, count)?, minutes)?
                    .checked_div(sixty)
                    .ok_or(CostError::Overflow)?;
                (base, Some((minutes / sixty).round_dp(2)))
            }
            JobType::Seasonal => {
                let monthly = require_budget(budget.monthly_budget, "monthly_budget")?;
                let months = budget
                    .season_months
                    .ok_or(CostError::MissingField("season_months"))?;
                if months < 1 {
                    return Err(CostError::InvalidMonths);
                }
                (mul(mul(monthly, count)?, Decimal::from(months))?, None)
            }
        };

        Self::breakdown(base.round_dp(2), hours_worked)
    }

    /// Applies the service fee and VAT on top of `base`.
    pub fn breakdown(
        base: Decimal,
        hours_worked: Option<Decimal>,
    ) -> Result<CostBreakdown, CostError> {
        let service_fee = mul(base, Self::service_fee_rate())?;
        let subtotal = add(base, service_fee)?;
        let vat = mul(subtotal, Self::vat_rate())?;
        Ok(CostBreakdown {
            base,
            service_fee,
            vat,
            total: add(subtotal, vat)?,
            hours_worked,
        })
    }
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, CostError> {
    a.checked_mul(b).ok_or(CostError::Overflow)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, CostError> {
    a.checked_add(b).ok_or(CostError::Overflow)
}

fn require_budget(value: Option<Decimal>, field: &'static str) -> Result<Decimal, CostError> {
    let value = value.ok_or(CostError::MissingField(field))?;
    if value.is_sign_negative() {
        return Err(CostError::NegativeBudget(field));
    }
    Ok(value)
}

/// Sums shift lengths in minutes for every scheduled day within `start..=end`.
pub fn minutes_worked(
    schedule: &WorkSchedule,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, CostError> {
    if end < start {
        return Err(CostError::InvalidDateRange);
    }

    let mut total = 0;
    for (date, shift) in schedule.range(start..=end) {
        let from = parse_clock(*date, &shift.start)?;
        let to = parse_clock(*date, &shift.end)?;
        let minutes = (to - from).num_minutes();
        if minutes <= 0 {
            return Err(CostError::EmptyShift(*date));
        }
        total += minutes;
    }
    Ok(total)
}

fn parse_clock(date: NaiveDate, value: &str) -> Result<NaiveTime, CostError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| CostError::InvalidTime {
        date,
        value: value.to_string(),
    })
}
