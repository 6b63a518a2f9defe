//! Future observation dates for forecasts

use crate::catalog::Frequency;
use crate::error::{AnalyticsError, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Create `periods` dates following `last` at the given cadence.
///
/// - Daily steps to the next business day, skipping Saturdays and Sundays.
/// - Weekly adds seven days per step.
/// - Monthly, quarterly and annual add 1, 3 and 12 calendar months per step,
///   counted from `last` so that a month-end start clamps each step
///   independently (Jan 31 -> Feb 29 -> Mar 31).
pub fn future_dates(
    last: NaiveDate,
    periods: usize,
    frequency: Frequency,
) -> Result<Vec<NaiveDate>> {
    // A horizon that cannot fit before the end of the calendar fails up front
    let days_left = (NaiveDate::MAX - last).num_days();
    let max_periods = days_left / min_step_days(frequency);
    if i64::try_from(periods).map_or(true, |periods| periods > max_periods) {
        return Err(out_of_range());
    }

    let mut dates = Vec::with_capacity(periods);

    match frequency {
        Frequency::Daily => {
            let mut current = last;
            for _ in 0..periods {
                current = next_business_day(current)?;
                dates.push(current);
            }
        }
        Frequency::Weekly => {
            for step in 1..=periods {
                let days = 7 * step as u64;
                dates.push(last.checked_add_days(Days::new(days)).ok_or_else(out_of_range)?);
            }
        }
        Frequency::Monthly | Frequency::Quarterly | Frequency::Annual => {
            let months_per_step = match frequency {
                Frequency::Quarterly => 3,
                Frequency::Annual => 12,
                _ => 1,
            };
            for step in 1..=periods {
                dates.push(add_months(last, months_per_step * step)?);
            }
        }
    }

    Ok(dates)
}

/// Fewest calendar days a single step can advance
fn min_step_days(frequency: Frequency) -> i64 {
    match frequency {
        Frequency::Daily => 1,
        Frequency::Weekly => 7,
        Frequency::Monthly => 28,
        Frequency::Quarterly => 89,
        Frequency::Annual => 365,
    }
}

fn out_of_range() -> AnalyticsError {
    AnalyticsError::InvalidParameter(
        "Forecast horizon runs past the supported date range".to_string(),
    )
}

fn add_months(date: NaiveDate, months: usize) -> Result<NaiveDate> {
    let months = u32::try_from(months).map_err(|_| out_of_range())?;
    date.checked_add_months(Months::new(months))
        .ok_or_else(out_of_range)
}

fn next_business_day(date: NaiveDate) -> Result<NaiveDate> {
    let mut next = date.succ_opt().ok_or_else(out_of_range)?;
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next = next.succ_opt().ok_or_else(out_of_range)?;
    }
    Ok(next)
}
