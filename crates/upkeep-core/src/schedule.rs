//! Schedule advancer: moves a plan's execution date forward by whole periods.
//!
//! "Now" is represented by today's calendar date. A date equal to today counts
//! as already reached and is advanced past.

use jiff::{civil::Date, ToSpan, Zoned};

use crate::{
    error::{Result, UpkeepError},
    models::{Frequency, Period},
};

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Adds one period to `date`.
///
/// Month periods keep the day of month and let it overflow into the next
/// month instead of clamping: January 31 plus one month is March 3 (March 2
/// in leap years).
pub fn advance(date: Date, period: Period) -> Result<Date> {
    match period {
        Period::Days(days) => date.checked_add(days.days()).map_err(out_of_range(date)),
        Period::Months(months) => {
            let index = i32::from(date.year()) * 12 + i32::from(date.month()) - 1 + months;
            let year = i16::try_from(index.div_euclid(12)).map_err(|_| UpkeepError::DateOutOfRange {
                message: format!("{date} plus {months} months"),
            })?;
            // rem_euclid(12) is always in 0..12
            let month = (index.rem_euclid(12) + 1) as i8;

            let first = Date::new(year, month, 1).map_err(out_of_range(date))?;
            first
                .checked_add(i64::from(date.day() - 1).days())
                .map_err(out_of_range(date))
        }
    }
}

/// Next date on which a plan with `frequency` should run.
///
/// Returns `start` unchanged when it is after `today`; otherwise adds whole
/// periods until the result is strictly after `today`. Every frequency has a
/// positive period so the loop always terminates; the only failure is leaving
/// the supported calendar range.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use upkeep_core::{models::Frequency, schedule::next_execution_date};
///
/// let today = date(2024, 3, 15);
/// let next = next_execution_date(date(2024, 1, 10), Frequency::Monthly, today).unwrap();
/// assert_eq!(next, date(2024, 4, 10));
///
/// // Future dates are kept as they are
/// let next = next_execution_date(date(2024, 6, 1), Frequency::Weekly, today).unwrap();
/// assert_eq!(next, date(2024, 6, 1));
/// ```
pub fn next_execution_date(start: Date, frequency: Frequency, today: Date) -> Result<Date> {
    let period = frequency.period();
    let mut next = start;
    while next <= today {
        next = advance(next, period)?;
    }
    Ok(next)
}

/// Execution date stored when a plan is created or rescheduled.
///
/// Starts from `start` (or `today` when there is none). A start date that is
/// today or later is kept so the first run happens on it; an earlier one is
/// advanced past today.
pub fn initial_execution_date(start: Option<Date>, frequency: Frequency, today: Date) -> Result<Date> {
    let base = start.unwrap_or(today);
    if base >= today {
        Ok(base)
    } else {
        next_execution_date(base, frequency, today)
    }
}

fn out_of_range(date: Date) -> impl FnOnce(jiff::Error) -> UpkeepError {
    move |e| UpkeepError::DateOutOfRange {
        message: format!("cannot advance {date}: {e}"),
    }
}
