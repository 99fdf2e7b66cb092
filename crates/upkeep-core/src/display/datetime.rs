//! Date and time display utilities.
//!
//! Timestamps are shown in the system time zone; calendar dates are shown as
//! stored, optionally with how they relate to today.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// Renders a timestamp in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Renders a scheduled date with a `today` or `overdue` marker.
pub struct DueDate {
    pub date: Date,
    pub today: Date,
}

impl DueDate {
    pub fn new(date: Date, today: Date) -> Self {
        Self { date, today }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        if self.date == self.today {
            write!(f, " (today)")
        } else if self.date < self.today {
            write!(f, " (overdue)")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_due_date_markers() {
        let today = date(2024, 6, 10);
        assert_eq!(DueDate::new(today, today).to_string(), "2024-06-10 (today)");
        assert_eq!(
            DueDate::new(date(2024, 6, 1), today).to_string(),
            "2024-06-01 (overdue)"
        );
        assert_eq!(DueDate::new(date(2024, 7, 1), today).to_string(), "2024-07-01");
    }
}
