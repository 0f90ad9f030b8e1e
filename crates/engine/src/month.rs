use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};

use crate::EngineError;

/// A calendar month (`YYYY-MM`), the scope every expense belongs to.
///
/// A record's effective month is always derived from its date; `Month` is the
/// validated key used for loads, salaries and apply targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(format!(
                "month out of range: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month a calendar day falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The following month.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month.
    #[must_use]
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month `n` months after this one.
    #[must_use]
    pub fn plus(self, n: u32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + n as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Number of days in this month, leap-aware.
    #[must_use]
    pub fn days(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// Clamps a day-of-month into this month's valid range.
    #[must_use]
    pub fn clamp_day(self, day: u32) -> u32 {
        day.clamp(1, self.days())
    }

    /// The calendar day for `day`, clamped into this month.
    ///
    /// Day 31 of a 30-day month lands on the 30th, never on an invalid date.
    #[must_use]
    pub fn date_on(self, day: u32) -> NaiveDate {
        let day = self.clamp_day(day);
        // Unreachable fallback: the clamp guarantees a valid (y, m, d).
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Inclusive iterator from this month through `end`.
    ///
    /// Empty when `end` precedes `self`.
    pub fn through(self, end: Month) -> impl Iterator<Item = Month> {
        let mut cursor = self;
        let mut done = end < self;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let current = cursor;
            if current == end {
                done = true;
            } else {
                cursor = cursor.next();
            }
            Some(current)
        })
    }

    /// Human label, e.g. `August 2026`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth(format!("expected YYYY-MM, got '{s}'"));

        let (year_str, month_str) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        Month::new(year, month)
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let month: Month = "2026-08".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 8);
        assert_eq!(month.to_string(), "2026-08");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!("2026".parse::<Month>().is_err());
        assert!("2026-13".parse::<Month>().is_err());
        assert!("2026-00".parse::<Month>().is_err());
        assert!("26-08".parse::<Month>().is_err());
        assert!("2026-8".parse::<Month>().is_err());
    }

    #[test]
    fn next_and_prev_wrap_across_years() {
        let december: Month = "2025-12".parse().unwrap();
        assert_eq!(december.next().to_string(), "2026-01");
        assert_eq!(december.next().prev(), december);
    }

    #[test]
    fn days_are_leap_aware() {
        assert_eq!("2026-02".parse::<Month>().unwrap().days(), 28);
        assert_eq!("2028-02".parse::<Month>().unwrap().days(), 29);
        assert_eq!("2100-02".parse::<Month>().unwrap().days(), 28);
        assert_eq!("2026-06".parse::<Month>().unwrap().days(), 30);
        assert_eq!("2026-07".parse::<Month>().unwrap().days(), 31);
    }

    #[test]
    fn date_on_clamps_day_into_month() {
        let june: Month = "2026-06".parse().unwrap();
        assert_eq!(
            june.date_on(31),
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
        );
        let february: Month = "2026-02".parse().unwrap();
        assert_eq!(
            february.date_on(31),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(june.date_on(0), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    }

    #[test]
    fn through_is_inclusive_and_ordered() {
        let start: Month = "2025-11".parse().unwrap();
        let end: Month = "2026-02".parse().unwrap();
        let months: Vec<String> = start.through(end).map(|m| m.to_string()).collect();
        assert_eq!(months, ["2025-11", "2025-12", "2026-01", "2026-02"]);

        assert_eq!(end.through(start).count(), 0);
        assert_eq!(start.through(start).count(), 1);
    }

    #[test]
    fn plus_advances_across_years() {
        let start: Month = "2026-08".parse().unwrap();
        assert_eq!(start.plus(0), start);
        assert_eq!(start.plus(5).to_string(), "2027-01");
        assert_eq!(start.plus(12).to_string(), "2027-08");
    }
}
