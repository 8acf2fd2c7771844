use chrono::{Datelike, Months, NaiveDate};

/// A calendar month, displayed and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Month {
    first_day: NaiveDate,
}

impl Month {
    pub(crate) fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Accepts `YYYY-MM` and `YYYY-M`.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub(crate) fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub(crate) fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Month prefix filter: true when `date` falls in this month.
    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub(crate) fn next(&self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map_or(*self, |first_day| Self { first_day })
    }

    pub(crate) fn prev(&self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map_or(*self, |first_day| Self { first_day })
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
