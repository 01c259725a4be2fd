use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

/// Largest lookback accepted, one hundred years.
pub const MAX_LOOKBACK: u32 = 1200;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetMonth(NaiveDate);

impl TargetMonth {
    /// The month `1 + lookback` whole months before `today`'s month.
    /// `None` past [`MAX_LOOKBACK`] or when the month or the one before it
    /// falls outside the calendar.
    pub fn from_lookback(today: NaiveDate, lookback: u32) -> Option<Self> {
        if lookback > MAX_LOOKBACK {
            return None;
        }

        let month = Self::months_before(today, lookback + 1)?;
        month.previous()?;
        Some(month)
    }

    pub fn months_before(today: NaiveDate, months: u32) -> Option<Self> {
        let first_day = today.with_day(1)?;
        first_day.checked_sub_months(Months::new(months)).map(Self)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::months_before(self.0, 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// English month name, e.g. `September`.
    pub fn name(&self) -> String {
        self.0.format("%B").to_string()
    }

    /// `01/MM/YYYY`, the payslip endpoint's `Date` parameter.
    pub fn payslip_date(&self) -> String {
        self.0.format("01/%m/%Y").to_string()
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%B %Y"))
    }
}

/// Date picker state covering day 1 of `from` through day 30 of `to`.
pub fn summary_range(from: TargetMonth, to: TargetMonth) -> String {
    format!(
        "{},0,{},0",
        from.first_day().format("01/%m/%Y"),
        to.first_day().format("30/%m/%Y")
    )
}
