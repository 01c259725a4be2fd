use regex::Regex;
use tracing::{info, warn};

use crate::core::month::{summary_range, TargetMonth};
use crate::core::portal::{Session, SUMMARY_ENDPOINT};
use crate::scraper::{SalaryPair, SummaryScraper};
use crate::utils::error::Result;
use crate::utils::text::format_thousands;

/// A month-over-month change above this percentage is reported as a gap.
pub const GAP_THRESHOLD_PERCENT: f64 = 1.0;

/// Percentage change relative to the earlier month. `None` when the earlier
/// month paid nothing.
pub fn gap_percent(earlier: u64, later: u64) -> Option<f64> {
    if earlier == 0 {
        return None;
    }
    Some(100.0 * later.abs_diff(earlier) as f64 / earlier as f64)
}

pub fn is_anomalous(earlier: u64, later: u64) -> bool {
    match gap_percent(earlier, later) {
        Some(diff) => diff > GAP_THRESHOLD_PERCENT,
        None => later != 0,
    }
}

/// Renders salary figures for the console, hiding the leading digit groups in
/// private mode (`12,345` becomes `**,345`).
pub struct SalaryFormatter {
    private: bool,
    mask_regex: Regex,
}

impl SalaryFormatter {
    pub fn new(private: bool) -> Self {
        SalaryFormatter {
            private,
            mask_regex: Regex::new(r"[0-9]+,").unwrap(),
        }
    }

    pub fn mask(&self, formatted: &str) -> String {
        if self.private {
            self.mask_regex.replace_all(formatted, "**,").into_owned()
        } else {
            formatted.to_string()
        }
    }

    pub fn format(&self, salary: u64) -> String {
        self.mask(&format_thousands(salary))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Consistent {
        month: TargetMonth,
        salary: u64,
    },
    Gap {
        earlier_month: TargetMonth,
        earlier: u64,
        later_month: TargetMonth,
        later: u64,
    },
    /// The summary grid was missing or malformed.
    Unavailable,
}

impl Comparison {
    pub fn evaluate(pair: Option<SalaryPair>, earlier_month: TargetMonth, later_month: TargetMonth) -> Self {
        match pair {
            None => Comparison::Unavailable,
            Some(SalaryPair { earlier, later }) if is_anomalous(earlier, later) => Comparison::Gap {
                earlier_month,
                earlier,
                later_month,
                later,
            },
            Some(SalaryPair { later, .. }) => Comparison::Consistent {
                month: later_month,
                salary: later,
            },
        }
    }

    /// The later month's salary, if the summary could be read.
    pub fn salary(&self) -> Option<u64> {
        match self {
            Comparison::Consistent { salary, .. } => Some(*salary),
            Comparison::Gap { later, .. } => Some(*later),
            Comparison::Unavailable => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Comparison::Consistent { .. })
    }

    pub fn messages(&self, formatter: &SalaryFormatter) -> Vec<String> {
        match self {
            Comparison::Consistent { month, salary } => {
                vec![format!("The {} salary was {}", month.name(), formatter.format(*salary))]
            }
            Comparison::Gap {
                earlier_month,
                earlier,
                later_month,
                later,
            } => vec![
                "There is a large gap from the previous salary, please check your payslip.".to_string(),
                format!(
                    "The {} salary was {} while {} was {}",
                    earlier_month.name(),
                    formatter.format(*earlier),
                    later_month.name(),
                    formatter.format(*later)
                ),
            ],
            Comparison::Unavailable => vec!["Could not fetch the salary summary".to_string()],
        }
    }
}

pub struct SalaryComparator {
    scraper: SummaryScraper,
}

impl Default for SalaryComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl SalaryComparator {
    pub fn new() -> Self {
        Self {
            scraper: SummaryScraper::new(),
        }
    }

    /// Compares `month` against the month before it using the portal's salary summary.
    pub async fn compare(&self, session: &Session, month: TargetMonth) -> Result<Comparison> {
        let Some(earlier_month) = month.previous() else {
            warn!("No month before {} to compare against", month);
            return Ok(Comparison::Unavailable);
        };
        let range = summary_range(earlier_month, month);
        let form = [("__DatePicker_State", range.as_str())];

        let body = session
            .client()
            .post_form(SUMMARY_ENDPOINT, &form)
            .await?
            .text()
            .await?;

        let comparison = Comparison::evaluate(self.scraper.salary_pair(&body), earlier_month, month);
        match &comparison {
            Comparison::Consistent { salary, .. } => info!("Salary for {} is in line ({})", month, salary),
            Comparison::Gap { earlier, later, .. } => {
                warn!("Salary moved from {} to {} between {} and {}", earlier, later, earlier_month, month)
            }
            Comparison::Unavailable => warn!("Salary summary for {} could not be parsed", range),
        }

        Ok(comparison)
    }
}
