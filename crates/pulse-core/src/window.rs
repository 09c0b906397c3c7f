//! The trailing seven-day window reports are aligned to.

use chrono::{Days, Local, NaiveDate};

/// Number of days covered by a report.
pub const WINDOW_DAYS: usize = 7;

/// Minimum number of active days within the window for a user to count as
/// a frequent participant.
pub const FREQUENT_DAY_THRESHOLD: usize = 4;

/// Date format used for window keys, e.g. `"2021-04-01"`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Seven consecutive calendar dates, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    days: [NaiveDate; WINDOW_DAYS],
}

impl ActivityWindow {
    /// The window whose last day is `last`, or `None` when the first day
    /// would fall before [`NaiveDate::MIN`].
    pub fn try_ending_at(last: NaiveDate) -> Option<Self> {
        let mut days = [last; WINDOW_DAYS];
        for (offset, day) in days.iter_mut().rev().enumerate() {
            *day = last.checked_sub_days(Days::new(offset as u64))?;
        }
        Some(Self { days })
    }

    /// The window whose last day is `last`.
    ///
    /// Near [`NaiveDate::MIN`] the window starts at `NaiveDate::MIN` instead,
    /// so it still holds seven consecutive days.
    pub fn ending_at(last: NaiveDate) -> Self {
        Self::try_ending_at(last).unwrap_or_else(Self::starting_at_min)
    }

    fn starting_at_min() -> Self {
        let mut days = [NaiveDate::MIN; WINDOW_DAYS];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = NaiveDate::MIN
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(NaiveDate::MIN);
        }
        Self { days }
    }

    /// The window ending at `latest` when an event was observed, otherwise
    /// ending at `fallback`.
    pub fn resolve(latest: Option<NaiveDate>, fallback: NaiveDate) -> Self {
        Self::ending_at(latest.unwrap_or(fallback))
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[WINDOW_DAYS - 1]
    }

    /// Window dates rendered with [`DATE_KEY_FORMAT`].
    pub fn date_keys(&self) -> Vec<String> {
        self.days
            .iter()
            .map(|d| d.format(DATE_KEY_FORMAT).to_string())
            .collect()
    }
}

/// The local calendar date, used when a transcript yields no events.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
