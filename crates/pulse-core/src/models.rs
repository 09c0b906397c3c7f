use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A transcript line that matched the entry pattern and carried a valid
/// date and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedEntry {
    /// Calendar date printed at the start of the line.
    pub date: NaiveDate,
    /// Time of day printed after the date.
    pub time: NaiveTime,
    /// Everything after the ` - ` separator.
    pub payload: String,
}

/// A user-level event derived from a [`TimestampedEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `user` joined the chat through the group invite link.
    Join { user: String, date: NaiveDate },
    /// `user` sent a message.
    Message { user: String, date: NaiveDate },
}

/// Per-day activity over the trailing 7-day window.
///
/// Field names on the wire follow the upload service's response body:
/// `dates`, `active_users_count`, `new_users_count`, `active_users_4days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Window dates as `YYYY-MM-DD`, oldest first.
    pub dates: Vec<String>,
    /// Distinct message senders per window date.
    #[serde(rename = "active_users_count")]
    pub message_counts: Vec<usize>,
    /// Distinct joiners per window date.
    #[serde(rename = "new_users_count")]
    pub join_counts: Vec<usize>,
    /// Users present on at least four of the window's days.
    #[serde(rename = "active_users_4days")]
    pub frequent_users: BTreeSet<String>,
}

impl Report {
    /// Serialise to the response body, optionally pretty-printed.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Headline figures derived from the per-day counts.
    pub fn summary(&self) -> ReportSummary {
        let total_active: usize = self.message_counts.iter().sum();
        let total_joined: usize = self.join_counts.iter().sum();
        let peak_active = self.message_counts.iter().copied().max().unwrap_or(0);

        let peak_date = if peak_active == 0 {
            None
        } else {
            self.message_counts
                .iter()
                .position(|&c| c == peak_active)
                .and_then(|i| self.dates.get(i).cloned())
        };

        let days = self.dates.len().max(1) as f64;
        let average_daily = (total_active as f64 / days).round() as usize;

        ReportSummary {
            total_active,
            total_joined,
            frequent_user_count: self.frequent_users.len(),
            peak_active,
            peak_date,
            average_daily,
        }
    }
}

/// Totals shown above the per-day breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Sum of the daily active-user counts (a user counts once per day).
    pub total_active: usize,
    /// Sum of the daily join counts.
    pub total_joined: usize,
    pub frequent_user_count: usize,
    /// Highest daily active-user count.
    pub peak_active: usize,
    /// First date reaching `peak_active`; `None` when no one was active.
    pub peak_date: Option<String>,
    /// `total_active / 7`, rounded.
    pub average_daily: usize,
}
