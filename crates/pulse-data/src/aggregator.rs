//! Per-day user indices and the seven-day window aggregation.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use pulse_core::models::{Event, Report};
use pulse_core::window::{self, ActivityWindow, FREQUENT_DAY_THRESHOLD};

use crate::classifier::{classify_line, LineClass};

// ── DailyIndex ────────────────────────────────────────────────────────────────

/// Calendar date → distinct users seen on that date.
#[derive(Debug, Clone, Default)]
pub struct DailyIndex {
    days: BTreeMap<NaiveDate, HashSet<String>>,
}

impl DailyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `user` on `date`. Returns `false` when already present.
    pub fn insert(&mut self, date: NaiveDate, user: impl Into<String>) -> bool {
        self.days.entry(date).or_default().insert(user.into())
    }

    pub fn users_on(&self, date: NaiveDate) -> Option<&HashSet<String>> {
        self.days.get(&date)
    }

    /// Number of distinct users on `date` (zero for dates never seen).
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.days.get(&date).map_or(0, HashSet::len)
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }
}

// ── ScanStats ─────────────────────────────────────────────────────────────────

/// Line counters collected while feeding a transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_read: u64,
    pub blank_lines: u64,
    pub noise_lines: u64,
    pub join_events: u64,
    pub message_events: u64,
}

// ── TranscriptAggregator ──────────────────────────────────────────────────────

/// Single-pass accumulator turning transcript lines into a [`Report`].
#[derive(Debug, Clone)]
pub struct TranscriptAggregator {
    joins: DailyIndex,
    messages: DailyIndex,
    stats: ScanStats,
    fallback_date: NaiveDate,
}

impl Default for TranscriptAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptAggregator {
    /// An aggregator whose window falls back to the local current date.
    pub fn new() -> Self {
        Self::with_fallback_date(window::today())
    }

    /// An aggregator whose window ends at `fallback_date` when no events are
    /// recorded.
    pub fn with_fallback_date(fallback_date: NaiveDate) -> Self {
        Self {
            joins: DailyIndex::new(),
            messages: DailyIndex::new(),
            stats: ScanStats::default(),
            fallback_date,
        }
    }

    /// Classify one raw line and record any event it carries.
    pub fn feed_line(&mut self, raw: &str) {
        self.stats.lines_read += 1;
        match classify_line(raw) {
            LineClass::Blank => self.stats.blank_lines += 1,
            LineClass::Noise => self.stats.noise_lines += 1,
            LineClass::Event(event) => self.record(event),
        }
    }

    /// Add an already-classified event to its index.
    pub fn record(&mut self, event: Event) {
        match event {
            Event::Join { user, date } => {
                self.stats.join_events += 1;
                self.joins.insert(date, user);
            }
            Event::Message { user, date } => {
                self.stats.message_events += 1;
                self.messages.insert(date, user);
            }
        }
    }

    /// Latest date across both indices.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.joins.latest_date().max(self.messages.latest_date())
    }

    pub fn window(&self) -> ActivityWindow {
        ActivityWindow::resolve(self.latest_date(), self.fallback_date)
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Build the report for the trailing window.
    pub fn report(&self) -> Report {
        let window = self.window();
        let days = window.days();

        let message_counts = days.iter().map(|&d| self.messages.count_on(d)).collect();
        let join_counts = days.iter().map(|&d| self.joins.count_on(d)).collect();

        // Each daily set holds a user at most once, so this counts active days.
        let mut active_days: HashMap<&str, usize> = HashMap::new();
        for &day in days {
            if let Some(users) = self.messages.users_on(day) {
                for user in users {
                    *active_days.entry(user.as_str()).or_insert(0) += 1;
                }
            }
        }

        let frequent_users: BTreeSet<String> = active_days
            .into_iter()
            .filter(|&(_, count)| count >= FREQUENT_DAY_THRESHOLD)
            .map(|(user, _)| user.to_string())
            .collect();

        Report {
            dates: window.date_keys(),
            message_counts,
            join_counts,
            frequent_users,
        }
    }

    /// Consume the aggregator, returning the report and the scan counters.
    pub fn finish(self) -> (Report, ScanStats) {
        (self.report(), self.stats)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
