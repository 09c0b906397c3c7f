use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::window::ActivityWindow;

/// Path argument that selects standard input instead of a file.
pub const STDIN_MARKER: &str = "-";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Seven-day activity report for an exported group chat
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chat-pulse",
    about = "Seven-day activity report for an exported group chat",
    version
)]
pub struct Settings {
    /// Exported transcript file, or "-" to read standard input
    pub transcript: PathBuf,

    /// Output format
    #[arg(long, default_value = "json", value_parser = ["json", "pretty", "table"])]
    pub format: String,

    /// Window end date (YYYY-MM-DD) used when the transcript has no events
    #[arg(long, value_parser = parse_window_end)]
    pub today: Option<NaiveDate>,

    /// Logging level
    #[arg(
        long,
        env = "CHAT_PULSE_LOG_LEVEL",
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `true` when the transcript should be read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.transcript.as_os_str() == STDIN_MARKER
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

/// Parse `--today`, rejecting dates too early to end a full window.
fn parse_window_end(value: &str) -> Result<NaiveDate, String> {
    let date: NaiveDate = value
        .parse()
        .map_err(|e| format!("invalid date {:?}: {}", value, e))?;
    ActivityWindow::try_ending_at(date)
        .map(|_| date)
        .ok_or_else(|| format!("date {} is too early to end a seven-day window", date))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
