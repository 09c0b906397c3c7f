//! Top-level entry points: transcript in, [`Report`] out.

use std::io::BufRead;
use std::path::Path;

use chrono::NaiveDate;
use pulse_core::error::Result;
use pulse_core::models::Report;
use pulse_core::window;
use tracing::{debug, warn};

use crate::aggregator::{ScanStats, TranscriptAggregator};
use crate::reader::{open_transcript, scan_lines};

/// The complete output of one analysis pass.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub stats: ScanStats,
}

/// Analyse the transcript file at `path`.
///
/// The file is closed before this returns, on success or failure.
pub fn analyze_transcript(path: &Path) -> Result<Analysis> {
    analyze_transcript_on(path, window::today())
}

/// Like [`analyze_transcript`] with an explicit fallback window end.
pub fn analyze_transcript_on(path: &Path, today: NaiveDate) -> Result<Analysis> {
    let reader = open_transcript(path)?;
    analyze_reader_on(reader, &path.display().to_string(), today)
}

/// Analyse any buffered line source. `origin` labels errors and logs.
pub fn analyze_reader<R: BufRead>(reader: R, origin: &str) -> Result<Analysis> {
    analyze_reader_on(reader, origin, window::today())
}

/// Analyse `reader`; the window ends at `today` if no events are found.
pub fn analyze_reader_on<R: BufRead>(
    reader: R,
    origin: &str,
    today: NaiveDate,
) -> Result<Analysis> {
    let mut aggregator = TranscriptAggregator::with_fallback_date(today);
    scan_lines(reader, origin, &mut aggregator)?;

    if aggregator.latest_date().is_none() {
        warn!(
            "No join or message lines found in {}; window ends at {}",
            origin, today
        );
    }

    let window = aggregator.window();
    let (report, stats) = aggregator.finish();
    debug!(
        "Report for {}: window {}..{}, {} frequent users",
        origin,
        window.first(),
        window.last(),
        report.frequent_users.len()
    );

    Ok(Analysis { report, stats })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
