//! Transcript opening and line scanning.
//!
//! Reads an exported chat transcript one line at a time and feeds each
//! line to a [`TranscriptAggregator`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pulse_core::error::{PulseError, Result};
use tracing::debug;

use crate::aggregator::TranscriptAggregator;

/// Open a transcript file for buffered reading.
pub fn open_transcript(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .map_err(|e| PulseError::input_unavailable(path.display().to_string(), e))?;
    Ok(BufReader::new(file))
}

/// Split one `read_until(b'\n')` chunk into lines.
///
/// A chunk holds at most one `\n`, at its end. `\r\n` ends a single line;
/// any other `\r` also ends a line.
fn split_line_endings(chunk: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    let body = body.strip_suffix(b"\r").unwrap_or(body);
    body.split(|&b| b == b'\r')
}

/// Feed every line of `reader` to `aggregator`, in order.
///
/// Lines end at `\n`, `\r\n`, or a lone `\r`. Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// damaged line degrades to noise. A failing read aborts the scan with
/// [`PulseError::InputUnavailable`] labelled with `origin`.
pub fn scan_lines<R: BufRead>(
    mut reader: R,
    origin: &str,
    aggregator: &mut TranscriptAggregator,
) -> Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut lossy_lines = 0u64;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| PulseError::input_unavailable(origin, e))?;
        if read == 0 {
            break;
        }

        for line in split_line_endings(&buf) {
            match std::str::from_utf8(line) {
                Ok(line) => aggregator.feed_line(line),
                Err(_) => {
                    lossy_lines += 1;
                    aggregator.feed_line(&String::from_utf8_lossy(line));
                }
            }
        }
    }

    let stats = aggregator.stats();
    debug!(
        "Transcript {}: {} lines, {} blank, {} noise, {} joins, {} messages",
        origin,
        stats.lines_read,
        stats.blank_lines,
        stats.noise_lines,
        stats.join_events,
        stats.message_events,
    );
    if lossy_lines > 0 {
        debug!(
            "Transcript {}: {} lines contained invalid UTF-8",
            origin, lossy_lines
        );
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::{Cursor, Read, Write};
    use tempfile::TempDir;

    fn fallback() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    /// Yields `good` once, then fails every subsequent read.
    struct FailingReader {
        good: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.good.read(buf)?;
            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "stream reset",
                ));
            }
            Ok(n)
        }
    }

    // ── open_transcript ───────────────────────────────────────────────────────

    #[test]
    fn test_open_transcript_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = open_transcript(&missing).unwrap_err();
        let PulseError::InputUnavailable { origin, source } = err;
        assert!(origin.ends_with("nope.txt"));
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_transcript_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "4/1/21, 9:55 PM - Alice: Hello").unwrap();

        let mut reader = open_transcript(&path).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert!(line.starts_with("4/1/21"));
    }

    // ── scan_lines ────────────────────────────────────────────────────────────

    #[test]
    fn test_scan_lines_feeds_every_line() {
        let input = "4/1/21, 9:00 AM - Alice joined using this group's invite link\n\
                     4/1/21, 9:05 AM - Alice: hi\n\
                     \n\
                     a wrapped continuation line\n";
        let mut agg = TranscriptAggregator::with_fallback_date(fallback());
        scan_lines(Cursor::new(input), "<test>", &mut agg).unwrap();

        let stats = agg.stats();
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.noise_lines, 1);
        assert_eq!(stats.join_events, 1);
        assert_eq!(stats.message_events, 1);
    }

    #[test]
    fn test_scan_lines_handles_crlf_and_missing_final_newline() {
        let input = "4/1/21, 9:00 AM - Alice: hi\r\n4/1/21, 9:01 AM - Bob: yo";
        let mut agg = TranscriptAggregator::with_fallback_date(fallback());
        scan_lines(Cursor::new(input), "<test>", &mut agg).unwrap();

        assert_eq!(agg.stats().lines_read, 2);
        assert_eq!(agg.stats().blank_lines, 0);
        let report = agg.report();
        assert_eq!(report.message_counts[6], 2);
    }

    #[test]
    fn test_scan_lines_handles_lone_cr() {
        let input = "4/1/21, 9:00 AM - A: x\r4/2/21, 9:00 AM - B: y\r";
        let mut agg = TranscriptAggregator::with_fallback_date(fallback());
        scan_lines(Cursor::new(input), "<test>", &mut agg).unwrap();

        assert_eq!(agg.stats().lines_read, 2);
        let report = agg.report();
        assert_eq!(report.dates[6], "2021-04-02");
        assert_eq!(report.message_counts, vec![0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_split_line_endings_mixed() {
        let split = |chunk: &[u8]| -> Vec<String> {
            split_line_endings(chunk)
                .map(|l| String::from_utf8_lossy(l).into_owned())
                .collect()
        };
        assert_eq!(split(b"a\rb\r\rc\r\n"), vec!["a", "b", "", "c"]);
        assert_eq!(split(b"a\r"), vec!["a"]);
        assert_eq!(split(b"\n"), vec![""]);
    }

    #[test]
    fn test_scan_lines_empty_input() {
        let mut agg = TranscriptAggregator::with_fallback_date(fallback());
        scan_lines(Cursor::new(""), "<test>", &mut agg).unwrap();
        assert_eq!(agg.stats().lines_read, 0);
    }

    #[test]
    fn test_scan_lines_invalid_utf8_is_not_fatal() {
        let mut input: Vec<u8> = b"4/1/21, 9:00 AM - Alice: caf".to_vec();
        input.extend_from_slice(&[0xff, 0xfe]);
        input.extend_from_slice(b"\n4/1/21, 9:01 AM - Bob: ok\n");

        let mut agg = TranscriptAggregator::with_fallback_date(fallback());
        scan_lines(Cursor::new(input), "<test>", &mut agg).unwrap();

        // The damaged bytes sit in the message body, so the sender survives.
        assert_eq!(agg.report().message_counts[6], 2);
    }

    #[test]
    fn test_scan_lines_read_failure_is_input_unavailable() {
        let reader = BufReader::new(FailingReader {
            good: Cursor::new(b"4/1/21, 9:00 AM - Alice: hi\n".to_vec()),
        });
        let mut agg = TranscriptAggregator::with_fallback_date(fallback());

        let err = scan_lines(reader, "<stdin>", &mut agg).unwrap_err();
        let PulseError::InputUnavailable { origin, source } = err;
        assert_eq!(origin, "<stdin>");
        assert_eq!(source.kind(), std::io::ErrorKind::ConnectionReset);
    }
}
