mod bootstrap;
mod render;

use std::io::Write;

use anyhow::{Context, Result};
use pulse_core::settings::Settings;
use pulse_core::window;
use pulse_data::analysis::{analyze_reader_on, analyze_transcript_on};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("chat-pulse v{} starting", env!("CARGO_PKG_VERSION"));

    let today = settings.today.unwrap_or_else(window::today);

    let analysis = if settings.reads_stdin() {
        tracing::info!("Reading transcript from stdin");
        let stdin = std::io::stdin();
        analyze_reader_on(stdin.lock(), "<stdin>", today)
    } else {
        tracing::info!("Reading transcript {}", settings.transcript.display());
        analyze_transcript_on(&settings.transcript, today)
    }
    .context("could not analyse transcript")?;

    tracing::info!(
        "Scanned {} lines: {} joins, {} messages, {} noise",
        analysis.stats.lines_read,
        analysis.stats.join_events,
        analysis.stats.message_events,
        analysis.stats.noise_lines
    );

    let output = render::render(&analysis.report, &settings.format)
        .context("could not render report")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;

    Ok(())
}
