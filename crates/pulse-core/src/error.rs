use thiserror::Error;

/// Errors produced while building a chat activity report.
///
/// Malformed transcript lines are never errors; they are counted as noise.
/// The only failure is a transcript that cannot be opened or read.
#[derive(Error, Debug)]
pub enum PulseError {
    /// The transcript source could not be opened or read.
    #[error("Transcript unavailable ({origin}): {source}")]
    InputUnavailable {
        /// File path or a label such as `<stdin>`.
        origin: String,
        #[source]
        source: std::io::Error,
    },
}

impl PulseError {
    /// Wrap an I/O error raised while opening or reading `origin`.
    pub fn input_unavailable(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            origin: origin.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the pulse crates.
pub type Result<T> = std::result::Result<T, PulseError>;
