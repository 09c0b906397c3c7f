//! Transcript ingestion for chat-pulse.
//!
//! Classifies exported chat lines, indexes joins and messages by calendar
//! date, and aggregates them over the trailing seven-day window.

pub mod aggregator;
pub mod analysis;
pub mod classifier;
pub mod reader;

pub use pulse_core as core;
