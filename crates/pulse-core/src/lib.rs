//! Shared types for chat-pulse.
//!
//! Domain models, the seven-day activity window, the error type, CLI
//! settings and text formatting used by the data layer and the binary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod window;
