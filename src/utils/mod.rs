//! Utility modules for common functionality
//!
//! Provides the user-facing logger and text helpers for names and docs.

pub mod logger;
pub mod text;

pub use logger::{LogBuffer, Logger};
