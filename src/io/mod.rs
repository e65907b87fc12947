//! Input/output: sample loading, PNG export, command line and progress

/// Command-line interface and batch driver
pub mod cli;
/// Plot constants and rendering defaults
pub mod configuration;
/// Error type shared by the crate
pub mod error;
/// Sample file parsing
pub mod loader;
/// PNG encoding with resolution metadata
pub mod png;
/// Terminal progress display
pub mod progress;
