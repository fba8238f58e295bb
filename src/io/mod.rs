//! Input/output: arguments, prompting, decoding, reporting and errors

/// Command-line arguments and the single-run session
pub mod cli;
/// Pipeline constants and runtime configuration
pub mod configuration;
/// Error taxonomy and result alias
pub mod error;
/// Image decoding and rendering export
pub mod image;
/// Stage progress display
pub mod progress;
/// Console text for results and diagnostics
pub mod report;
/// Interactive image path prompt
pub mod selection;
