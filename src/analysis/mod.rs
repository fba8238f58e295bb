//! The analysis pipeline and its rendered output

/// Ellipse overlay drawing
pub mod overlay;
/// Stage sequencing, observation and the analysis report
pub mod pipeline;
