//! Console text for selections, results and diagnostics

use crate::analysis::pipeline::AnalysisReport;
use crate::io::error::AnalysisError;
use crate::io::image::display_name;
use std::fmt;
use std::io::Write;
use std::path::Path;

/// First line of the results block
pub const RESULTS_HEADER: &str = "--- Analysis Results ---";
/// Last line of the results block
pub const RESULTS_FOOTER: &str = "------------------------";

/// Announce the chosen image by file name
///
/// # Errors
///
/// Propagates write failures of `out`
pub fn write_selection<W: Write + ?Sized>(out: &mut W, path: &Path) -> std::io::Result<()> {
    writeln!(out, "Selected image: {}", display_name(path))
}

/// Print any warning followed by the results block
///
/// # Errors
///
/// Propagates write failures of `out`
pub fn write_report<W: Write + ?Sized>(out: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    if let Some(warning) = report.warning() {
        writeln!(out, "{warning}")?;
    }
    writeln!(out, "{report}")
}

/// Print the diagnostic for a run that could not finish
///
/// # Errors
///
/// Propagates write failures of `out`
pub fn write_failure<W: Write + ?Sized>(out: &mut W, error: &AnalysisError) -> std::io::Result<()> {
    writeln!(out, "{error}")
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y] = self.ellipse.center();
        writeln!(f)?;
        writeln!(f, "{RESULTS_HEADER}")?;
        writeln!(f, "Center of Ellipse: ({x:.2}, {y:.2})")?;
        writeln!(f, "Major Axis Length: {:.2} pixels", self.ellipse.major_axis())?;
        writeln!(f, "Minor Axis Length: {:.2} pixels", self.ellipse.minor_axis())?;
        writeln!(f, "Orientation Angle: {:.2} degrees", self.ellipse.angle())?;
        writeln!(f, "Axis Ratio (Major/Minor): {}", self.ratio)?;
        writeln!(f)?;
        writeln!(f, "Interpretation: {}", self.classification.headline())?;
        writeln!(f, "{}", self.classification.detail())?;
        writeln!(f)?;
        write!(f, "{RESULTS_FOOTER}")
    }
}
