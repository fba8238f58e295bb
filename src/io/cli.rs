//! Command-line interface and the session that drives a single analysis

use crate::analysis::pipeline::{AstigmatismAnalyzer, Rendering, SilentObserver, StageObserver};
use crate::io::configuration::{
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_RATIO_THRESHOLD, PipelineConfig,
};
use crate::io::error::{AnalysisError, Result};
use crate::io::image::export_rendering;
use crate::io::progress::StageProgress;
use crate::io::report::{write_failure, write_report, write_selection};
use crate::io::selection::{has_supported_extension, prompt_for_image};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};

#[derive(Parser, Debug)]
#[command(name = "corneafit")]
#[command(
    author,
    version,
    about = "Fit an ellipse to the outer eye contour and report its axis ratio"
)]
/// Command-line arguments for the eye image analysis
pub struct Cli {
    /// Eye image to analyze (prompts for a path when omitted)
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Save the displayed result (overlay, original or edge map) to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Lower hysteresis threshold of the edge detector
    #[arg(long, default_value_t = DEFAULT_CANNY_LOW)]
    pub canny_low: f32,

    /// Upper hysteresis threshold of the edge detector
    #[arg(long, default_value_t = DEFAULT_CANNY_HIGH)]
    pub canny_high: f32,

    /// Axis ratio above which astigmatism is suggested
    #[arg(short, long, default_value_t = DEFAULT_RATIO_THRESHOLD)]
    pub threshold: f64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log each pipeline stage to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Pipeline configuration assembled from the arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            ratio_threshold: self.threshold,
            ..PipelineConfig::default()
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most verbose log level to emit
    pub const fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::WARN }
    }
}

/// Drives one run: selection, analysis, console report and optional export
pub struct AnalysisSession {
    cli: Cli,
    progress: Option<StageProgress>,
}

impl AnalysisSession {
    /// Create a session for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(StageProgress::new);
        Self { cli, progress }
    }

    /// Replace the progress display, e.g. with [`StageProgress::hidden`]
    #[must_use]
    pub fn with_progress(mut self, progress: Option<StageProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Run the session end to end
    ///
    /// The image path comes from the arguments or, failing that, from a
    /// prompt written to `prompt` and answered on `input`. Every message for
    /// the user, including the diagnostic of a failed run, goes to `out`.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the run after it has been reported on
    /// `out`. [`AnalysisError::NoSelection`] marks a clean exit.
    pub fn run<R, W, P>(&mut self, input: &mut R, out: &mut W, prompt: &mut P) -> Result<()>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
        P: Write + ?Sized,
    {
        let outcome = self.execute(input, out, prompt);

        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        if let Err(ref error) = outcome {
            write_failure(out, error).map_err(console_error)?;
            if let Some(fallback) = error.fallback() {
                self.present(&fallback)?;
            }
        }

        outcome
    }

    fn execute<R, W, P>(&mut self, input: &mut R, out: &mut W, prompt: &mut P) -> Result<()>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
        P: Write + ?Sized,
    {
        let config = self.cli.pipeline_config();
        config.validate()?;

        let path = match self.cli.image.clone() {
            Some(path) => path,
            None => prompt_for_image(input, prompt)?.ok_or(AnalysisError::NoSelection)?,
        };

        write_selection(out, &path).map_err(console_error)?;
        if !has_supported_extension(&path) {
            debug!(path = %path.display(), "selected file has no recognised image extension");
        }

        let analyzer = AstigmatismAnalyzer::new(config);
        let mut silent = SilentObserver;
        let observer: &mut dyn StageObserver = match self.progress.as_mut() {
            Some(progress) => progress,
            None => &mut silent,
        };
        let report = analyzer.analyze_path(&path, observer)?;

        write_report(out, &report).map_err(console_error)?;
        self.present(&report.rendering())
    }

    // Stands in for showing the image: log it and save it when asked to
    fn present(&self, rendering: &Rendering) -> Result<()> {
        info!(title = rendering.title, "rendering ready");
        match self.cli.output {
            Some(ref output) => save_rendering(rendering, output),
            None => Ok(()),
        }
    }
}

fn save_rendering(rendering: &Rendering, output: &Path) -> Result<()> {
    export_rendering(rendering, output)?;
    info!(path = %output.display(), "saved rendering");
    Ok(())
}

fn console_error(source: std::io::Error) -> AnalysisError {
    AnalysisError::FileSystem {
        path: PathBuf::from("<stdout>"),
        operation: "write report",
        source,
    }
}
