//! Terminal progress display for pipeline stages

use crate::analysis::pipeline::{Stage, StageObserver};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar advancing once per pipeline stage
///
/// The bar draws to stderr so it never interleaves with the report on
/// stdout.
pub struct StageProgress {
    bar: ProgressBar,
}

impl Default for StageProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgress {
    /// Create a visible progress bar sized to the number of stages
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(Stage::ALL.len() as u64))
    }

    /// Create a bar that tracks progress without drawing anything
    pub fn hidden() -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(Stage::ALL.len() as u64);
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        bar.set_style(STAGE_STYLE.clone());
        Self { bar }
    }

    /// Number of stages already completed
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Label of the stage currently running
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Mark every stage done and remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.set_position(Stage::ALL.len() as u64);
        self.bar.finish_and_clear();
    }
}

impl StageObserver for StageProgress {
    fn stage_started(&mut self, stage: Stage) {
        self.bar.set_position(stage.ordinal() as u64);
        self.bar.set_message(stage.label());
    }
}
