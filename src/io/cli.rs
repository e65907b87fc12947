//! Command-line interface for batch rendering of sample files

use crate::io::configuration::{LINEAR_OUTPUT_SUFFIX, LOG_OUTPUT_SUFFIX};
use crate::io::error::Result;
use crate::io::loader::SampleSet;
use crate::io::progress::{ProgressManager, Stage};
use crate::render::linear::render_linear_contour;
use crate::render::log::render_log_contour;
use crate::render::output_path;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "scatter-contour")]
#[command(
    author,
    version,
    about = "Render linear and log-log contour plots of scattered (x, y, z) samples"
)]
/// Command-line arguments: the sample files to plot
pub struct Cli {
    /// Text files holding three whitespace-separated columns x, y, z
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

/// Input path with its last extension removed, parent directory kept
pub fn output_stem(input: &Path) -> PathBuf {
    input.with_extension("")
}

/// Paths of the linear and log plots written for an input file
pub fn output_paths(input: &Path) -> [PathBuf; 2] {
    let stem = output_stem(input);
    [
        output_path(&stem, LINEAR_OUTPUT_SUFFIX),
        output_path(&stem, LOG_OUTPUT_SUFFIX),
    ]
}

/// Orchestrates batch processing of sample files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a file processor that reports progress on the terminal
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: Some(ProgressManager::new()),
        }
    }

    /// Create a file processor without any progress display
    pub const fn without_progress(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Render both plots for every file, in argument order
    ///
    /// # Errors
    ///
    /// Returns the first loading, interpolation or export error; files after
    /// the failing one are not processed
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let files = self.cli.files.clone();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len() * 2);
        for (index, file) in files.iter().enumerate() {
            written.extend(self.process_file(file, index)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<[PathBuf; 2]> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let samples = SampleSet::from_path(input_path)?;
        self.finish_stage(index, Stage::Load);

        let stem = output_stem(input_path);
        let linear = render_linear_contour(&samples, &stem)?;
        self.finish_stage(index, Stage::Contour);

        let log = render_log_contour(&samples, &stem)?;
        self.finish_stage(index, Stage::LogContour);

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok([linear, log])
    }

    fn finish_stage(&mut self, index: usize, stage: Stage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_stage(index, stage);
        }
    }
}
