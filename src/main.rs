//! CLI entry point: render contour plots for each sample file given

use clap::Parser;
use scatter_contour::io::cli::{Cli, FileProcessor};

fn main() -> scatter_contour::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
