//! End-to-end run: load, plot, report
//!
//! Console lines mirror each step. Failures are reported on the console and
//! also returned as an [`AnalysisError`], whose [`AnalysisError::exit_code`]
//! lets the binary signal which step failed.

use std::path::PathBuf;

use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::pipeline::{describe_columns, load_dataset, LoadError};
use crate::plot::{generate_plots, ChartRenderer, PlotArtifact, PlotError};
use crate::report::{display_column_profile, write_readme, ReportError};
use crate::utils::{
    create_spinner, finish_and_clear, print_error, print_success, print_warning,
};

/// Exit status for a failed load
pub const EXIT_LOAD_FAILED: u8 = 2;

/// Exit status for a failure after loading (output directory, statistics, report)
pub const EXIT_ANALYSIS_FAILED: u8 = 3;

/// Failure of a whole run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl AnalysisError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::Load(_) => EXIT_LOAD_FAILED,
            AnalysisError::Plot(_) | AnalysisError::Report(_) => EXIT_ANALYSIS_FAILED,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub output_dir: PathBuf,
    pub readme: PathBuf,
    pub artifacts: Vec<PlotArtifact>,
    pub rows: usize,
    pub columns: usize,
}

/// Options that only affect console output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    /// Print the column profile table after loading
    pub show_profile: bool,
}

/// Run the full analysis for one input file.
///
/// Nothing is created on disk when loading fails.
pub fn run_analysis(
    config: &AnalysisConfig,
    renderer: &dyn ChartRenderer,
    console: ConsoleOptions,
) -> Result<AnalysisOutcome, AnalysisError> {
    let spinner = create_spinner("Loading dataset...");
    let loaded = load_dataset(&config.input, config.encoding);
    finish_and_clear(&spinner);

    let df = match loaded {
        Ok(df) => df,
        Err(e) => {
            print_error(&format!("Failed to load dataset: {}", e));
            return Err(e.into());
        }
    };
    print_success(&format!("Dataset loaded: {}", config.input.display()));

    if console.show_profile {
        // Profile is informational only; a failure here must not stop the run
        match describe_columns(&df) {
            Ok(columns) => display_column_profile(&columns),
            Err(e) => print_warning(&profile_warning(&e)),
        }
    }

    let output_dir = config.output_dir();
    match analyze_loaded(&df, &output_dir, renderer) {
        Ok((artifacts, readme)) => Ok(AnalysisOutcome {
            output_dir,
            readme,
            artifacts,
            rows: df.height(),
            columns: df.width(),
        }),
        Err(e) => {
            print_error(&format!("Error during analysis: {}", e));
            Err(e)
        }
    }
}

fn profile_warning(e: &PolarsError) -> String {
    format!("Could not build column profile: {}", e)
}

// No spinner here: plotting prints per-plot lines that a ticking spinner would overdraw
fn analyze_loaded(
    df: &DataFrame,
    output_dir: &std::path::Path,
    renderer: &dyn ChartRenderer,
) -> Result<(Vec<PlotArtifact>, PathBuf), AnalysisError> {
    let artifacts = generate_plots(df, output_dir, renderer)?;

    let readme = write_readme(output_dir, df, &artifacts)?;
    Ok((artifacts, readme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_exit_codes_distinguish_failures() {
        let load = AnalysisError::Load(LoadError::Read {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        let plot = AnalysisError::Plot(PlotError::NoData("x".to_string()));
        let report = AnalysisError::Report(ReportError::Write {
            path: Path::new("out/README.md").to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });

        assert_eq!(load.exit_code(), EXIT_LOAD_FAILED);
        assert_eq!(plot.exit_code(), EXIT_ANALYSIS_FAILED);
        assert_eq!(report.exit_code(), EXIT_ANALYSIS_FAILED);
        assert_ne!(EXIT_LOAD_FAILED, EXIT_ANALYSIS_FAILED);
    }

    #[test]
    fn test_profile_warning_carries_cause() {
        let message = profile_warning(&PolarsError::ComputeError("n_unique failed".into()));
        assert!(message.starts_with("Could not build column profile"));
        assert!(message.contains("n_unique failed"));
    }

    #[test]
    fn test_load_error_message_names_file() {
        let err = AnalysisError::Load(LoadError::Read {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert!(err.to_string().contains("missing.csv"));
    }
}
