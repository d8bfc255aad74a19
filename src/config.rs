//! Run configuration
//!
//! The command line only carries the input path; everything else a run needs
//! lives here with fixed defaults so the library can be driven explicitly.

use std::path::{Path, PathBuf};

use crate::pipeline::TextEncoding;

/// Name used for the output directory when the input has no usable file stem
const FALLBACK_STEM: &str = "output";

/// Settings for a single analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// CSV file to analyze
    pub input: PathBuf,
    /// Directory under which the per-dataset output directory is created
    pub output_root: PathBuf,
    /// Encoding used to decode the input file
    pub encoding: TextEncoding,
}

impl AnalysisConfig {
    /// Configuration with the defaults used by the CLI: outputs relative to the
    /// current directory, input decoded as ISO-8859-1.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: PathBuf::from("."),
            encoding: TextEncoding::default(),
        }
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Output directory: `<output_root>/<input file name without extension>`
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(dataset_stem(&self.input))
    }
}

/// File name of the input without its last extension
pub fn dataset_stem(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM)
        .to_string()
}
