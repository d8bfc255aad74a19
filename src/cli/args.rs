//! Command-line argument definitions using clap

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// autolysis - Profile a CSV file, plot its meaningful columns and write a Markdown report
#[derive(Parser, Debug)]
#[command(name = "autolysis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file. Outputs go to a directory named after the file (extension stripped).
    pub input: Option<PathBuf>,
}

/// What the process should do for a given argument list
#[derive(Debug)]
pub enum Invocation {
    /// Analyze this file
    Analyze(PathBuf),
    /// Wrong number of arguments: print the usage line and stop
    Usage,
    /// `--help` or `--version`: let clap print its text
    Info(clap::Error),
}

impl Cli {
    /// Parse arguments leniently: any argument count other than one positional
    /// path yields [`Invocation::Usage`] instead of a clap error exit.
    pub fn invocation_from<I, T>(args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(Cli { input: Some(input) }) => Invocation::Analyze(input),
            Ok(Cli { input: None }) => Invocation::Usage,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Invocation::Info(e)
            }
            Err(_) => Invocation::Usage,
        }
    }
}
